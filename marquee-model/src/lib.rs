//! Core data model definitions shared across Marquee crates.
//!
//! Entities (`Film`, `Person`, `Genre`) are the fully resolved shapes handed
//! back to callers. Request value types (`Filter`, `SearchIntent`, `Page`,
//! `SortSpec`) carry already-parsed caller input into the service layer.
#![allow(missing_docs)]

pub mod error;
pub mod film;
pub mod filter;
pub mod genre;
pub mod index;
pub mod paging;
pub mod person;
pub mod prelude;

// Intentionally curated re-exports for downstream consumers.
pub use error::PageError;
pub use film::{Film, FilmBrief, FilmList, GenreInFilm, PersonInFilm};
pub use filter::{Filter, SearchIntent};
pub use genre::{Genre, GenreList};
pub use index::CatalogIndex;
pub use paging::{MAX_PAGE_SIZE, Page, SortSpec};
pub use person::{Person, PersonList, PrimaryRole};
