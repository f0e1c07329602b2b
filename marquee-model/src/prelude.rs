//! Snapshot of the types surface for the service and HTTP layers.
//! Prefer importing from this module over individual modules when a file
//! touches both entities and request values.

pub use super::error::PageError;
pub use super::film::{Film, FilmBrief, FilmList, GenreInFilm, PersonInFilm};
pub use super::filter::{Filter, SearchIntent};
pub use super::genre::{Genre, GenreList};
pub use super::index::CatalogIndex;
pub use super::paging::{MAX_PAGE_SIZE, Page, SortSpec};
pub use super::person::{Person, PersonList, PrimaryRole};
