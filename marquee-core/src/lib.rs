//! # Marquee Core
//!
//! Retrieval layer for the Marquee read-only cinema catalog.
//!
//! ## Overview
//!
//! Every read goes through one of two services, built fresh per request:
//!
//! - [`ListService`]: an ordered page of films, persons or genres, optionally
//!   filtered by a related entity, matched against free text, and sorted.
//! - [`RetrieveService`]: a single fully resolved entity by id.
//!
//! Both derive a deterministic [`CacheKey`] from their parameters and read
//! through [`CacheAside`]. On a miss the [`query`] module assembles a search
//! request, a [`DocumentStore`] executes it and the [`Enricher`] resolves the
//! cross-index references (a film's genres and directors, a person's films
//! and primary role) before the result is cached with a TTL.
//!
//! ## Storage
//!
//! The [`storage`] traits are implemented by Elasticsearch and Redis
//! adapters in [`infra`], plus in-memory stores used by tests and local runs.
//! Wrap any store in [`Retrying`] to retry connectivity failures with
//! bounded exponential backoff.

pub mod cache;
pub mod documents;
pub mod enrich;
pub mod error;
pub mod infra;
pub mod query;
pub mod service;
pub mod storage;

pub use cache::{CacheAside, CacheKey};
pub use enrich::{CatalogEnricher, Enricher};
pub use error::{CatalogError, Result};
pub use query::{ListQuery, QueryBuilder, SearchRequest};
pub use service::{CinemaObject, CinemaObjectList, ListService, RetrieveService};
pub use storage::{CacheStore, DocumentStore, RetryPolicy, Retrying};
