//! Query construction.
//!
//! [`dsl`] holds pure functions producing backend query bodies.
//! [`ListQuery`] combines them with sort and pagination into a
//! [`SearchRequest`].

mod builder;
pub mod dsl;

pub use builder::{ListQuery, QueryBuilder};

use serde::Serialize;
use serde_json::Value;

/// A search as sent to the document store.
///
/// `sort`, `from` and `size` travel as request parameters and take
/// precedence over the same keys inside `body`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchRequest {
    pub body: Option<Value>,
    pub sort: Option<String>,
    pub from: Option<u64>,
    pub size: Option<u64>,
}

impl SearchRequest {
    pub fn with_body(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }
}
