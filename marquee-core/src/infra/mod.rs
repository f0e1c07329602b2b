//! Concrete store implementations.

pub mod elastic;
pub mod memory;
pub mod redis;

pub use elastic::ElasticStore;
pub use memory::{MemoryCache, MemoryDocumentStore};
pub use redis::RedisCache;

/// Scheme, host and port of a backend URL, without credentials or path.
/// Use this when logging where a store lives.
pub fn endpoint(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    match scheme {
        Some(scheme) => format!("{scheme}://{host}"),
        None => host.to_string(),
    }
}
