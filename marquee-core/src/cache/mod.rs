mod aside;
mod key;

pub use aside::{CacheAside, DEFAULT_CACHE_TTL};
pub use key::CacheKey;
