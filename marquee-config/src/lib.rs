//! Configuration for Marquee.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `.env`, then the process environment. The server applies CLI overrides on
//! top of the loaded [`Config`].
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod sources;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigWarning, ConfigWarnings};
pub use models::{
    AuthConfig, CacheConfig, Config, ConfigMetadata, ElasticConfig, RedisConfig, RetryConfig,
    ServerConfig,
};
pub use sources::{EnvConfig, FileConfig};
