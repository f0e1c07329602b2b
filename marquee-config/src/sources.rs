use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::{parse_bool, parse_value};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub elastic: FileUrlConfig,
    #[serde(default)]
    pub redis: FileUrlConfig,
    #[serde(default)]
    pub cache: FileCacheConfig,
    #[serde(default)]
    pub retry: FileRetryConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
    pub debug: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileUrlConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileRetryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_delay_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub project_name: Option<String>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub docs: Option<String>,
    pub debug: Option<bool>,
    pub secret_key: Option<String>,
    pub elastic_url: Option<String>,
    pub redis_url: Option<String>,
    pub cache_ttl_seconds: Option<u64>,
    pub retry_max_attempts: Option<u32>,
    pub retry_initial_delay_ms: Option<u64>,
    pub retry_max_delay_ms: Option<u64>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the environment layer from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            config_path: text("MARQUEE_CONFIG").map(PathBuf::from),
            project_name: text("PROJECT_NAME"),
            server_host: text("SERVER_HOST"),
            server_port: parse_value(lookup("SERVER_PORT")),
            docs: text("DOCS"),
            debug: lookup("DEBUG").and_then(|raw| parse_bool(&raw)),
            secret_key: text("SECRET_KEY"),
            elastic_url: text("ELASTIC_URL"),
            redis_url: text("REDIS_URL"),
            cache_ttl_seconds: parse_value(lookup("CACHE_TTL_SECONDS")),
            retry_max_attempts: parse_value(lookup("RETRY_MAX_ATTEMPTS")),
            retry_initial_delay_ms: parse_value(lookup("RETRY_INITIAL_DELAY_MS")),
            retry_max_delay_ms: parse_value(lookup("RETRY_MAX_DELAY_MS")),
        }
    }
}
