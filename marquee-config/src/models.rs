use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SECRET_KEY: &str = "secret_key";
pub const DEFAULT_PROJECT_NAME: &str = "Read-only API for an online cinema";
pub const DEFAULT_DOCS_PATH: &str = "openapi";

#[derive(Debug, Clone)]
pub struct Config {
    pub project_name: String,
    pub server: ServerConfig,
    pub elastic: ElasticConfig,
    pub redis: RedisConfig,
    pub cache: CacheConfig,
    pub retry: RetryConfig,
    pub auth: AuthConfig,
    /// Disables access control and enables verbose error bodies.
    pub debug: bool,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path segment for the API description, without slashes. The UI is
    /// served at `/{docs}` and the document at `/{docs}.json`.
    pub docs: String,
}

impl ServerConfig {
    pub fn docs_ui_path(&self) -> String {
        format!("/{}", self.docs)
    }

    pub fn docs_json_path(&self) -> String {
        format!("/{}.json", self.docs)
    }
}

#[derive(Debug, Clone)]
pub struct ElasticConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub secret_key: String,
}

impl AuthConfig {
    pub fn is_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
