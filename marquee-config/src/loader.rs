use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    AuthConfig, CacheConfig, Config, ConfigMetadata, DEFAULT_DOCS_PATH, DEFAULT_PROJECT_NAME,
    DEFAULT_SECRET_KEY, ElasticConfig, RedisConfig, RetryConfig, ServerConfig,
};
use crate::sources::{EnvConfig, FileConfig};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("marquee.toml"),
        PathBuf::from("config/marquee.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Reads `.env` into the process environment, then layers the
    /// environment over the config file.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        if env_file_loaded {
            debug!("Loaded environment overrides from .env");
        }

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Same as [`ConfigLoader::load`] with an explicit environment layer and
    /// no `.env` processing.
    pub fn load_with_env(&self, env: EnvConfig) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        Ok(compose_config(file_config, env, config_path))
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = match (&self.options.config_path, &env_config.config_path) {
            (Some(path), _) | (None, Some(path)) => (path.clone(), true),
            (None, None) => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(path) => (path.clone(), false),
                None => return Ok((None, None)),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        debug!(path = %path.display(), "Loading configuration file");
        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source: err,
    })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> ConfigLoad {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No marquee.toml detected; using defaults and environment variables",
            "Set MARQUEE_CONFIG or pass --config to point at a configuration file",
        );
    }

    let FileConfig {
        project_name: file_project_name,
        server: file_server,
        elastic: file_elastic,
        redis: file_redis,
        cache: file_cache,
        retry: file_retry,
        auth: file_auth,
        debug: file_debug,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| "0.0.0.0".to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(8000),
        docs: docs_segment(env.docs.or(file_server.docs)),
    };

    let elastic = ElasticConfig {
        url: env
            .elastic_url
            .or(file_elastic.url)
            .unwrap_or_else(|| "http://127.0.0.1:9200".to_string()),
    };

    let redis = RedisConfig {
        url: env
            .redis_url
            .or(file_redis.url)
            .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
    };

    let cache = CacheConfig {
        ttl: Duration::from_secs(
            env.cache_ttl_seconds
                .or(file_cache.ttl_seconds)
                .unwrap_or(60),
        ),
    };

    let retry = RetryConfig {
        max_attempts: env
            .retry_max_attempts
            .or(file_retry.max_attempts)
            .unwrap_or(8),
        initial_delay: Duration::from_millis(
            env.retry_initial_delay_ms
                .or(file_retry.initial_delay_ms)
                .unwrap_or(100),
        ),
        max_delay: Duration::from_millis(
            env.retry_max_delay_ms
                .or(file_retry.max_delay_ms)
                .unwrap_or(10_000),
        ),
    };

    let auth = AuthConfig {
        secret_key: env
            .secret_key
            .or(file_auth.secret_key)
            .unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
    };

    let debug = env.debug.or(file_debug).unwrap_or(false);

    if auth.is_default_secret() && !debug {
        warnings.push_with_hint(
            "SECRET_KEY is using the built-in default",
            "Set SECRET_KEY to the key your token issuer signs with",
        );
    }
    if cache.ttl.is_zero() {
        warnings.push("CACHE_TTL_SECONDS is 0; entries are written with a 1 second expiry");
    }

    let config = Config {
        project_name: env
            .project_name
            .or(file_project_name)
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        server,
        elastic,
        redis,
        cache,
        retry,
        auth,
        debug,
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    ConfigLoad { config, warnings }
}

/// `"/openapi/"` and `"openapi"` name the same segment; blank falls back to
/// the default.
fn docs_segment(raw: Option<String>) -> String {
    raw.as_deref()
        .map(|value| value.trim().trim_matches('/'))
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_DOCS_PATH)
        .to_string()
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigWarnings(Vec<ConfigWarning>);

impl ConfigWarnings {
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint(&mut self, message: impl Into<String>, hint: impl Into<String>) {
        self.0.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.0.iter()
    }
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
