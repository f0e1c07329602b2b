use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use marquee_config::{Config, ConfigLoad, ConfigLoader};
use marquee_core::infra::{self, ElasticStore, MemoryCache, MemoryDocumentStore, RedisCache};
use marquee_core::{CacheStore, DocumentStore, RetryPolicy, Retrying};
use marquee_server::{AppState, create_app, infra::schema};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "marquee-server", version, about = "Read-only cinema catalog API")]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path to a marquee.toml configuration file
    #[arg(short, long, env = "MARQUEE_CONFIG")]
    config: Option<PathBuf>,

    /// Serve from in-process stores instead of Elasticsearch and Redis
    #[arg(long, default_value_t = false)]
    in_memory: bool,

    /// JSON seed for --in-memory: {"movies": [...], "persons": [...], "genres": [...]}
    #[arg(long, requires = "in_memory")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => warn!(message = %warning.message, hint = %hint, "configuration warning"),
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if config.debug {
        warn!("Debug mode enabled: access control is disabled");
    }

    let (docs, cache) = if cli.in_memory {
        memory_stores(cli.seed.as_deref()).await?
    } else {
        backend_stores(&config).await?
    };

    let addr = config.bind_address();
    let project_name = config.project_name.clone();
    let router = create_app(AppState::new(docs, cache, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Starting {} on {}", project_name, addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn retry_policy(config: &Config) -> RetryPolicy {
    RetryPolicy {
        max_attempts: config.retry.max_attempts,
        initial_delay: config.retry.initial_delay,
        max_delay: config.retry.max_delay,
    }
}

async fn backend_stores(
    config: &Config,
) -> anyhow::Result<(Arc<dyn DocumentStore>, Arc<dyn CacheStore>)> {
    let policy = retry_policy(config);

    let elastic = ElasticStore::connect(&config.elastic.url)
        .context("failed to configure Elasticsearch client")?;
    schema::provision_indices(&elastic, &policy)
        .await
        .context("failed to provision search indices")?;
    info!("Connected to Elasticsearch at {}", infra::endpoint(&config.elastic.url));

    let redis_url = config.redis.url.as_str();
    let redis = policy
        .run("cache connect", || RedisCache::connect(redis_url))
        .await
        .context("failed to connect to Redis")?;

    Ok((
        Arc::new(Retrying::new(elastic, policy)),
        Arc::new(Retrying::new(redis, policy)),
    ))
}

async fn memory_stores(
    seed: Option<&Path>,
) -> anyhow::Result<(Arc<dyn DocumentStore>, Arc<dyn CacheStore>)> {
    let docs = MemoryDocumentStore::new();

    if let Some(path) = seed {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let seed = serde_json::from_str(&raw)
            .with_context(|| format!("seed file {} is not valid JSON", path.display()))?;
        let loaded = docs.load_seed(seed).await?;
        info!("Loaded {} documents from {}", loaded, path.display());
    }
    warn!("Serving from in-memory stores; data is not persisted");

    Ok((Arc::new(docs), Arc::new(MemoryCache::new())))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
