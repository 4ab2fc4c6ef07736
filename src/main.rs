use anyhow::{Context, Result};
use quill_core::application::{
    ports::{ClockPort, LookupCachePort, MediaStorePort, SlugGeneratorPort},
    services::{ApplicationServices, Repositories},
};
use quill_core::config::{AppConfig, CacheBackend, StorageBackend};
use quill_core::infrastructure::{
    cache::{InMemoryLookupCache, RedisLookupCache},
    database,
    media::LocalMediaStore,
    repositories::{InMemoryStore, memory_repositories, postgres_repositories},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use quill_core::presentation::http::{
    routes::build_router,
    state::{HttpState, RouterOptions},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const REDIS_KEY_PREFIX: &str = "quill:";

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let repos = build_repositories(&config).await?;
    let cache = build_cache(&config)?;

    let media_store = LocalMediaStore::new(config.media_root().clone(), config.media_public_url());
    media_store.ensure_root().await?;
    let media: Arc<MediaStorePort> = Arc::new(media_store);
    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let slugger: Arc<SlugGeneratorPort> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        repos,
        cache,
        config.cache_ttl(),
        media,
        clock,
        slugger,
    ));

    let state = HttpState {
        services,
        options: RouterOptions {
            allowed_origins: config.allowed_origins().to_vec(),
            max_upload_bytes: config.max_upload_bytes(),
            media_root: config.media_root().clone(),
            media_public_url: config.media_public_url().to_string(),
        },
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr()))?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_repositories(config: &AppConfig) -> Result<Repositories> {
    match config.storage_backend() {
        StorageBackend::Postgres => {
            let url = config
                .database_url()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = database::init_pool(url, config.database_max_connections()).await?;
            database::run_migrations(&pool).await?;
            tracing::info!(
                max_connections = config.database_max_connections(),
                "using postgres storage"
            );
            Ok(postgres_repositories(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            Ok(memory_repositories(InMemoryStore::new()))
        }
    }
}

fn build_cache(config: &AppConfig) -> Result<Arc<LookupCachePort>> {
    match config.cache_backend() {
        CacheBackend::Memory => Ok(Arc::new(InMemoryLookupCache::new())),
        CacheBackend::Redis => {
            let url = config
                .redis_url()
                .context("REDIS_URL is required for the redis cache")?;
            tracing::info!("using redis lookup cache");
            Ok(Arc::new(RedisLookupCache::from_url(url, REDIS_KEY_PREFIX)?))
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
