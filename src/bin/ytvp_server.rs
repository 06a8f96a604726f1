//! ytvp-server — 播放列表视频元数据服务
//!
//! Usage:
//!   YTVP_GOOGLE_API_KEY=... ytvp-server
//!
//! See `ServiceConfig::from_env` for the other `YTVP_*` variables. Log
//! verbosity follows `RUST_LOG` (default `info`).

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use ytvp::cache::{CacheStore, FileCache};
use ytvp::upstream::YouTubeClient;
use ytvp::{server, PlaylistService, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServiceConfig::from_env()?;

    let cache = Arc::new(CacheStore::new(
        config.cache_config(),
        Box::new(FileCache::new(&config.cache_dir)),
    ));
    let source = Arc::new(YouTubeClient::new(config.client_config())?);
    let app = server::router(PlaylistService::new(cache, source));

    tracing::info!(
        addr = %config.bind,
        cache_dir = %config.cache_dir.display(),
        ttl_secs = config.cache_ttl.as_secs(),
        cache_enabled = config.cache_enabled,
        "Starting ytvp server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    let serve = axum::serve(listener, app);
    tokio::select! {
        result = serve => result.context("server error")?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }
    Ok(())
}
