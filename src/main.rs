//! homeprice: House price prediction server
//!
//! Main entry point for the HTTP service.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use homeprice::adapters::fs::FsArtifacts;
use homeprice::adapters::http;
use homeprice::config::ServerConfig;
use homeprice::ArtifactStore;

/// Install the global subscriber. The returned guard flushes on drop.
fn init_tracing(config: &ServerConfig) -> Result<WorkerGuard> {
    let (writer, guard) = match &config.log_file {
        Some(log_file) => {
            if let Some(parent) = log_file.parent() {
                // Best-effort: a missing directory surfaces as the open error below.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .with_context(|| format!("opening log file {}", log_file.display()))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    Ok(guard)
}

#[actix_web::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env().context("reading configuration")?;
    let _guard = init_tracing(&config)?;

    tracing::info!("Starting homeprice server...");

    let store = ArtifactStore::new(FsArtifacts::new(&config.columns_file, &config.model_file));
    http::serve(&config, store).await?;

    tracing::info!("homeprice shutdown complete.");
    Ok(())
}
