pub mod api;
pub mod config;
pub mod interactions;
pub mod lookup;
pub mod models;
pub mod reference;
pub mod remote;
pub mod sequence;
pub mod session;
pub mod suggestions;
pub mod validation;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::api::{ApiContext, ServerError};
use crate::config::{AppConfig, ConfigError, SourceKind};
use crate::lookup::{DrugKnowledgeSource, LocalSource, RemoteSource};
use crate::reference::{ReferenceData, ReferenceError};
use crate::remote::RemoteError;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error("Cannot build remote clients: {0}")]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Load reference data and build the configured lookup source.
pub fn build_context(config: &AppConfig) -> Result<ApiContext, StartupError> {
    let reference = Arc::new(match &config.resources_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Loading reference data from directory");
            ReferenceData::load(dir)?
        }
        None => ReferenceData::bundled()?,
    });

    let source: Arc<dyn DrugKnowledgeSource> = match config.source {
        SourceKind::Local => Arc::new(LocalSource::new(Arc::clone(&reference))),
        SourceKind::Remote => {
            tracing::info!(
                rxnav = %config.rxnav_url,
                openfda = %config.openfda_url,
                timeout_ms = config.http_timeout.as_millis() as u64,
                "Using remote drug services"
            );
            Arc::new(RemoteSource::from_config(config)?)
        }
    };

    Ok(ApiContext::new(source, reference))
}

/// Serve the API until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    let ctx = build_context(&config)?;
    let server = api::start_server(ctx, config.bind_addr).await?;
    tracing::info!(addr = %server.addr, source = config.source.as_str(), "Ready");

    let signal = tokio::signal::ctrl_c().await;
    server.stop().await;
    signal.map_err(StartupError::Signal)
}
