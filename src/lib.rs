pub mod api; // HTTP boundary: router, admin gate, handlers
pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod query; // Listing + public tracking
pub mod stats; // Dashboard aggregates
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_support;

use std::io::Write;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::auth::AdminAuth;
use crate::config::ServerConfig;
use crate::store::{SqliteDocumentStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("Cannot open document store: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
    #[error("I/O error during startup: {0}")]
    Io(#[from] std::io::Error),
}

/// Process entry point: logging, configuration, storage, then serve until Ctrl-C.
pub fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ServerConfig::from_env()?;
    let store = Arc::new(SqliteDocumentStore::open(&config.db_path)?);
    tracing::info!(path = %config.db_path.display(), "Document store ready");

    if config.seed_sample_data {
        db::seed::seed_if_empty(store.as_ref(), &mut rand::thread_rng())?;
    }

    let auth = admin_auth(config.admin_token.as_deref(), &mut std::io::stderr())?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::serve(store, auth, config.socket_addr()))?;
    Ok(())
}

/// Admin gate for the configured token. Without one, a token is generated
/// and written once to `out`; the log only records that it happened.
fn admin_auth<W: Write>(configured: Option<&str>, out: &mut W) -> std::io::Result<AdminAuth> {
    if let Some(token) = configured {
        return Ok(AdminAuth::new(token));
    }
    let token = auth::generate_token();
    writeln!(out, "Generated admin token for this run: {token}")?;
    tracing::warn!(
        "{} not set, generated an admin token for this run (printed to stderr)",
        config::ENV_ADMIN_TOKEN
    );
    Ok(AdminAuth::new(&token))
}
