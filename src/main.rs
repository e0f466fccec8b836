use anyhow::Result;
use axum::Router;
use std::{io::ErrorKind, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod storage;

use storage::SharedBackend;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: SharedBackend,
    pub storage_root: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;
    tracing::info!("Starting bucketd with config: {:?}", cfg);

    // --- Initialize storage backend (creates and canonicalizes the root) ---
    let backend =
        storage::local::LocalBackend::open(&cfg.storage_dir, cfg.chunk_size, cfg.max_object_size)
            .await?;
    let state = AppState {
        storage_root: backend.root().to_path_buf(),
        storage: Arc::new(backend),
    };

    // --- Build router ---
    let app: Router = routes::routes::routes().with_state(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
