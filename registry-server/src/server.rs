//! HTTP server setup for the package registry.
//!
//! Routes, with and without the trailing slash:
//!
//! - `GET /`: Index
//! - `GET /{package_name}/`: Package
//! - `GET /{package_name}/{version_number}/`: Package pinned to a version

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::handlers;
use crate::state::AppState;
use crate::store::CatalogStore;

/// Router serving the registry endpoints from `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/{package_name}", get(handlers::package))
        .route("/{package_name}/", get(handlers::package))
        .route("/{package_name}/{version_number}", get(handlers::package_version))
        .route("/{package_name}/{version_number}/", get(handlers::package_version))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Opens the catalog named by `config` and serves it until the process is
/// stopped.
pub async fn run_server(config: Config) -> Result<()> {
    let catalog_path = config.storage.catalog_path();
    let packages_path = config.storage.packages_path();
    info!(
        catalog = %catalog_path.display(),
        packages = %packages_path.display(),
        "Opening package catalog"
    );

    let store = CatalogStore::open(&catalog_path, &packages_path).map_err(|e| {
        error!(catalog = %catalog_path.display(), error = %e, "Failed to open package catalog");
        anyhow::anyhow!("Failed to open package catalog: {}", e)
    })?;

    let bind_address = config.bind_address();
    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!(addr = %bind_address, error = %e, "Invalid socket address");
        anyhow::anyhow!("Invalid socket address {}: {}", bind_address, e)
    })?;

    let app = build_router(AppState::new(Arc::new(store), config));

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        error!(addr = %addr, error = %e, "Failed to bind to address");
        anyhow::anyhow!("Failed to bind to {}: {}", addr, e)
    })?;

    info!(addr = %addr, "Registry listening");
    println!("Registry is running on http://{}", addr);

    axum::serve(listener, app).await.map_err(|e| {
        error!(error = %e, "Server error");
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
