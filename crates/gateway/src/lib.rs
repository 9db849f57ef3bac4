//! API Gateway Library
//!
//! HTTP REST API for the gelato ordering backend.

pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use gelato_service_lib::config::GelatoConfig;
use gelato_service_lib::repository::{MemoryStore, Repository};
use gelato_service_lib::Services;

use crate::routes::create_router;
use crate::state::AppState;

/// Build the traced application router over a wired service graph.
pub fn app(services: Services) -> Router {
    create_router(AppState::new(services)).layer(TraceLayer::new_for_http())
}

/// Run the HTTP server with the given configuration.
///
/// With `in_memory` set, data lives only as long as the process.
pub async fn run_server(
    config: GelatoConfig,
    in_memory: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo: Arc<dyn Repository> = if in_memory {
        warn!("Using in-memory store; data will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        gelato_service_lib::sql_repository(&config.database).await?
    };

    let services = Services::new(repo, &config.jwt);
    let app = app(services);

    let addr: SocketAddr = config.server.addr().parse()?;
    info!("Gelato API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
