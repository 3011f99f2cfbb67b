//! HTTP surface of the catalog: JSON envelopes over the project store.

mod handlers;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(handlers::status))
        .route(
            "/api/projetos",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route("/api/projetos/buscar", get(handlers::search_projects))
        .route("/api/projetos/:id", get(handlers::get_project))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind_addr` and serve until the process is interrupted
pub async fn serve(state: AppState, bind_addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %listener.local_addr()?, "catalog api listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("catalog api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}
