//! Inbound HTTP boundary.
//!
//! Serves the enriched catalog as JSON. The whole process shares one
//! [`EnrichmentEngine`], and with it one summary cache.

use crate::core::cache::CacheStats;
use crate::core::engine::EnrichmentEngine;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    engine: Arc<EnrichmentEngine>,
}

impl AppState {
    pub fn new(engine: EnrichmentEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    cache: CacheStats,
}

fn error_response(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/wildlife", get(list_wildlife))
        .route("/api/events", get(list_events))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Wildlife HTTP server listening on {}", addr);
    axum::serve(listener, build_router(state)).await
}

async fn list_wildlife(State(state): State<AppState>) -> impl IntoResponse {
    match state.engine.run().await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            tracing::error!("wildlife request failed: {}", e);
            error_response("Failed to load wildlife data").into_response()
        }
    }
}

async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    match state.engine.events().await {
        Ok(events) => Json(events).into_response(),
        Err(e) => {
            tracing::error!("events request failed: {}", e);
            error_response("Failed to load events data").into_response()
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        cache: state.engine.cache_stats(),
    })
}
