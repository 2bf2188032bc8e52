// SensorBoard Dashboard - ThingSpeak sensor dashboard
// Copyright (c) 2025 SensorBoard contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! HTTP surface of the dashboard.
//!
//! | Route | Content |
//! |-------|---------|
//! | `/` | Rendered dashboard page |
//! | `/health` | Liveness, always `OK` |
//! | `/status` | Page state as JSON |
//! | `/metrics` | Prometheus text format |

use crate::client::FeedSource;
use crate::config::DashboardConfig;
use crate::dashboard::{self, PageState};
use crate::error::Result;
use crate::metrics::encode_metrics;
use crate::render::render_html;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    /// Written once by the load task, read by every handler.
    pub page: RwLock<PageState>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(page: PageState) -> Arc<Self> {
        Arc::new(Self {
            page: RwLock::new(page),
            start_time: Instant::now(),
        })
    }
}

/// Build the router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Spawn the one-shot load; the page shows `Loading...` until it finishes.
pub fn spawn_load<S>(state: Arc<AppState>, source: Arc<S>, config: Arc<DashboardConfig>)
where
    S: FeedSource + 'static,
{
    tokio::spawn(async move {
        let page = dashboard::load(source.as_ref(), &config).await;
        *state.page.write().await = page;
        info!("Dashboard loaded");
    });
}

/// Serve the dashboard until the process is stopped.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Dashboard: http://{}", addr);
        info!("Metrics endpoint: http://{}/metrics", addr);
    }
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Root handler - the rendered dashboard.
async fn root_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let page = state.page.read().await;
    Html(render_html(&page))
}

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Metrics handler - returns Prometheus text format.
async fn metrics_handler() -> impl IntoResponse {
    let metrics = encode_metrics();
    (
        StatusCode::OK,
        [("Content-Type", "text/plain; charset=utf-8")],
        metrics,
    )
}

/// Status information response.
#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub uptime_secs: u64,
    pub loaded: bool,
    pub page: PageState,
}

/// Status handler - returns the page state as JSON.
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let page = state.page.read().await.clone();
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        loaded: page.is_loaded(),
        page,
    })
}
