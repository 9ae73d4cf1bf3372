// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport for the request proxy.

pub mod proxy;

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::ProxyState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: String,
}

/// `GET /health` reports local liveness only; the backend is not contacted.
async fn health(State(s): State<Arc<ProxyState>>) -> impl IntoResponse {
    Json(HealthResponse { status: "running", backend: s.backend_url.clone() })
}

/// Build the axum `Router` for the proxy.
pub fn build_router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/{*path}", any(proxy::forward))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
