// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pass-through forwarding of `/api/*` calls to the backend.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, warn};

use crate::state::ProxyState;

/// `ANY /api/{*path}` forwards to `{backend}/api/{path}?{query}`.
pub async fn forward(
    State(s): State<Arc<ProxyState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return preflight().into_response();
    }

    let url = target_url(&s.backend_url, &uri);
    debug!(method = %method, url = %url, "forwarding");

    let mut req = s.http.request(method.clone(), &url).headers(request_headers(&headers));
    if method != Method::GET && method != Method::HEAD {
        req = req.body(body);
    }

    let resp = match req.send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!(url = %url, err = %e, "backend unreachable");
            return bad_gateway("Failed to connect to backend");
        }
    };

    let status = resp.status();
    let headers = response_headers(resp.headers());
    match resp.bytes().await {
        Ok(body) => (status, headers, body).into_response(),
        Err(e) => {
            warn!(url = %url, err = %e, "backend response interrupted");
            bad_gateway("Failed to read backend response")
        }
    }
}

/// The only error the proxy produces itself: `{ "error": { code, message } }`.
pub fn bad_gateway(message: &str) -> Response {
    let body = json!({ "error": { "code": "BAD_GATEWAY", "message": message } });
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}

/// Permissive CORS answer for preflight requests.
pub fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, PUT, DELETE, PATCH, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
        ],
    )
}

/// The raw path is kept so percent-encoded segments reach the backend unchanged.
pub fn target_url(backend_url: &str, uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{backend_url}{}?{query}", uri.path()),
        None => format!("{backend_url}{}", uri.path()),
    }
}

fn request_headers(incoming: &HeaderMap) -> HeaderMap {
    filtered(incoming, |name| {
        !matches!(
            name,
            "host"
                | "origin"
                | "referer"
                | "connection"
                | "content-length"
                | "transfer-encoding"
        ) && !name.starts_with("sec-")
    })
}

fn response_headers(incoming: &HeaderMap) -> HeaderMap {
    filtered(incoming, |name| {
        !matches!(name, "transfer-encoding" | "content-length" | "connection")
            && !name.starts_with("access-control-")
    })
}

fn filtered(incoming: &HeaderMap, keep: impl Fn(&str) -> bool) -> HeaderMap {
    incoming
        .iter()
        .filter(|(name, _)| keep(name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
#[path = "proxy_tests.rs"]
mod tests;
