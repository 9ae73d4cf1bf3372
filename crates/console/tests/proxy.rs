// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request proxy against a live mock backend.
//!
//! The proxy router runs in `axum_test::TestServer`; the backend is a real
//! listener on `127.0.0.1:0` so forwarding goes over the network.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Path;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::{Json, Router};
use axum_test::TestServer;
use leadscrape_console::state::ProxyState;
use leadscrape_console::transport::build_router;
use serde_json::{json, Value};

/// Echo back what arrived so tests can assert on the forwarded request.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> impl IntoResponse {
    let mut names: Vec<&str> = headers.keys().map(HeaderName::as_str).collect();
    names.sort_unstable();
    let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
    (
        [
            ("access-control-allow-origin", "http://backend.internal"),
            ("x-backend", "yes"),
        ],
        Json(json!({
            "method": method.as_str(),
            "path": uri.path(),
            "query": uri.query(),
            "headers": names,
            "authorization": auth,
            "body": body,
        })),
    )
}

async fn status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::IM_A_TEAPOT);
    (status, Json(json!({ "message": format!("status {code}") })))
}

async fn start_backend() -> anyhow::Result<SocketAddr> {
    let app = Router::new()
        .route("/api/v1/echo", any(echo))
        .route("/api/v1/status/{code}", get(status));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

/// Address that refuses connections.
async fn dead_addr() -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    Ok(listener.local_addr()?)
}

fn proxy(backend: SocketAddr) -> anyhow::Result<TestServer> {
    let state = Arc::new(ProxyState::new(&format!("http://{backend}"), None));
    TestServer::new(build_router(state))
}

#[tokio::test]
async fn forwards_method_path_query_and_body() -> anyhow::Result<()> {
    let server = proxy(start_backend().await?)?;

    let resp = server
        .put("/api/v1/echo")
        .add_query_param("page", 2)
        .add_header(HeaderName::from_static("authorization"), HeaderValue::from_static("Bearer t1"))
        .add_header(HeaderName::from_static("origin"), HeaderValue::from_static("http://console"))
        .add_header(HeaderName::from_static("sec-fetch-site"), HeaderValue::from_static("same"))
        .json(&json!({ "name": "acme" }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["method"], "PUT");
    assert_eq!(body["path"], "/api/v1/echo");
    assert_eq!(body["query"], "page=2");
    assert_eq!(body["authorization"], "Bearer t1");
    let sent: Value = serde_json::from_str(body["body"].as_str().unwrap_or(""))?;
    assert_eq!(sent, json!({ "name": "acme" }));
    let headers: Vec<&str> =
        body["headers"].as_array().into_iter().flatten().filter_map(Value::as_str).collect();
    assert!(headers.contains(&"content-type"));
    assert!(!headers.contains(&"origin"));
    assert!(!headers.contains(&"sec-fetch-site"));
    Ok(())
}

#[tokio::test]
async fn get_body_is_not_forwarded() -> anyhow::Result<()> {
    let server = proxy(start_backend().await?)?;

    let resp = server.get("/api/v1/echo").text("ignored").await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["method"], "GET");
    assert_eq!(body["body"], "");
    Ok(())
}

#[tokio::test]
async fn backend_status_and_body_pass_through() -> anyhow::Result<()> {
    let server = proxy(start_backend().await?)?;

    let resp = server.get("/api/v1/status/404").await;

    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>(), json!({ "message": "status 404" }));
    Ok(())
}

#[tokio::test]
async fn backend_cors_headers_are_dropped() -> anyhow::Result<()> {
    let server = proxy(start_backend().await?)?;

    let resp = server.post("/api/v1/echo").await;

    resp.assert_status_ok();
    let headers = resp.headers();
    assert!(headers.get("access-control-allow-origin").is_none());
    assert_eq!(headers.get("x-backend"), Some(&HeaderValue::from_static("yes")));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_502() -> anyhow::Result<()> {
    let server = proxy(dead_addr().await?)?;

    let resp = server.get("/api/v1/echo").await;

    resp.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], "BAD_GATEWAY");
    assert_eq!(body["error"]["message"], "Failed to connect to backend");
    Ok(())
}

#[tokio::test]
async fn preflight_is_answered_locally() -> anyhow::Result<()> {
    let server = proxy(dead_addr().await?)?;

    let resp = server.method(Method::OPTIONS, "/api/v1/scrape/contacts").await;

    resp.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(
        resp.headers().get("access-control-allow-methods"),
        Some(&HeaderValue::from_static("GET, POST, PUT, DELETE, PATCH, OPTIONS"))
    );
    Ok(())
}

#[tokio::test]
async fn health_does_not_touch_backend() -> anyhow::Result<()> {
    let server = proxy(dead_addr().await?)?;

    let resp = server.get("/health").await;

    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>()["status"], "running");
    Ok(())
}
