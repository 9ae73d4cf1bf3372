// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local mock of the leadscrape backend for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use leadscrape_client::storage::{DurableStore, MemoryStore};
use leadscrape_client::{ClientConfig, SessionEvent, SessionStore};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

/// Canned behaviour of the mock backend.
#[derive(Clone)]
pub struct MockConfig {
    /// Responses of the refresh endpoint in call order; the last one repeats.
    pub refresh_responses: Vec<(u16, Value)>,
    pub refresh_delay: Duration,
    pub sign_in: Option<Value>,
    pub logout_status: u16,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            refresh_responses: vec![(401, json!({ "message": "Invalid refresh token" }))],
            refresh_delay: Duration::ZERO,
            sign_in: None,
            logout_status: 200,
        }
    }
}

/// A request that fell through to the recording fallback.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

pub struct BackendState {
    config: MockConfig,
    pub refresh_calls: AtomicU32,
    pub refresh_bodies: Mutex<Vec<Value>>,
    pub logout_calls: AtomicU32,
    pub logout_bodies: Mutex<Vec<Value>>,
    pub resource_calls: AtomicU32,
    /// Authorization header of every `/api/v1/things` call.
    pub seen_auth: Mutex<Vec<Option<String>>>,
    /// Access tokens `/api/v1/things` accepts.
    pub accepted: Mutex<HashSet<String>>,
    pub recorded: Mutex<Vec<Recorded>>,
    /// Body served by the recording fallback.
    pub fallback_body: Mutex<Value>,
    pub fallback_status: Mutex<u16>,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    pub async fn start(config: MockConfig) -> Self {
        let state = Arc::new(BackendState {
            config,
            refresh_calls: AtomicU32::new(0),
            refresh_bodies: Mutex::new(Vec::new()),
            logout_calls: AtomicU32::new(0),
            logout_bodies: Mutex::new(Vec::new()),
            resource_calls: AtomicU32::new(0),
            seen_auth: Mutex::new(Vec::new()),
            accepted: Mutex::new(HashSet::new()),
            recorded: Mutex::new(Vec::new()),
            fallback_body: Mutex::new(json!({})),
            fallback_status: Mutex::new(200),
        });

        let app = Router::new()
            .route("/api/v1/auth/sign-in", post(sign_in))
            .route("/api/v1/auth/refresh", post(refresh))
            .route("/api/v1/auth/logout", post(logout))
            .route("/api/v1/things", get(things))
            .route("/api/v1/forbidden", get(forbidden))
            .route("/api/v1/empty", delete(|| async { StatusCode::NO_CONTENT }))
            .route(
                "/api/v1/json-empty",
                get(|| async { ([(CONTENT_TYPE, "application/json")], "") }),
            )
            .route("/api/v1/text", get(|| async { "hello" }))
            .route(
                "/api/v1/broken",
                get(|| async {
                    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "boom" })))
                }),
            )
            .route(
                "/api/v1/broken-text",
                get(|| async { (StatusCode::BAD_GATEWAY, "bad gateway") }),
            )
            .fallback(record)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::with_base_url(format!("http://{}", self.addr))
    }

    pub fn accept(&self, token: &str) {
        self.state.accepted.lock().insert(token.to_owned());
    }

    pub fn refresh_calls(&self) -> u32 {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> u32 {
        self.state.logout_calls.load(Ordering::SeqCst)
    }
}

/// A fresh session over an in-memory durable tier.
pub fn new_session(config: &ClientConfig) -> (Arc<SessionStore>, Arc<MemoryStore>) {
    let durable = Arc::new(MemoryStore::new());
    let session = SessionStore::new(config, Arc::clone(&durable) as Arc<dyn DurableStore>);
    (session, durable)
}

/// Sign-in/refresh response body.
pub fn token_pair(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires_in": 900,
        "token_type": "Bearer"
    })
}

/// Address nothing listens on.
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    listener.local_addr().expect("local addr")
}

/// Wait for the first event matching `pred`, skipping others.
pub async fn wait_for_event(
    rx: &mut broadcast::Receiver<SessionEvent>,
    within: Duration,
    pred: impl Fn(&SessionEvent) -> bool,
) -> Option<SessionEvent> {
    tokio::time::timeout(within, async {
        loop {
            match rx.recv().await {
                Ok(event) if pred(&event) => return Some(event),
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
    .await
    .ok()
    .flatten()
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn sign_in(State(s): State<Arc<BackendState>>) -> Response {
    match s.config.sign_in.clone() {
        Some(body) => Json(body).into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Bad credentials" })))
            .into_response(),
    }
}

async fn refresh(State(s): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let idx = s.refresh_calls.fetch_add(1, Ordering::SeqCst) as usize;
    s.refresh_bodies.lock().push(body);
    if !s.config.refresh_delay.is_zero() {
        tokio::time::sleep(s.config.refresh_delay).await;
    }
    let responses = &s.config.refresh_responses;
    let (code, body) = responses
        .get(idx)
        .or(responses.last())
        .cloned()
        .unwrap_or((500, json!({})));
    (status(code), Json(body)).into_response()
}

async fn logout(State(s): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    s.logout_calls.fetch_add(1, Ordering::SeqCst);
    s.logout_bodies.lock().push(body);
    status(s.config.logout_status).into_response()
}

async fn things(State(s): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    s.resource_calls.fetch_add(1, Ordering::SeqCst);
    let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_owned);
    s.seen_auth.lock().push(auth.clone());
    let accepted = auth
        .as_deref()
        .and_then(|a| a.strip_prefix("Bearer "))
        .is_some_and(|token| s.accepted.lock().contains(token));
    if accepted {
        Json(json!({ "items": [1, 2, 3] })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Token expired" }))).into_response()
    }
}

async fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "message": "Forbidden" }))).into_response()
}

async fn record(
    State(s): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    s.recorded.lock().push(Recorded {
        method,
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        content_type: headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_owned),
        authorization: headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_owned),
        body,
    });
    let code = *s.fallback_status.lock();
    (status(code), Json(s.fallback_body.lock().clone())).into_response()
}
