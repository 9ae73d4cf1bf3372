// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bearer-authenticated backend requests with one refresh-and-retry on 401.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{declares_json, status_error, ApiError};
use crate::http_client;
use crate::session::SessionStore;

/// Per-call request options. Headers given here replace the defaults of the
/// same name.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::GET, headers: HeaderMap::new(), body: None }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, serde_json::Error> {
        self.body = Some(Bytes::from(serde_json::to_vec(body)?));
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    /// No body, or one that was not declared as JSON.
    Empty,
}

impl Body {
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(v) => v,
            Self::Empty => Value::Null,
        }
    }

    /// Deserialize into `T`.
    ///
    /// An empty body is tried as `{}`, then `null`, then `[]`, so structs with
    /// defaulted fields, `()`, `Option<T>` and lists all accept it.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        match self {
            Self::Json(v) => serde_json::from_value(v),
            Self::Empty => serde_json::from_value(Value::Object(Default::default())).or_else(|e| {
                serde_json::from_value(Value::Null)
                    .or_else(|_| serde_json::from_value(Value::Array(Vec::new())))
                    .map_err(|_| e)
            }),
        }
    }
}

/// Authorized request client.
///
/// Cheap to clone; all clones share the session and connection pool.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Self {
        Self {
            base_url: config.base_url().to_owned(),
            http: http_client(config.request_timeout()),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Issue `options` against `endpoint` (a path such as `/api/v1/proxies`).
    ///
    /// A 401 triggers the shared refresh and exactly one retry. When the
    /// refresh fails, or the backend answers 403, the session is purged and
    /// [`SessionEvent::SignInRequired`](crate::SessionEvent::SignInRequired)
    /// is emitted before the error is returned.
    pub async fn request(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<Body, ApiError> {
        let mut is_retry = false;
        loop {
            let sent = self.session.access_token();
            let resp = self.send(endpoint, options, sent.as_deref()).await?;
            let status = resp.status();
            if status.is_success() {
                return read_body(resp).await;
            }

            let err = status_error(resp).await;
            match status.as_u16() {
                401 if !is_retry => {
                    is_retry = true;
                    if self.session_replaced(sent.as_deref()) {
                        debug!(endpoint, "session replaced in flight, retrying with current token");
                        continue;
                    }
                    match self.session.refresh().await {
                        Ok(_) => debug!(endpoint, "retrying after token refresh"),
                        // A newer session owns the outcome; only its own failures sign out.
                        Err(e) if self.session_replaced(sent.as_deref()) => {
                            debug!(endpoint, err = %e, "refresh superseded by a newer session");
                        }
                        Err(e) => {
                            warn!(endpoint, err = %e, "token refresh after 401 failed");
                            self.session.require_sign_in(401);
                            return Err(err);
                        }
                    }
                }
                403 => {
                    warn!(endpoint, "access denied, clearing session");
                    self.session.require_sign_in(403);
                    return Err(err);
                }
                _ => return Err(err),
            }
        }
    }

    /// True when the session now holds a different access token than `sent`.
    /// A purged session does not count.
    fn session_replaced(&self, sent: Option<&str>) -> bool {
        self.session.access_token().is_some_and(|current| Some(current.as_str()) != sent)
    }

    async fn send(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let headers = headers(options, token);
        let mut req = self.http.request(options.method.clone(), url).headers(headers);
        if let Some(ref body) = options.body {
            req = req.body(body.clone());
        }
        Ok(req.send().await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        Ok(self.request(endpoint, &RequestOptions::new(Method::GET)).await?.decode()?)
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::new(Method::POST).json(body)?;
        Ok(self.request(endpoint, &options).await?.decode()?)
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::new(Method::PUT).json(body)?;
        Ok(self.request(endpoint, &options).await?.decode()?)
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        Ok(self.request(endpoint, &RequestOptions::new(Method::DELETE)).await?.decode()?)
    }

    /// POST a `text/plain` body.
    pub async fn post_text<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        text: impl Into<String>,
    ) -> Result<T, ApiError> {
        let options = RequestOptions::new(Method::POST)
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .body(text.into());
        Ok(self.request(endpoint, &options).await?.decode()?)
    }
}

/// Defaults (`Content-Type: application/json`, bearer `token`) overlaid by
/// the caller's headers.
fn headers(options: &RequestOptions, token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = token {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(e) => warn!(err = %e, "access token is not a valid header value"),
        }
    }
    // Extend replaces every existing value of a key the caller supplies.
    headers.extend(options.headers.clone());
    headers
}

/// JSON only when declared and non-blank; never fails on an empty body.
async fn read_body(resp: reqwest::Response) -> Result<Body, ApiError> {
    let json = declares_json(resp.headers());
    let bytes = resp.bytes().await?;
    if !json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Body::Empty);
    }
    Ok(Body::Json(serde_json::from_slice(&bytes)?))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
