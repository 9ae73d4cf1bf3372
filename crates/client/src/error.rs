// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;

/// Error returned by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("HTTP error! status: {status}: {}", .body.message())]
    Status { status: u16, body: ErrorBody },
    /// DNS, connect, timeout, or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// A success response whose body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// True when the response declares a JSON content type.
pub(crate) fn declares_json(headers: &reqwest::header::HeaderMap) -> bool {
    headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

/// Consume a non-success response into [`ApiError::Status`].
///
/// A body that claims JSON but fails to parse is kept as text.
pub(crate) async fn status_error(resp: reqwest::Response) -> ApiError {
    let status = resp.status().as_u16();
    let json = declares_json(resp.headers());
    let text = match resp.text().await {
        Ok(t) => t,
        Err(e) => return ApiError::Transport(e),
    };
    let body = if json {
        serde_json::from_str(&text).map(ErrorBody::Json).unwrap_or(ErrorBody::Text(text))
    } else {
        ErrorBody::Text(text)
    };
    ApiError::Status { status, body }
}

/// Parsed error body: JSON when the response declared it, plain text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    /// Human-readable message: a JSON `message` (or `error`) field, a JSON
    /// string, or the raw text.
    pub fn message(&self) -> &str {
        match self {
            Self::Json(Value::Object(map)) => map
                .get("message")
                .or_else(|| map.get("error"))
                .and_then(Value::as_str)
                .unwrap_or("no details"),
            Self::Json(Value::String(s)) => s,
            Self::Json(_) => "no details",
            Self::Text(t) if t.is_empty() => "no details",
            Self::Text(t) => t,
        }
    }
}

/// Outcome of a failed token refresh.
///
/// `Clone` because one refresh outcome is handed to every concurrent waiter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error("no refresh token available")]
    NoRefreshToken,
    /// The refresh endpoint refused the token (expired, revoked, already rotated).
    #[error("refresh rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("refresh transport error: {0}")]
    Transport(String),
    /// The refresh task ended without producing an outcome.
    #[error("refresh aborted")]
    Aborted,
}

impl From<ApiError> for RefreshError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, body } => {
                Self::Rejected { status, message: body.message().to_owned() }
            }
            other => Self::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
