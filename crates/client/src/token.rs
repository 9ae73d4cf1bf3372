// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Access-token inspection: expiry and role claims.
//!
//! Tokens are never verified here. The backend owns the signature; the
//! console only reads the payload to schedule refreshes and gate screens.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::{Map, Value};

/// base64url that accepts payloads with or without `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token must have three dot-separated segments, found {0}")]
    Segments(usize),
    #[error("token payload is not base64url: {0}")]
    Base64(String),
    #[error("token payload is not a JSON object: {0}")]
    Json(String),
    #[error("token payload has no numeric exp claim")]
    MissingExpiry,
}

/// Decoded payload of an access token.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    /// Expiry as epoch seconds.
    pub exp: u64,
    /// The full payload, for role probing and display.
    pub payload: Map<String, Value>,
}

impl Claims {
    pub fn subject(&self) -> Option<&str> {
        self.payload.get("sub").and_then(Value::as_str)
    }

    /// True when `exp` is strictly after `now` (epoch seconds).
    pub fn is_live_at(&self, now: u64) -> bool {
        self.exp > now
    }

    pub fn role(&self) -> Option<String> {
        extract_role(&self.payload)
    }
}

/// Decode the payload segment of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Segments(segments.len()));
    }

    let raw = PAYLOAD_ENGINE
        .decode(segments[1])
        .map_err(|e| TokenError::Base64(e.to_string()))?;
    let payload: Map<String, Value> =
        serde_json::from_slice(&raw).map_err(|e| TokenError::Json(e.to_string()))?;

    let exp = match payload.get("exp") {
        Some(Value::Number(n)) => {
            n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
        }
        _ => None,
    }
    .ok_or(TokenError::MissingExpiry)?;

    Ok(Claims { exp, payload })
}

/// One way of finding a role in a token payload.
type RoleStrategy = fn(&Map<String, Value>) -> Option<String>;

/// Role strategies, tried in order; the first hit wins.
const ROLE_STRATEGIES: &[RoleStrategy] =
    &[direct_role, scope_strings, scope_objects, authority_list];

/// Extract a role string from whichever claim shape the token uses.
pub fn extract_role(payload: &Map<String, Value>) -> Option<String> {
    ROLE_STRATEGIES.iter().find_map(|strategy| strategy(payload))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

/// `{"role": "ADMIN"}`
fn direct_role(payload: &Map<String, Value>) -> Option<String> {
    payload.get("role").and_then(Value::as_str).and_then(non_empty)
}

/// `{"scopes": ["SUPER_ADMIN", ...]}`
fn scope_strings(payload: &Map<String, Value>) -> Option<String> {
    let scopes = payload.get("scopes")?.as_array()?;
    scopes.first()?.as_str().and_then(non_empty)
}

/// `{"scopes": [{"role": "ADMIN"}, ...]}`
fn scope_objects(payload: &Map<String, Value>) -> Option<String> {
    let scopes = payload.get("scopes")?.as_array()?;
    scopes
        .iter()
        .filter_map(Value::as_object)
        .find_map(|scope| scope.get("role").and_then(Value::as_str).and_then(non_empty))
}

/// `{"authorities": ["ROLE_USER", "ROLE_ADMIN"]}` or `[{"authority": "ROLE_ADMIN"}]`
fn authority_list(payload: &Map<String, Value>) -> Option<String> {
    let authorities = payload.get("authorities")?.as_array()?;
    let name = |v: &Value| -> Option<String> {
        match v {
            Value::String(s) => non_empty(s),
            Value::Object(o) => o.get("authority").and_then(Value::as_str).and_then(non_empty),
            _ => None,
        }
    };
    authorities
        .iter()
        .filter_map(Value::as_str)
        .find(|s| s.to_lowercase().contains("admin"))
        .map(str::to_owned)
        .or_else(|| authorities.first().and_then(name))
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
