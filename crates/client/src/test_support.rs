// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token builders for tests and local tooling.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};

use crate::epoch_secs;

/// Build an unsigned `header.payload.signature` token around `payload`.
pub fn unsigned_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.sig")
}

/// Token for `subject` whose `exp` lies `offset_secs` from now (negative = past).
pub fn token_expiring_in(subject: &str, offset_secs: i64) -> String {
    let exp = epoch_secs() as i64 + offset_secs;
    unsigned_token(&json!({ "sub": subject, "exp": exp, "scopes": ["USER"] }))
}
