// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use serde_json::{json, Value};

use super::*;
use crate::config::ClientConfig;
use crate::epoch_secs;
use crate::storage::MemoryStore;
use crate::test_support::unsigned_token;

fn session_with(payload: Value) -> Arc<SessionStore> {
    let config = ClientConfig::with_base_url("http://127.0.0.1:9");
    let session = SessionStore::new(&config, Arc::new(MemoryStore::new()));
    session.set_tokens(unsigned_token(&payload), "r".to_owned(), false);
    session
}

fn live(extra: Value) -> Value {
    let mut payload = json!({ "sub": "ada", "exp": epoch_secs() + 3600 });
    if let (Some(map), Value::Object(extra)) = (payload.as_object_mut(), extra) {
        map.extend(extra);
    }
    payload
}

#[test]
fn signed_out_goes_to_sign_in() {
    let config = ClientConfig::with_base_url("http://127.0.0.1:9");
    let session = SessionStore::new(&config, Arc::new(MemoryStore::new()));
    assert_eq!(check_access(&session, &[]), Access::SignIn);
}

#[test]
fn expired_token_goes_to_sign_in() {
    let session = session_with(json!({ "sub": "ada", "exp": epoch_secs() - 5, "role": "ADMIN" }));
    assert_eq!(check_access(&session, &["ADMIN"]), Access::SignIn);
}

#[test]
fn empty_role_list_admits_any_user() {
    let session = session_with(live(json!({})));
    assert_eq!(check_access(&session, &[]), Access::Granted);
}

#[test]
fn missing_role_goes_to_sign_in() {
    let session = session_with(live(json!({})));
    assert_eq!(check_access(&session, &["USER"]), Access::SignIn);
}

#[test]
fn listed_role_is_granted() {
    let session = session_with(live(json!({ "scopes": ["USER"] })));
    assert_eq!(check_access(&session, &["USER", "ADMIN"]), Access::Granted);
}

#[test]
fn admin_roles_pass_every_gate() {
    let session = session_with(live(json!({ "role": "super_admin" })));
    assert_eq!(check_access(&session, &["USER"]), Access::Granted);
}

#[test]
fn other_role_goes_home() {
    let session = session_with(live(json!({ "scopes": [{ "role": "USER" }] })));
    assert_eq!(check_access(&session, &["ADMIN"]), Access::Home);
}
