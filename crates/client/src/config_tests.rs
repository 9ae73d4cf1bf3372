// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;

use super::*;

#[test]
fn base_url_strips_trailing_slash() {
    let config = ClientConfig::with_base_url("http://backend:8080/");
    assert_eq!(config.base_url(), "http://backend:8080");
}

#[test]
fn zero_timeout_means_transport_default() {
    let config = ClientConfig { request_timeout_secs: 0, ..ClientConfig::default() };
    assert_eq!(config.request_timeout(), None);

    let config = ClientConfig { request_timeout_secs: 5, ..ClientConfig::default() };
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn explicit_state_dir_wins() {
    let config =
        ClientConfig { state_dir: Some(PathBuf::from("/tmp/ls-state")), ..ClientConfig::default() };
    assert_eq!(config.state_dir(), PathBuf::from("/tmp/ls-state"));
}

#[test]
#[serial]
fn state_dir_prefers_xdg_state_home() {
    let prev = std::env::var("XDG_STATE_HOME").ok();
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(default_state_dir(), PathBuf::from("/tmp/xdg-state/leadscrape"));
    match prev {
        Some(v) => std::env::set_var("XDG_STATE_HOME", v),
        None => std::env::remove_var("XDG_STATE_HOME"),
    }
}

#[test]
#[serial]
fn state_dir_falls_back_to_home() {
    let prev_xdg = std::env::var("XDG_STATE_HOME").ok();
    let prev_home = std::env::var("HOME").ok();
    std::env::remove_var("XDG_STATE_HOME");
    std::env::set_var("HOME", "/home/tester");
    assert_eq!(default_state_dir(), PathBuf::from("/home/tester/.local/state/leadscrape"));
    if let Some(v) = prev_xdg {
        std::env::set_var("XDG_STATE_HOME", v);
    }
    match prev_home {
        Some(v) => std::env::set_var("HOME", v),
        None => std::env::remove_var("HOME"),
    }
}
