// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot session commands. Each prints a JSON document to stdout.

use anyhow::Context;
use leadscrape_client::auth::SignInRequest;
use leadscrape_client::{epoch_secs, ClientConfig, SessionStore};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::config::SignInArgs;

/// Snapshot of the stored session.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub remember_me: bool,
    pub subject: Option<String>,
    pub role: Option<String>,
    pub expires_at: Option<u64>,
    /// Zero once expired.
    pub expires_in_secs: Option<u64>,
}

impl SessionStatus {
    pub fn of(session: &SessionStore, now: u64) -> Self {
        let claims = session.claims().ok().flatten();
        Self {
            authenticated: session.is_authenticated(),
            remember_me: session.remember_me(),
            subject: claims.as_ref().and_then(|c| c.subject().map(str::to_owned)),
            role: claims.as_ref().and_then(|c| c.role()),
            expires_at: claims.as_ref().map(|c| c.exp),
            expires_in_secs: claims.as_ref().map(|c| c.exp.saturating_sub(now)),
        }
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn read_password() -> anyhow::Result<String> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    anyhow::ensure!(!password.is_empty(), "empty password");
    Ok(password)
}

pub async fn sign_in(config: &ClientConfig, args: SignInArgs) -> anyhow::Result<()> {
    let password = match args.password {
        Some(p) => p,
        None => read_password().await?,
    };
    let session = SessionStore::open(config);
    session
        .sign_in(&SignInRequest { email: args.email, password }, args.remember)
        .await
        .context("sign-in failed")?;
    if !args.remember {
        warn!("session not remembered, it ends with this process");
    }
    print_json(&SessionStatus::of(&session, epoch_secs()))
}

pub fn status(config: &ClientConfig) -> anyhow::Result<()> {
    let session = SessionStore::open(config);
    print_json(&SessionStatus::of(&session, epoch_secs()))
}

pub async fn refresh(config: &ClientConfig) -> anyhow::Result<()> {
    let session = SessionStore::open(config);
    session.refresh().await.context("refresh failed")?;
    print_json(&SessionStatus::of(&session, epoch_secs()))
}

pub async fn sign_out(config: &ClientConfig, all: bool) -> anyhow::Result<()> {
    let session = SessionStore::open(config);
    if all {
        let resp = session.logout_all().await.context("sign-out of all devices failed")?;
        print_json(&resp)
    } else {
        session.logout().await;
        print_json(&SessionStatus::of(&session, epoch_secs()))
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
