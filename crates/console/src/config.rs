// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand};
use leadscrape_client::ClientConfig;

/// Leadscrape admin console: session tooling and backend request proxy.
#[derive(Debug, Parser)]
#[command(name = "leadscrape-console", version, about)]
pub struct Cli {
    /// Log format (json or text).
    #[arg(long, global = true, env = "LEADSCRAPE_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error) or an env-filter directive.
    #[arg(long, global = true, env = "LEADSCRAPE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(flatten)]
    pub client: ClientConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the request proxy in front of the backend.
    Serve(ServeConfig),
    /// Sign in and store the token pair.
    SignIn(SignInArgs),
    /// Show the current session.
    Status,
    /// Rotate the token pair now.
    Refresh,
    /// Sign out and clear the stored session.
    SignOut {
        /// Revoke every session of this user, not just this one.
        #[arg(long)]
        all: bool,
    },
}

/// Configuration for the request proxy.
#[derive(Debug, Clone, clap::Args)]
pub struct ServeConfig {
    /// Host to bind on.
    #[arg(long, default_value = "127.0.0.1", env = "LEADSCRAPE_CONSOLE_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000, env = "LEADSCRAPE_CONSOLE_PORT")]
    pub port: u16,

    /// Backend origin requests are forwarded to. Defaults to `--api-url`.
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,
}

impl ServeConfig {
    /// Backend origin without a trailing slash.
    pub fn backend_url<'a>(&'a self, client: &'a ClientConfig) -> &'a str {
        self.backend_url.as_deref().map_or_else(|| client.base_url(), |u| u.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct SignInArgs {
    #[arg(long, env = "LEADSCRAPE_EMAIL")]
    pub email: String,

    /// Read from stdin when omitted.
    #[arg(long, env = "LEADSCRAPE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Keep the session across restarts.
    #[arg(long)]
    pub remember: bool,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
