// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Leadscrape console: session commands and the backend request proxy.

pub mod commands;
pub mod config;
pub mod state;
pub mod transport;

use std::sync::Arc;

use leadscrape_client::ClientConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{Cli, Command, ServeConfig};
use crate::state::ProxyState;
use crate::transport::build_router;

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(serve_config) => serve(&cli.client, &serve_config).await,
        Command::SignIn(args) => commands::sign_in(&cli.client, args).await,
        Command::Status => commands::status(&cli.client),
        Command::Refresh => commands::refresh(&cli.client).await,
        Command::SignOut { all } => commands::sign_out(&cli.client, all).await,
    }
}

/// Run the request proxy until SIGTERM or SIGINT.
pub async fn serve(client: &ClientConfig, config: &ServeConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone());

    let backend_url = config.backend_url(client);
    let state = Arc::new(ProxyState::new(backend_url, client.request_timeout()));
    let listener = TcpListener::bind(&addr).await?;
    info!(backend = %backend_url, "leadscrape-console listening on {addr}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    info!("proxy stopped");
    Ok(())
}

fn spawn_signal_handler(shutdown: CancellationToken) {
    use tokio::signal::unix::{signal, Signal, SignalKind};

    async fn recv(sig: &mut Option<Signal>) {
        match sig {
            Some(s) => {
                s.recv().await;
            }
            None => std::future::pending().await,
        }
    }

    tokio::spawn(async move {
        let mut sigterm = signal(SignalKind::terminate()).ok();
        let mut sigint = signal(SignalKind::interrupt()).ok();

        tokio::select! {
            _ = recv(&mut sigterm) => info!("received SIGTERM"),
            _ = recv(&mut sigint) => info!("received SIGINT"),
        }
        shutdown.cancel();
    });
}
