//! Viewer Draft CLI
//!
//! Runs a single draft or drawing against a live Twitch channel and prints
//! the result as JSON on stdout. Configuration comes from the environment
//! (see `config.rs`); recording the winner in an exclusion list is left to
//! whoever invokes this binary.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use viewer_draft::{CancellationToken, Selector, TwitchClientImpl};

use config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries the result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,viewer_draft=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    tracing::info!(
        channel = %config.channel,
        mode = %config.mode,
        retry_budget = config.retry_budget,
        "Starting viewer draft"
    );

    let twitch = Arc::new(
        TwitchClientImpl::new(config.twitch.clone()).context("Failed to build Twitch client")?,
    );
    let selector = Selector::with_defaults(twitch);
    let request = config.request();

    // Ctrl-C stops the selection before its next request
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling selection");
            on_signal.cancel();
        }
    });

    match selector.select_cancellable(&request, &cancel).await {
        Ok(selection) => {
            let output = json!({
                "ok": true,
                "selection": selection,
                "record": selection.to_record(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let output = json!({
                "ok": false,
                "kind": e.kind(),
                "reason": e.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::FAILURE)
        }
    }
}
