//! `faleproxy serve` — run the HTTP service in the foreground.

use crate::cli::output::{self, Styled};
use crate::rest::{self, AppState};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Start the service: validate the word pair, bind, and serve requests.
pub async fn run(port: u16, target: &str, replacement: &str, timeout_ms: u64) -> Result<()> {
    let s = Styled::new();

    // Initialize tracing
    let default_level = if output::is_verbose() {
        "faleproxy=debug"
    } else {
        "faleproxy=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().context("invalid log directive")?),
        )
        .init();

    info!("starting Faleproxy v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(target, replacement, timeout_ms)
        .context("invalid word pair configuration")?;

    if !output::is_quiet() {
        eprintln!(
            "  {} Faleproxy v{} replacing '{target}' with '{replacement}'",
            s.ok_sym(),
            env!("CARGO_PKG_VERSION"),
        );
        eprintln!("  Listening on http://127.0.0.1:{port}");
    }

    rest::start(port, Arc::new(state)).await
}
