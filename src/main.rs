mod cli;
mod event;
mod feed;
mod render;
mod source;

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    set_up_tracing()?;
    if let Err(error) = cli::run(cli).await {
        error.log();
        return Err(error.into());
    }
    Ok(())
}

/// Logs go to stderr so the report on stdout stays clean.
fn set_up_tracing() -> Result<()> {
    #[cfg(windows)]
    let with_color = nu_ansi_term::enable_ansi_support().is_ok();
    #[cfg(not(windows))]
    let with_color = true;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(with_color && std::io::stderr().is_terminal())
        .with_target(false);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(if cfg!(debug_assertions) {
            "github_activity=debug"
        } else {
            "github_activity=error"
        })
    })?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    Ok(())
}
