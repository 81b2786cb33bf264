//! PartnerDesk - partner portal client
//!
//! Main entry point for the command line application.

use anyhow::{Context, Result};
use clap::Parser;
use partnerdesk_app::utils::init_logging;
use partnerdesk_app::{apply_cli_overrides, dispatch, AppContext, Cli};
use partnerdesk_infra::config;
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before logging so RUST_LOG from it applies
    let dotenv = dotenvy::dotenv();
    init_logging(cli.log_json, cli.verbose);
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "could not load .env file"),
    }

    let mut config = config::load(cli.config.clone()).context("failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);
    config::validate(&config).context("invalid configuration")?;

    let ctx = AppContext::new(config).await.context("failed to open session")?;

    let cancel = ctx.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            cancel.cancel();
        }
    });

    let output = dispatch(&ctx, &cli.command).await?;
    println!("{output}");
    Ok(())
}
