// src/main.rs
//! TON mnemonic checker entry point.
use anyhow::Result;
use clap::Parser;
use std::io;
use ton_mnemonic_checker::cli::Cli;
use ton_mnemonic_checker::config::CheckerConfig;
use ton_mnemonic_checker::core::wallet::TonSdkDeriver;
use ton_mnemonic_checker::service::{Checker, FundsResolver};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    info!("Starting ton-mnemonic-checker v{}", env!("CARGO_PKG_VERSION"));

    let config = CheckerConfig::from_env()?;
    info!(?config, versions = ?config.active_wallet_versions(), "Loaded configuration");

    let funds = FundsResolver::from_config(&config)?;
    let checker = Checker::new(config, TonSdkDeriver::new(), funds).once(cli.once);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = checker.run(&mut stdin.lock(), &mut stdout.lock()).await?;

    info!(
        "Checked {} mnemonic(s), {} wallet(s); {} invalid input(s)",
        summary.mnemonics_checked, summary.wallets_checked, summary.invalid_inputs
    );
    Ok(())
}

/// Logs go to stderr; stdout carries the report.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber =
        FmtSubscriber::builder().with_env_filter(filter).with_writer(io::stderr).finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
