mod cli;
mod error;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use kursblatt_core::{Config, Identifier, ReportPipeline, ReqwestHttpClient};
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    // A local .env may pre-populate the environment, including RUST_LOG,
    // so it is loaded before the subscriber is installed.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "error".into()),
        )
        .init();

    if dotenv.is_err() {
        debug!("no .env file found, reading configuration from the environment");
    }

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let identifier = Identifier::parse(&cli.id)?;

    let mut builder = Config::builder()
        .with_window_days(cli.days)
        .with_output_dir(&cli.output_dir)
        .with_timeout_ms(cli.timeout_ms);
    if let Some(apikey) = &cli.apikey {
        builder = builder.with_api_key(apikey.clone());
    }
    let config = builder.build()?;

    let pipeline = ReportPipeline::new(&config, Arc::new(ReqwestHttpClient::new()));
    let summary = pipeline.run(&identifier).await?;

    if let Some(warning) = &summary.news_warning {
        eprintln!("⚠ news unavailable, report is price-only: {warning}");
    }
    println!(
        "✓ {}: saved {} rows ({} with news) to {}",
        summary.ticker,
        summary.rows,
        summary.enriched_rows,
        summary.path.display()
    );

    Ok(ExitCode::SUCCESS)
}
