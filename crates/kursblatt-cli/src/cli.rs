//! CLI argument definitions for kursblatt.
//!
//! A single flat command: resolve one identifier, fetch its history,
//! write one CSV.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--id` | required | WKN or ISIN to look up |
//! | `--days` | `365` | Trailing window in calendar days |
//! | `--output-dir` | `.` | Directory the CSV is written into |
//! | `--apikey` | env `ALPHAVANTAGE_API_KEY` | Alpha Vantage credential |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Apple by ISIN, last year
//! kursblatt --id US0378331005
//!
//! # SAP by WKN, last 30 days, into ./reports
//! kursblatt --id 716460 --days 30 --output-dir reports
//! ```

use std::path::PathBuf;

use clap::Parser;

use kursblatt_core::DEFAULT_TIMEOUT_MS;

/// Kursblatt - daily price history with news headlines, as CSV
///
/// Resolves a German WKN or an ISIN to its exchange ticker, downloads
/// the recent daily OHLCV history, attaches at most one news headline
/// per trading day, and writes `<output-dir>/<TICKER>.csv`.
#[derive(Debug, Parser)]
#[command(
    name = "kursblatt",
    author,
    version,
    about = "WKN/ISIN daily price history with news headlines, as CSV"
)]
pub struct Cli {
    /// Security identifier to look up (WKN or ISIN).
    #[arg(long)]
    pub id: String,

    /// Trailing window size in calendar days.
    #[arg(long, default_value_t = 365)]
    pub days: u32,

    /// Directory the CSV report is written into. Must exist.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Alpha Vantage API key. Falls back to the ALPHAVANTAGE_API_KEY
    /// environment variable (a local .env file is read first).
    #[arg(long)]
    pub apikey: Option<String>,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}
