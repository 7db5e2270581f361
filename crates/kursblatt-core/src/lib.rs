//! # Kursblatt Core
//!
//! Identifier resolution, daily price history, and news enrichment for
//! the kursblatt report pipeline.
//!
//! ## Overview
//!
//! The crate turns a WKN or ISIN into a CSV report in four sequential
//! steps:
//!
//! - **Resolve** the identifier to an exchange ticker via OpenFIGI
//! - **Fetch** the full daily OHLCV series from Alpha Vantage, trimmed
//!   to a trailing calendar-day window
//! - **Enrich** each day with at most one news headline (best-effort)
//! - **Write** the merged records as `<TICKER>.csv`
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | OpenFIGI and Alpha Vantage clients |
//! | [`config`] | Process-wide configuration, built once |
//! | [`domain`] | Identifier, Ticker, DailyRecord, NewsItem |
//! | [`enrich`] | News bucketing and per-day attachment |
//! | [`error`] | Per-stage error types |
//! | [`http`] | HTTP client abstraction |
//! | [`pipeline`] | Sequential orchestration |
//! | [`report`] | CSV output |
//! | [`retry`] | Single-retry policy for upstream calls |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use kursblatt_core::{Config, Identifier, ReportPipeline, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::builder()
//!         .with_api_key("demo")
//!         .with_window_days(30)
//!         .build()?;
//!
//!     let pipeline = ReportPipeline::new(&config, Arc::new(ReqwestHttpClient::new()));
//!     let identifier = Identifier::parse("US0378331005")?;
//!     let summary = pipeline.run(&identifier).await?;
//!
//!     println!("{} rows written to {}", summary.rows, summary.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Each pipeline stage has its own error type; the first three stages
//! are fatal, news enrichment is not:
//!
//! | Stage | Error | On failure |
//! |-------|-------|------------|
//! | configuration | [`ConfigError`] | abort before any network call |
//! | resolution | [`ResolutionError`] | abort |
//! | price history | [`FetchError`] | abort |
//! | news feed | [`EnrichmentError`] | warn, continue price-only |
//! | report write | [`PipelineError::Report`] | abort |
//!
//! ## Security
//!
//! - API keys come from flags or the environment and are never logged
//! - Tickers are validated before they become file names

pub mod adapters;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod report;
pub mod retry;

// Re-export commonly used types at crate root for convenience

// Provider clients
pub use adapters::{AlphaVantageClient, OpenFigiClient};

// Configuration
pub use config::{Config, ConfigBuilder, API_KEY_ENV, DEFAULT_WINDOW_DAYS, FIGI_API_KEY_ENV};

// Domain types
pub use domain::{DailyRecord, IdScheme, Identifier, NewsItem, Ticker};

// Enrichment helpers
pub use enrich::{attach_news, bucket_news};

// Error types
pub use error::{
    ConfigError, EnrichmentError, FetchError, PipelineError, ResolutionError, ValidationError,
};

// HTTP client types
pub use http::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    DEFAULT_TIMEOUT_MS,
};

// Pipeline
pub use pipeline::{ReportPipeline, ReportSummary};

// Report writing
pub use report::write_report;

// Retry logic
pub use retry::{send_with_retry, RetryPolicy};
