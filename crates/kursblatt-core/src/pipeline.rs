//! Sequential report pipeline: resolve, fetch, enrich, write.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::{AlphaVantageClient, OpenFigiClient};
use crate::config::Config;
use crate::domain::{Identifier, Ticker};
use crate::enrich::{attach_news, bucket_news};
use crate::error::PipelineError;
use crate::http::HttpClient;
use crate::report::write_report;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub ticker: Ticker,
    /// Rows written, header not counted.
    pub rows: usize,
    /// Rows that carry a news headline.
    pub enriched_rows: usize,
    pub path: PathBuf,
    /// Set when news enrichment failed and the report is price-only.
    pub news_warning: Option<String>,
}

/// One-shot pipeline over a shared transport. Resolution failures and
/// fetch failures abort the run; a news failure downgrades to a warning
/// because price data alone is still useful output.
pub struct ReportPipeline {
    resolver: OpenFigiClient,
    provider: AlphaVantageClient,
    window_days: u32,
    output_dir: PathBuf,
}

impl ReportPipeline {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        let mut resolver = OpenFigiClient::new(Arc::clone(&http))
            .with_timeout_ms(config.timeout_ms)
            .with_retry(config.retry.clone());
        if let Some(figi_api_key) = &config.figi_api_key {
            resolver = resolver.with_api_key(figi_api_key.clone());
        }

        let provider = AlphaVantageClient::new(http, config.api_key.clone())
            .with_timeout_ms(config.timeout_ms)
            .with_retry(config.retry.clone());

        Self {
            resolver,
            provider,
            window_days: config.window_days,
            output_dir: config.output_dir.clone(),
        }
    }

    /// Run the full pipeline for one identifier and write
    /// `<output-dir>/<TICKER>.csv`.
    pub async fn run(&self, identifier: &Identifier) -> Result<ReportSummary, PipelineError> {
        let ticker = self.resolver.resolve(identifier).await?;
        info!(%identifier, %ticker, "resolved ticker symbol");

        let mut records = self
            .provider
            .daily_history(&ticker, self.window_days)
            .await?;
        info!(rows = records.len(), "fetched daily history");

        let news_warning = match self.provider.news_feed(&ticker).await {
            Ok(items) => {
                let buckets = bucket_news(&items);
                attach_news(&mut records, &buckets);
                None
            }
            Err(error) => {
                warn!(%error, "news enrichment failed; continuing with price data only");
                Some(error.to_string())
            }
        };

        // Provider map order is not a contract; the report is.
        records.sort_by_key(|record| record.date);

        let path = self.output_dir.join(format!("{ticker}.csv"));
        write_report(&records, &path).map_err(|source| PipelineError::Report {
            path: path.clone(),
            source,
        })?;

        let enriched_rows = records
            .iter()
            .filter(|record| record.news_title.is_some())
            .count();

        Ok(ReportSummary {
            ticker,
            rows: records.len(),
            enriched_rows,
            path,
            news_warning,
        })
    }
}
