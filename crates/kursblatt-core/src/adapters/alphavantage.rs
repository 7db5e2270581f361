use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime};

use crate::domain::{DailyRecord, NewsItem, Ticker, DAY_FORMAT};
use crate::error::{EnrichmentError, FetchError};
use crate::http::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::retry::{send_with_retry, RetryPolicy};

const QUERY_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage client for the daily series and news feed endpoints.
pub struct AlphaVantageClient {
    http: Arc<dyn HttpClient>,
    api_key: String,
    timeout_ms: u64,
    retry: RetryPolicy,
}

impl AlphaVantageClient {
    pub fn new(http: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch the full daily series for a ticker and keep the trailing
    /// `window_days` calendar days. An unparseable series date fails the
    /// whole fetch; a provider format change must not be masked.
    pub async fn daily_history(
        &self,
        ticker: &Ticker,
        window_days: u32,
    ) -> Result<Vec<DailyRecord>, FetchError> {
        let endpoint = format!(
            "{QUERY_URL}?function=TIME_SERIES_DAILY&symbol={}&outputsize=full&apikey={}",
            urlencoding::encode(ticker.as_str()),
            self.api_key
        );

        let request = HttpRequest::get(endpoint).with_timeout_ms(self.timeout_ms);
        let response = send_with_retry(self.http.as_ref(), &self.retry, request).await?;

        if !response.is_success() {
            return Err(FetchError::Upstream {
                status: response.status,
            });
        }

        let decoded: DailySeriesResponse =
            serde_json::from_str(&response.body).map_err(|error| FetchError::Decode {
                message: error.to_string(),
            })?;

        // Rate-limit notices decode to an empty series and land here too.
        if decoded.series.is_empty() {
            return Err(FetchError::Empty {
                ticker: ticker.as_str().to_owned(),
            });
        }

        let cutoff = OffsetDateTime::now_utc().checked_sub(Duration::days(i64::from(window_days)));

        let mut records = Vec::with_capacity(decoded.series.len());
        for (day, bar) in decoded.series {
            let date = Date::parse(&day, &DAY_FORMAT)
                .map_err(|_| FetchError::InvalidDate { value: day.clone() })?;

            if let Some(cutoff) = cutoff {
                if date.midnight().assume_utc() < cutoff {
                    continue;
                }
            }

            records.push(DailyRecord::new(
                date, bar.open, bar.high, bar.low, bar.close, bar.volume,
            ));
        }

        Ok(records)
    }

    /// Fetch the news feed for a ticker. An empty feed is a valid
    /// outcome, not an error.
    pub async fn news_feed(&self, ticker: &Ticker) -> Result<Vec<NewsItem>, EnrichmentError> {
        let endpoint = format!(
            "{QUERY_URL}?function=NEWS_SENTIMENT&tickers={}&apikey={}",
            urlencoding::encode(ticker.as_str()),
            self.api_key
        );

        let request = HttpRequest::get(endpoint).with_timeout_ms(self.timeout_ms);
        let response = send_with_retry(self.http.as_ref(), &self.retry, request).await?;

        if !response.is_success() {
            return Err(EnrichmentError::Upstream {
                status: response.status,
            });
        }

        let decoded: NewsFeedResponse =
            serde_json::from_str(&response.body).map_err(|error| EnrichmentError::Decode {
                message: error.to_string(),
            })?;

        Ok(decoded
            .feed
            .into_iter()
            .map(|entry| NewsItem::new(entry.title, entry.summary, entry.time_published))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Time Series (Daily)", default)]
    series: BTreeMap<String, DailyBar>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

#[derive(Debug, Deserialize)]
struct NewsFeedResponse {
    #[serde(default)]
    feed: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    time_published: String,
}
