use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Identifier, Ticker};
use crate::error::ResolutionError;
use crate::http::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::retry::{send_with_retry, RetryPolicy};

const MAPPING_URL: &str = "https://api.openfigi.com/v3/mapping";
const API_KEY_HEADER: &str = "x-openfigi-apikey";

/// Symbology client backed by the OpenFIGI v3 mapping endpoint.
///
/// Anonymous access works with tight quotas; an API key raises them and
/// is forwarded as a request header when configured.
pub struct OpenFigiClient {
    http: Arc<dyn HttpClient>,
    api_key: Option<String>,
    timeout_ms: u64,
    retry: RetryPolicy,
}

impl OpenFigiClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            api_key: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Resolve an identifier to the first ticker of the first match
    /// group. No disambiguation beyond first-wins.
    pub async fn resolve(&self, identifier: &Identifier) -> Result<Ticker, ResolutionError> {
        let jobs = [MappingJob {
            id_type: identifier.scheme().as_str(),
            id_value: identifier.as_str(),
        }];
        let body = serde_json::to_string(&jobs).map_err(|error| ResolutionError::Encode {
            message: error.to_string(),
        })?;

        let mut request = HttpRequest::post(MAPPING_URL)
            .with_header("content-type", "application/json")
            .with_body(body)
            .with_timeout_ms(self.timeout_ms);
        if let Some(api_key) = &self.api_key {
            request = request.with_header(API_KEY_HEADER, api_key);
        }

        let response = send_with_retry(self.http.as_ref(), &self.retry, request).await?;

        if !response.is_success() {
            return Err(ResolutionError::Upstream {
                status: response.status,
            });
        }

        let groups: Vec<MappingGroup> =
            serde_json::from_str(&response.body).map_err(|error| ResolutionError::Decode {
                message: error.to_string(),
            })?;

        let ticker = groups
            .first()
            .and_then(|group| group.data.first())
            .and_then(|entry| entry.ticker.as_deref())
            .map(str::trim)
            .filter(|ticker| !ticker.is_empty())
            .ok_or_else(|| ResolutionError::NotFound {
                identifier: identifier.as_str().to_owned(),
            })?;

        Ticker::parse(ticker).map_err(|source| ResolutionError::InvalidTicker { source })
    }
}

#[derive(Debug, Serialize)]
struct MappingJob<'a> {
    #[serde(rename = "idType")]
    id_type: &'a str,
    #[serde(rename = "idValue")]
    id_value: &'a str,
}

#[derive(Debug, Deserialize)]
struct MappingGroup {
    #[serde(default)]
    data: Vec<MappingEntry>,
}

#[derive(Debug, Deserialize)]
struct MappingEntry {
    #[serde(default)]
    ticker: Option<String>,
}
