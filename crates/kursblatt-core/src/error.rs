use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpError;

/// Validation errors for identifiers and tickers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("identifier cannot be empty")]
    EmptyIdentifier,
    #[error("identifier length {len} exceeds max {max}")]
    IdentifierTooLong { len: usize, max: usize },
    #[error("identifier contains invalid character '{ch}' at index {index}")]
    IdentifierInvalidChar { ch: char, index: usize },

    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter or digit: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },
}

/// Startup configuration errors, raised before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Alpha Vantage API key required: pass --apikey or set ALPHAVANTAGE_API_KEY")]
    MissingApiKey,
}

/// Symbology lookup failures. All of these terminate the run.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("openfigi transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("openfigi returned status {status}")]
    Upstream { status: u16 },

    #[error("mapping request could not be encoded: {message}")]
    Encode { message: String },

    #[error("mapping response could not be decoded: {message}")]
    Decode { message: String },

    #[error("no ticker found for identifier {identifier}")]
    NotFound { identifier: String },

    #[error("mapping returned unusable ticker")]
    InvalidTicker {
        #[source]
        source: ValidationError,
    },
}

/// Daily price history failures. All of these terminate the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("alphavantage transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("alphavantage returned status {status}")]
    Upstream { status: u16 },

    #[error("daily series could not be decoded: {message}")]
    Decode { message: String },

    #[error("no data returned for symbol {ticker}")]
    Empty { ticker: String },

    #[error("unparseable series date '{value}'")]
    InvalidDate { value: String },
}

/// News feed failures. The pipeline downgrades these to a warning and
/// continues with price-only output.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("alphavantage transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("alphavantage returned status {status}")]
    Upstream { status: u16 },

    #[error("news feed could not be decoded: {message}")]
    Decode { message: String },
}

/// Union of the fatal stage errors a report run can surface.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("could not write report to {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
