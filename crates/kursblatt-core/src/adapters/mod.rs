//! Provider clients for the symbology and market data services.

mod alphavantage;
mod openfigi;

pub use alphavantage::AlphaVantageClient;
pub use openfigi::OpenFigiClient;
