//! Process-wide configuration, resolved once at startup.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::http::DEFAULT_TIMEOUT_MS;
use crate::retry::RetryPolicy;

/// Environment variable consulted when no API key is passed explicitly.
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

/// Optional credential forwarded to the symbology service.
pub const FIGI_API_KEY_ENV: &str = "OPENFIGI_API_KEY";

/// Default trailing window in calendar days.
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Settings shared by every pipeline component. Built once, passed
/// explicitly; nothing reads the environment after construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub figi_api_key: Option<String>,
    pub window_days: u32,
    pub output_dir: PathBuf,
    pub timeout_ms: u64,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder merging explicit values with environment fallbacks.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    figi_api_key: Option<String>,
    window_days: Option<u32>,
    output_dir: Option<PathBuf>,
    timeout_ms: Option<u64>,
    retry: Option<RetryPolicy>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_figi_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.figi_api_key = Some(api_key.into());
        self
    }

    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.window_days = Some(window_days);
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Finish the build, falling back to the environment for both
    /// credentials. Blank values count as absent.
    pub fn build(self) -> Result<Config, ConfigError> {
        let env_api_key = env::var(API_KEY_ENV).ok();
        let env_figi_api_key = env::var(FIGI_API_KEY_ENV).ok();
        self.build_with_env(env_api_key, env_figi_api_key)
    }

    fn build_with_env(
        self,
        env_api_key: Option<String>,
        env_figi_api_key: Option<String>,
    ) -> Result<Config, ConfigError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env_api_key.filter(|key| !key.trim().is_empty()))
            .ok_or(ConfigError::MissingApiKey)?;

        let figi_api_key = self
            .figi_api_key
            .or(env_figi_api_key)
            .filter(|key| !key.trim().is_empty());

        Ok(Config {
            api_key,
            figi_api_key,
            window_days: self.window_days.unwrap_or(DEFAULT_WINDOW_DAYS),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            timeout_ms: self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
            retry: self.retry.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_wins_over_environment() {
        let config = ConfigBuilder::new()
            .with_api_key("flag-key")
            .build_with_env(Some(String::from("env-key")), None)
            .expect("config should build");

        assert_eq!(config.api_key, "flag-key");
    }

    #[test]
    fn environment_key_fills_in_when_no_flag_is_given() {
        let config = ConfigBuilder::new()
            .build_with_env(Some(String::from("env-key")), None)
            .expect("config should build");

        assert_eq!(config.api_key, "env-key");
    }

    #[test]
    fn missing_key_everywhere_fails() {
        let error = ConfigBuilder::new()
            .build_with_env(None, None)
            .expect_err("must fail");

        assert_eq!(error, ConfigError::MissingApiKey);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let error = ConfigBuilder::new()
            .with_api_key("   ")
            .build_with_env(Some(String::from("  ")), None)
            .expect_err("must fail");

        assert_eq!(error, ConfigError::MissingApiKey);
    }

    #[test]
    fn figi_key_is_optional_and_blank_counts_as_absent() {
        let with_key = ConfigBuilder::new()
            .with_api_key("k")
            .build_with_env(None, Some(String::from("figi-key")))
            .expect("config should build");
        assert_eq!(with_key.figi_api_key.as_deref(), Some("figi-key"));

        let without_key = ConfigBuilder::new()
            .with_api_key("k")
            .build_with_env(None, Some(String::from("")))
            .expect("config should build");
        assert_eq!(without_key.figi_api_key, None);
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ConfigBuilder::new()
            .with_api_key("k")
            .build_with_env(None, None)
            .expect("config should build");

        assert_eq!(config.window_days, DEFAULT_WINDOW_DAYS);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn explicit_settings_override_defaults() {
        let config = ConfigBuilder::new()
            .with_api_key("k")
            .with_window_days(30)
            .with_output_dir("/tmp/reports")
            .with_timeout_ms(2_500)
            .with_retry(RetryPolicy::no_retry())
            .build_with_env(None, None)
            .expect("config should build");

        assert_eq!(config.window_days, 30);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.timeout_ms, 2_500);
        assert_eq!(config.retry.max_retries, 0);
    }
}
