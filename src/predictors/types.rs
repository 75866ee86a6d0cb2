use crate::error::ConfigError;
use std::time::Duration;

/// Environment variable holding the service base URL
pub const API_URL_VAR: &str = "PRICE_API_URL";
/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_VAR: &str = "PRICE_API_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the prediction service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Base URL; requests go to `{base_url}/predict`
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl PredictorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolve settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_VAR)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingSetting { name: API_URL_VAR })?;

        let mut config = Self::new(base_url);
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidSetting {
                name: TIMEOUT_VAR,
                message: e.to_string(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the predict endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/predict", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidSetting {
                name: API_URL_VAR,
                message: format!("expected an http(s) URL, got {url:?}"),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidSetting {
                name: TIMEOUT_VAR,
                message: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn endpoint_appends_predict() {
        assert_eq!(
            PredictorConfig::new("http://localhost:8000").endpoint(),
            "http://localhost:8000/predict"
        );
        assert_eq!(
            PredictorConfig::new("http://localhost:8000/").endpoint(),
            "http://localhost:8000/predict"
        );
    }

    #[test]
    fn from_lookup_reads_url_and_timeout() {
        let config = PredictorConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = PredictorConfig::from_lookup(lookup(&[(API_URL_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting { name: API_URL_VAR }));
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let err = PredictorConfig::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { name: TIMEOUT_VAR, .. }));
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        assert!(PredictorConfig::new("localhost:8000").validate().is_err());
        assert!(PredictorConfig::new("http://localhost:8000").validate().is_ok());
        assert!(PredictorConfig::new("http://localhost:8000")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
