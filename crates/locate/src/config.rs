//! Configuration for geocoding and geolocation
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{LocateError, LocateResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Public Nominatim instance
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Geocoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Base URL of a Nominatim-compatible service
    pub base_url: String,
    /// Identifying `User-Agent`, required by the Nominatim usage policy
    pub user_agent: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn default_user_agent() -> String {
    format!("wanderlust/{}", env!("CARGO_PKG_VERSION"))
}

impl GeocoderConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `WANDERLUST_GEOCODER_URL`: Nominatim base URL
    /// - `WANDERLUST_USER_AGENT`: `User-Agent` header value
    /// - `WANDERLUST_GEOCODER_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> LocateResult<Self> {
        Self::default().merge_env()
    }

    /// Overlay environment variables on top of this configuration
    pub fn merge_env(mut self) -> LocateResult<Self> {
        if let Ok(url) = env::var("WANDERLUST_GEOCODER_URL") {
            self.base_url = url;
        }

        if let Ok(agent) = env::var("WANDERLUST_USER_AGENT") {
            self.user_agent = agent;
        }

        if let Ok(secs) = env::var("WANDERLUST_GEOCODER_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                LocateError::config(format!("WANDERLUST_GEOCODER_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            self.timeout = Duration::from_secs(secs);
        }

        self.validate()?;
        Ok(self)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an endpoint such as `search` or `reverse`
    pub fn endpoint(&self, name: &str) -> LocateResult<Url> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), name);
        Url::parse(&url).map_err(|e| LocateError::InvalidUrl(format!("{url}: {e}")))
    }

    /// Validate the configuration
    pub fn validate(&self) -> LocateResult<()> {
        if self.base_url.is_empty() {
            return Err(LocateError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(LocateError::config("base_url must start with http:// or https://"));
        }

        Url::parse(&self.base_url).map_err(|e| LocateError::InvalidUrl(format!("{}: {e}", self.base_url)))?;

        if self.user_agent.trim().is_empty() {
            return Err(LocateError::config("user_agent cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(LocateError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

/// Options handed to the platform location service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask for GPS-grade accuracy
    pub enable_high_accuracy: bool,
    /// How long to wait for a fix
    pub timeout: Duration,
    /// Oldest cached fix the platform may return instead of a fresh one
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

impl PositionOptions {
    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeocoderConfig::default();
        assert_eq!(config.base_url, DEFAULT_GEOCODER_URL);
        assert!(config.user_agent.starts_with("wanderlust/"));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GeocoderConfig::default()
            .with_base_url("http://localhost:8080/")
            .with_user_agent("wanderlust-tests")
            .with_timeout(Duration::from_secs(2));

        assert_eq!(config.endpoint("search").unwrap().as_str(), "http://localhost:8080/search");
        assert_eq!(config.user_agent, "wanderlust-tests");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_validation() {
        assert!(GeocoderConfig::default().with_base_url("").validate().is_err());
        assert!(GeocoderConfig::default().with_base_url("ftp://example.com").validate().is_err());
        assert!(GeocoderConfig::default().with_user_agent(" ").validate().is_err());
        assert!(GeocoderConfig::default().with_timeout(Duration::ZERO).validate().is_err());
    }

    #[test]
    fn test_deserialize_timeout_in_seconds() {
        let config: GeocoderConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:7070", "timeout": 3}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.user_agent.starts_with("wanderlust/"));
    }

    #[test]
    fn test_position_defaults() {
        let options = PositionOptions::default();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout, Duration::from_millis(10_000));
        assert_eq!(options.maximum_age, Duration::from_millis(300_000));
    }
}
