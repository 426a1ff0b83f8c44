//! Notifier configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use ptp_notifier::domain::NotifierConfig;
//! use std::time::Duration;
//!
//! let config = NotifierConfig::default()
//!     .with_base_url("http://event-proxy:8080/api/ocloudNotifications/v1/")
//!     .with_event_interval(Duration::from_secs(10));
//! config.validate()?;
//! ```

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Resource address of the PTP synchronization status publication.
pub const DEFAULT_RESOURCE_ADDRESS: &str = "/cluster/node/ptp";

/// Interval between periodic status events.
pub const DEFAULT_EVENT_INTERVAL: Duration = Duration::from_secs(5);

/// Longest accepted interval between periodic status events.
pub const MAX_EVENT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Base URL of the local event proxy REST API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/ocloudNotifications/v1/";

/// Path appended to the base URL to form the return endpoint.
///
/// The notifier hosts no server of its own, so the endpoint loops back to
/// the proxy.
pub const RETURN_PATH: &str = "dummy";

/// Configuration owned by the coordinator and threaded into the emitter
/// and responder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Hierarchical resource path the publication is registered under
    pub resource_address: String,
    /// Base URL of the event proxy
    pub base_url: String,
    /// Interval between periodic emissions
    pub event_interval: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            resource_address: DEFAULT_RESOURCE_ADDRESS.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            event_interval: DEFAULT_EVENT_INTERVAL,
        }
    }
}

impl NotifierConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// # Environment Variables
    ///
    /// - `PTP_RESOURCE_ADDRESS`: Resource address (default: /cluster/node/ptp)
    /// - `PTP_BASE_URL`: Event proxy base URL
    /// - `PTP_EVENT_INTERVAL_SECS`: Emission interval in seconds (default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration through `lookup`, which resolves a variable name
    /// to its value. Same variables and defaults as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(address) = lookup("PTP_RESOURCE_ADDRESS") {
            config.resource_address = address;
        }
        if let Some(url) = lookup("PTP_BASE_URL") {
            config.base_url = url;
        }
        if let Some(secs) = lookup("PTP_EVENT_INTERVAL_SECS") {
            let parsed: u64 = secs.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: "PTP_EVENT_INTERVAL_SECS",
                value: secs.clone(),
            })?;
            config.event_interval = Duration::from_secs(parsed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.resource_address.starts_with('/') || self.resource_address.len() < 2 {
            return Err(ConfigError::InvalidResource(self.resource_address.clone()));
        }

        if !self.base_url.contains("://") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        if self.event_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        if self.event_interval > MAX_EVENT_INTERVAL {
            return Err(ConfigError::IntervalTooLarge {
                secs: self.event_interval.as_secs(),
                max_secs: MAX_EVENT_INTERVAL.as_secs(),
            });
        }

        Ok(())
    }

    /// Return endpoint registered with the publication
    pub fn return_url(&self) -> String {
        format!("{}{}", self.base_url, RETURN_PATH)
    }

    /// Topic status requests for the configured resource arrive on
    pub fn status_topic(&self) -> String {
        format!("{}/status", self.resource_address)
    }

    /// Builder-style method to set the resource address
    pub fn with_resource_address(mut self, address: impl Into<String>) -> Self {
        self.resource_address = address.into();
        self
    }

    /// Builder-style method to set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the emission interval
    pub fn with_event_interval(mut self, interval: Duration) -> Self {
        self.event_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_valid() {
        let config = NotifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.resource_address, "/cluster/node/ptp");
        assert_eq!(config.event_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_return_url() {
        let config = NotifierConfig::default().with_base_url("http://localhost:9085/api/v1/");
        assert_eq!(config.return_url(), "http://localhost:9085/api/v1/dummy");
    }

    #[test]
    fn test_status_topic() {
        assert_eq!(
            NotifierConfig::default().status_topic(),
            "/cluster/node/ptp/status"
        );
    }

    #[test]
    fn test_relative_resource_rejected() {
        let config = NotifierConfig::default().with_resource_address("cluster/node/ptp");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidResource(_))
        ));

        let config = NotifierConfig::default().with_resource_address("/");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_without_scheme_rejected() {
        let config = NotifierConfig::default().with_base_url("localhost:8080/");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = NotifierConfig::default().with_event_interval(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_oversized_interval_rejected() {
        let config = NotifierConfig::default().with_event_interval(Duration::from_secs(u64::MAX));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IntervalTooLarge { .. })
        ));

        let config = NotifierConfig::default().with_event_interval(MAX_EVENT_INTERVAL);
        assert!(config.validate().is_ok());
    }

    fn lookup(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&'static str, String> = vars
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_when_unset() {
        let config = NotifierConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, NotifierConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = NotifierConfig::from_lookup(lookup(&[
            ("PTP_RESOURCE_ADDRESS", "/cluster/node/gnss"),
            ("PTP_BASE_URL", "http://event-proxy:9043/api/v1/"),
            ("PTP_EVENT_INTERVAL_SECS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.resource_address, "/cluster/node/gnss");
        assert_eq!(config.return_url(), "http://event-proxy:9043/api/v1/dummy");
        assert_eq!(config.event_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_from_lookup_non_numeric_interval() {
        let result = NotifierConfig::from_lookup(lookup(&[("PTP_EVENT_INTERVAL_SECS", "five")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidEnv {
                var: "PTP_EVENT_INTERVAL_SECS",
                value: "five".to_string(),
            })
        );
    }

    #[test]
    fn test_from_lookup_out_of_range_interval() {
        let result = NotifierConfig::from_lookup(lookup(&[(
            "PTP_EVENT_INTERVAL_SECS",
            "18446744073709551615",
        )]));
        assert!(matches!(result, Err(ConfigError::IntervalTooLarge { .. })));

        let result = NotifierConfig::from_lookup(lookup(&[("PTP_EVENT_INTERVAL_SECS", "0")]));
        assert_eq!(result, Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_from_lookup_invalid_resource() {
        let result =
            NotifierConfig::from_lookup(lookup(&[("PTP_RESOURCE_ADDRESS", "cluster/node/ptp")]));
        assert!(matches!(result, Err(ConfigError::InvalidResource(_))));
    }
}
