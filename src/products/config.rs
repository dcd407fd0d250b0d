//! Configuration for the product search adapter.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://real-time-amazon-data.p.rapidapi.com/search";

/// Host header expected by the API gateway.
pub const DEFAULT_API_HOST: &str = "real-time-amazon-data.p.rapidapi.com";

/// Country used when the caller gives none.
pub const DEFAULT_COUNTRY: &str = "US";

/// Configuration for the product search adapter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductsConfig {
    /// Gateway credential. `None` means every lookup returns the fixed fallback set.
    pub api_key: Option<String>,
    /// Search endpoint URL.
    pub endpoint: String,
    /// Value of the `x-rapidapi-host` header.
    pub api_host: String,
    /// Country code used when the caller gives none.
    pub default_country: String,
    /// Whole-request timeout.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
    /// Products kept from a live response.
    pub max_results: usize,
    /// Cache of live results.
    pub cache: CacheConfig,
}

impl Default for ProductsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            default_country: DEFAULT_COUNTRY.to_string(),
            request_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
            max_results: 3,
            cache: CacheConfig::default(),
        }
    }
}

impl ProductsConfig {
    /// Set the gateway credential.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the search endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the default country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// TTL cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// Lifetime of a cached result (seconds).
    pub ttl_seconds: u64,
    /// Maximum number of cached queries.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 900,
            max_entries: 256,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProductsConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.default_country, "US");
        assert_eq!(config.max_results, 3);
    }

    #[test]
    fn test_builders_and_duration_serde() {
        let config = ProductsConfig::default()
            .with_api_key("secret")
            .with_country("FR")
            .with_timeout(Duration::from_secs(7));
        let json = serde_json::to_value(&config).expect("serializable");
        assert_eq!(json["request_timeout"], 7);

        let back: ProductsConfig = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back.api_key.as_deref(), Some("secret"));
        assert_eq!(back.default_country, "FR");
        assert_eq!(back.request_timeout, Duration::from_secs(7));
    }
}
