//! Application configuration.
//!
//! Defaults are overridden from the environment by [`AppConfig::from_env`]:
//!
//! | Variable                 | Field                      |
//! |--------------------------|----------------------------|
//! | `PANTRY_PORT`            | `server.port`              |
//! | `PANTRY_MEMORY_FILE`     | `storage.memory_file`      |
//! | `RAPIDAPI_KEY`           | `products.api_key`         |
//! | `PANTRY_COUNTRY`         | `products.default_country` |
//! | `API_BASE_URL`           | `llm.base_url`             |
//! | `MODEL_NAME_AT_ENDPOINT` | `llm.model`                |
//! | `GOOGLE_API_KEY`         | `llm.google_api_key`       |

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::ProductsConfig;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default conversation memory file, relative to the working directory.
pub const DEFAULT_MEMORY_FILE: &str = "conversation_memory.json";

/// Default Ollama model.
pub const DEFAULT_MODEL: &str = "qwen2.5:1.5b";

/// Hosted model used when Ollama is unreachable and a Google key is set.
pub const DEFAULT_HOSTED_MODEL: &str = "gemini-2.0-flash";

/// Default Ollama base URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// An environment variable could not be parsed.
    #[error("invalid value for {name}: {value}")]
    Env {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience result alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Persistence settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Conversation memory file.
    pub memory_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            memory_file: PathBuf::from(DEFAULT_MEMORY_FILE),
        }
    }
}

/// Response model settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL, without the `/api` suffix.
    pub base_url: String,
    /// Ollama completion model name.
    pub model: String,
    /// Timeout of the startup reachability probe.
    #[serde(with = "duration_millis")]
    pub probe_timeout: Duration,
    /// Temperature for generation.
    pub temperature: f64,
    /// Optional max tokens.
    pub max_tokens: Option<u64>,
    /// Gemini model name for the hosted fallback.
    pub hosted_model: String,
    /// Google API key enabling the hosted fallback.
    #[serde(default, skip_serializing)]
    pub google_api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            probe_timeout: Duration::from_secs(3),
            temperature: 0.4,
            max_tokens: None,
            hosted_model: DEFAULT_HOSTED_MODEL.to_string(),
            google_api_key: None,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server.
    pub server: ServerConfig,
    /// Conversation persistence.
    pub storage: StorageConfig,
    /// Product search adapter.
    pub products: ProductsConfig,
    /// Response model.
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = get("PANTRY_PORT") {
            config.server.port = port.trim().parse().map_err(|_| ConfigError::Env {
                name: "PANTRY_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(path) = get("PANTRY_MEMORY_FILE") {
            config.storage.memory_file = PathBuf::from(path);
        }
        if let Some(key) = get("RAPIDAPI_KEY") {
            config.products.api_key = Some(key);
        }
        if let Some(country) = get("PANTRY_COUNTRY") {
            config.products.default_country = country.trim().to_uppercase();
        }
        if let Some(url) = get("API_BASE_URL") {
            config.llm.base_url = normalize_ollama_url(&url);
        }
        if let Some(model) = get("MODEL_NAME_AT_ENDPOINT") {
            config.llm.model = model;
        }
        if let Some(key) = get("GOOGLE_API_KEY") {
            config.llm.google_api_key = Some(key);
        }

        Ok(config)
    }

    /// Set the conversation memory file.
    #[must_use]
    pub fn with_memory_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.memory_file = path.into();
        self
    }

    /// Set the Ollama model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.llm.model = model.into();
        self
    }

    /// Check for values the services cannot run with.
    ///
    /// # Errors
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.memory_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.memory_file must not be empty".to_string(),
            ));
        }

        url::Url::parse(&self.products.endpoint)?;
        if self.products.api_host.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "products.api_host must not be empty".to_string(),
            ));
        }
        if self.products.default_country.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "products.default_country must not be empty".to_string(),
            ));
        }
        if self.products.max_results == 0 {
            return Err(ConfigError::Invalid(
                "products.max_results must be > 0".to_string(),
            ));
        }

        url::Url::parse(&self.llm.base_url)?;
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".to_string()));
        }
        if self.llm.hosted_model.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "llm.hosted_model must not be empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Invalid(
                "llm.temperature must be within 0.0..=2.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Strip a trailing `/api` so the URL can be handed to the Ollama client.
fn normalize_ollama_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed.strip_suffix("/api").unwrap_or(trimmed).to_string()
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.model, "qwen2.5:1.5b");
        assert_eq!(config.storage.memory_file, PathBuf::from("conversation_memory.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PANTRY_PORT", "8080"),
            ("RAPIDAPI_KEY", "secret"),
            ("API_BASE_URL", "http://gpu-box:11434/api/"),
            ("MODEL_NAME_AT_ENDPOINT", "llama3.2"),
            ("PANTRY_COUNTRY", "de"),
            ("PANTRY_MEMORY_FILE", "/tmp/memory.json"),
            ("GOOGLE_API_KEY", "g-key"),
        ]))
        .expect("valid env");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.products.api_key.as_deref(), Some("secret"));
        assert_eq!(config.products.default_country, "DE");
        assert_eq!(config.llm.base_url, "http://gpu-box:11434");
        assert_eq!(config.llm.model, "llama3.2");
        assert_eq!(config.storage.memory_file, PathBuf::from("/tmp/memory.json"));
        assert_eq!(config.llm.google_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.llm.hosted_model, "gemini-2.0-flash");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[("RAPIDAPI_KEY", "  ")])).expect("valid env");
        assert!(config.products.api_key.is_none());
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PANTRY_PORT", "eighty")]));
        assert!(matches!(err, Err(ConfigError::Env { name: "PANTRY_PORT", .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default().with_model(" ");
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.llm.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Url(_))));

        config = AppConfig::default().with_memory_file("");
        assert!(config.validate().is_err());
    }
}
