//! Language-model rendering of the final reply.
//!
//! At startup the configured Ollama server is probed once. When it does not
//! answer, a hosted Gemini model is used if a Google API key is configured,
//! and replies are rendered from a fixed template otherwise.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::LlmConfig;

pub mod probe;
pub mod prompts;
pub mod renderer;

pub use probe::ollama_available;
pub use renderer::{GeminiRenderer, OllamaRenderer, RenderError, RenderResult, ResponseRenderer, TemplateRenderer};

/// Boxed future type for renderer operations.
pub type RenderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Pick the renderer for this process: Ollama when reachable, then Gemini when a
/// Google API key is set, the template otherwise.
pub async fn select_renderer(config: &LlmConfig) -> Arc<dyn ResponseRenderer> {
    if ollama_available(&config.base_url, config.probe_timeout).await {
        match OllamaRenderer::new(config) {
            Ok(renderer) => {
                info!(model = %config.model, base_url = %config.base_url, "Using Ollama model");
                return Arc::new(renderer);
            }
            Err(err) => warn!(error = %err, "could not build Ollama client"),
        }
    } else {
        warn!(base_url = %config.base_url, "Ollama not available");
    }

    hosted_or_template(config)
}

fn hosted_or_template(config: &LlmConfig) -> Arc<dyn ResponseRenderer> {
    let Some(key) = config.google_api_key.as_deref() else {
        info!("No GOOGLE_API_KEY set, using template responses");
        return Arc::new(TemplateRenderer);
    };

    match GeminiRenderer::new(config, key) {
        Ok(renderer) => {
            info!(model = %config.hosted_model, "Using Gemini model");
            Arc::new(renderer)
        }
        Err(err) => {
            warn!(error = %err, "could not build Gemini client, using template responses");
            Arc::new(TemplateRenderer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_unreachable_server_selects_template() {
        let config = LlmConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            probe_timeout: Duration::from_millis(300),
            ..LlmConfig::default()
        };
        assert_eq!(select_renderer(&config).await.describe(), "template");
    }

    #[tokio::test]
    async fn test_unreachable_server_with_google_key_selects_gemini() {
        let config = LlmConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            probe_timeout: Duration::from_millis(300),
            google_api_key: Some("test-key".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(select_renderer(&config).await.describe(), "gemini:gemini-2.0-flash");
    }
}
