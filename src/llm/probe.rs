//! Reachability check for an Ollama server.

use std::time::Duration;

use tracing::debug;

/// Whether an Ollama server answers `GET /api/version` within `timeout`.
///
/// Any failure, including a client build error, counts as unavailable.
pub async fn ollama_available(base_url: &str, timeout: Duration) -> bool {
    let url = format!("{}/api/version", base_url.trim_end_matches('/'));

    let client = match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(err) => {
            debug!(error = %err, "could not build probe client");
            return false;
        }
    };

    match client.get(&url).send().await {
        Ok(response) => response.status().is_success(),
        Err(err) => {
            debug!(error = %err, url, "ollama probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        assert!(!ollama_available("http://127.0.0.1:9", Duration::from_millis(500)).await);
    }

    #[tokio::test]
    async fn test_malformed_url_is_unavailable() {
        assert!(!ollama_available("not a url", Duration::from_millis(500)).await);
    }
}
