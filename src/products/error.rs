//! Error types for the product search adapter.
//!
//! These stay inside the adapter: every variant is turned into fallback data
//! before a lookup returns.

use thiserror::Error;

/// Failure of a live product search.
#[derive(Debug, Error)]
pub enum ProductSearchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Endpoint answered with a non-success status.
    #[error("Product API request failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// Body did not carry a usable product list.
    #[error("Invalid response format from product API")]
    InvalidFormat,

    /// Endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No credential configured.
    #[error("API key required for product search")]
    ApiKeyRequired,
}

/// Convenience result alias for live product searches.
pub type ProductSearchResult<T> = Result<T, ProductSearchError>;
