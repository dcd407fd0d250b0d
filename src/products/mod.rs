//! Product lookup adapter and the `product-search` tool.
//!
//! A lookup never fails: missing credentials, transport errors and malformed
//! responses all resolve to fixed fallback products.

use std::future::Future;
use std::pin::Pin;

pub mod cache;
pub mod config;
pub mod error;
pub mod fallback;
pub mod price;
pub mod rapidapi;
pub mod tool;
pub mod types;

pub use cache::ProductCache;
pub use config::ProductsConfig;
pub use error::{ProductSearchError, ProductSearchResult};
pub use price::{cheapest, parse_price};
pub use rapidapi::RapidApiSearch;
pub use tool::{ProductToolInput, ProductToolOutput};
pub use types::Product;

/// Boxed future returned by product lookups.
pub type ProductFuture<'a> = Pin<Box<dyn Future<Output = Vec<Product>> + Send + 'a>>;

/// Source of products for a free-text query.
pub trait ProductSearch: Send + Sync {
    /// Look up products for `query`. `None` country means the configured default.
    fn search<'a>(&'a self, query: &'a str, country: Option<&'a str>) -> ProductFuture<'a>;
}
