//! Live product search through the RapidAPI Amazon gateway.

use tracing::{debug, warn};

use crate::products::cache::ProductCache;
use crate::products::config::ProductsConfig;
use crate::products::error::{ProductSearchError, ProductSearchResult};
use crate::products::types::{ApiSearchResponse, Product};
use crate::products::{ProductFuture, ProductSearch, fallback};

/// Product search backed by the RapidAPI gateway, with fallbacks and a TTL cache.
pub struct RapidApiSearch {
    config: ProductsConfig,
    cache: ProductCache,
    client: reqwest::Client,
}

impl RapidApiSearch {
    /// Create a search client from config.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ProductsConfig) -> ProductSearchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ProductSearchError::HttpClient(e.to_string()))?;
        let cache = ProductCache::new(config.cache.clone());

        Ok(Self {
            config,
            cache,
            client,
        })
    }

    /// Whether a credential is configured.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Query the gateway, without fallbacks.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or a body
    /// without `status: "OK"` and a product list.
    pub async fn search_live(&self, query: &str, country: &str) -> ProductSearchResult<Vec<Product>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ProductSearchError::ApiKeyRequired)?;

        let url = build_url(&self.config.endpoint, query, country)?;
        let response = self
            .client
            .get(url)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", &self.config.api_host)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProductSearchError::Status(response.status()));
        }

        let body: ApiSearchResponse = response
            .json()
            .await
            .map_err(|_| ProductSearchError::InvalidFormat)?;
        parse_response(body, self.config.max_results)
    }
}

impl ProductSearch for RapidApiSearch {
    fn search<'a>(&'a self, query: &'a str, country: Option<&'a str>) -> ProductFuture<'a> {
        Box::pin(async move {
            let country = country.unwrap_or(self.config.default_country.as_str());

            if !self.is_live() {
                warn!("product API key not configured, returning mock data");
                return fallback::unconfigured(query);
            }

            let key = ProductCache::key(country, query);
            if let Some(cached) = self.cache.get(&key) {
                debug!("Cache hit for product search: {query}");
                return cached;
            }

            match self.search_live(query, country).await {
                Ok(products) => {
                    self.cache.insert(&key, &products);
                    products
                }
                Err(err) => {
                    warn!(error = %err, query, "product search failed, returning fallback");
                    fallback::api_error(query)
                }
            }
        })
    }
}

fn build_url(endpoint: &str, query: &str, country: &str) -> ProductSearchResult<url::Url> {
    let mut url = url::Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair("query", query)
        .append_pair("page", "1")
        .append_pair("country", country)
        .append_pair("sort_by", "RELEVANCE")
        .append_pair("is_prime", "false");
    Ok(url)
}

fn parse_response(body: ApiSearchResponse, max_results: usize) -> ProductSearchResult<Vec<Product>> {
    if body.status != "OK" {
        return Err(ProductSearchError::InvalidFormat);
    }

    let products = body
        .data
        .and_then(|data| data.products)
        .ok_or(ProductSearchError::InvalidFormat)?;

    Ok(products
        .into_iter()
        .take(max_results)
        .map(Product::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> ApiSearchResponse {
        serde_json::from_value(json).expect("valid body")
    }

    fn raw(asin: &str) -> serde_json::Value {
        serde_json::json!({"asin": asin, "product_title": format!("Product {asin}")})
    }

    #[test]
    fn test_build_url_has_all_params() {
        let url = build_url(crate::products::config::DEFAULT_ENDPOINT, "organic bananas", "US")
            .expect("valid url");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "organic bananas".to_string()),
                ("page".to_string(), "1".to_string()),
                ("country".to_string(), "US".to_string()),
                ("sort_by".to_string(), "RELEVANCE".to_string()),
                ("is_prime".to_string(), "false".to_string()),
            ]
        );
        assert_eq!(url.host_str(), Some("real-time-amazon-data.p.rapidapi.com"));
    }

    #[test]
    fn test_parse_response_truncates() {
        let parsed = parse_response(
            body(serde_json::json!({
                "status": "OK",
                "data": {"total_products": 4, "products": [raw("A"), raw("B"), raw("C"), raw("D")]}
            })),
            3,
        )
        .expect("valid response");
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2].asin, "C");
    }

    #[test]
    fn test_parse_response_rejects_bad_envelopes() {
        let not_ok = body(serde_json::json!({"status": "ERROR", "data": {"products": [raw("A")]}}));
        assert!(matches!(parse_response(not_ok, 3), Err(ProductSearchError::InvalidFormat)));

        let no_products = body(serde_json::json!({"status": "OK", "data": {"total_products": 0}}));
        assert!(matches!(parse_response(no_products, 3), Err(ProductSearchError::InvalidFormat)));

        let no_data = body(serde_json::json!({"status": "OK"}));
        assert!(matches!(parse_response(no_data, 3), Err(ProductSearchError::InvalidFormat)));
    }

    #[tokio::test]
    async fn test_without_key_returns_mock_set() {
        let search = RapidApiSearch::new(ProductsConfig::default()).expect("client");
        let first = search.search("eggs", None).await;
        let second = search.search("eggs", Some("US")).await;
        assert_eq!(first, fallback::unconfigured("eggs"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_transport_failure_returns_error_fallback() {
        let config = ProductsConfig::default()
            .with_api_key("test-key")
            .with_endpoint("http://127.0.0.1:9/search")
            .with_timeout(std::time::Duration::from_secs(2));
        let search = RapidApiSearch::new(config).expect("client");

        let products = search.search("lemon", None).await;
        assert_eq!(products, fallback::api_error("lemon"));
        assert!(search.cache.is_empty());
    }
}
