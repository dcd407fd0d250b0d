//! `product-search` tool contract.

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductSearch};

/// Tool identifier.
pub const TOOL_ID: &str = "product-search";

/// Input of the product-search tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductToolInput {
    /// Product name or free-text query.
    pub product_query: String,
    /// Country code; the adapter default when absent.
    pub country: Option<String>,
}

impl ProductToolInput {
    /// Input searching `query` in the default country.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            product_query: query.into(),
            country: None,
        }
    }
}

/// Output of the product-search tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductToolOutput {
    /// Whether any product was found.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Products found, at most a handful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
}

/// Run the product-search tool.
pub async fn execute(search: &dyn ProductSearch, input: &ProductToolInput) -> ProductToolOutput {
    let query = input.product_query.as_str();
    if query.trim().is_empty() {
        return ProductToolOutput {
            success: false,
            message: "Product query is required".to_string(),
            products: None,
        };
    }

    let products = search.search(query, input.country.as_deref()).await;
    if products.is_empty() {
        return ProductToolOutput {
            success: false,
            message: format!("No products found for \"{query}\""),
            products: None,
        };
    }

    ProductToolOutput {
        success: true,
        message: format!("Found {} products for \"{query}\"", products.len()),
        products: Some(products),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::{ProductFuture, fallback};

    struct Fixed(Vec<Product>);

    impl ProductSearch for Fixed {
        fn search<'a>(&'a self, _query: &'a str, _country: Option<&'a str>) -> ProductFuture<'a> {
            let products = self.0.clone();
            Box::pin(async move { products })
        }
    }

    #[tokio::test]
    async fn test_found_products() {
        let search = Fixed(fallback::unconfigured("eggs"));
        let out = execute(&search, &ProductToolInput::new("eggs")).await;
        assert!(out.success);
        assert_eq!(out.message, "Found 2 products for \"eggs\"");
        assert_eq!(out.products.map(|p| p.len()), Some(2));
    }

    #[tokio::test]
    async fn test_empty_result_reports_failure() {
        let out = execute(&Fixed(Vec::new()), &ProductToolInput::new("unobtainium")).await;
        assert!(!out.success);
        assert_eq!(out.message, "No products found for \"unobtainium\"");
        assert!(out.products.is_none());
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let out = execute(&Fixed(fallback::unconfigured("x")), &ProductToolInput::new("  ")).await;
        assert!(!out.success);
        assert_eq!(out.message, "Product query is required");
    }

    struct Recording(std::sync::Mutex<Vec<String>>);

    impl ProductSearch for Recording {
        fn search<'a>(&'a self, query: &'a str, _country: Option<&'a str>) -> ProductFuture<'a> {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(query.to_string());
            }
            Box::pin(async move { fallback::unconfigured(query) })
        }
    }

    #[tokio::test]
    async fn test_query_is_passed_through_unchanged() {
        let search = Recording(std::sync::Mutex::new(Vec::new()));
        let out = execute(&search, &ProductToolInput::new(" oat milk ")).await;
        assert!(out.success);
        assert_eq!(out.message, "Found 2 products for \" oat milk \"");
        let seen = search.0.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(seen, vec![" oat milk ".to_string()]);
    }

    #[test]
    fn test_input_json_shape() {
        let input: ProductToolInput =
            serde_json::from_str(r#"{"productQuery": "oat milk", "country": "CA"}"#).expect("valid");
        assert_eq!(input.product_query, "oat milk");
        assert_eq!(input.country.as_deref(), Some("CA"));
    }
}
