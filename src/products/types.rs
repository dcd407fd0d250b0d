//! Product model and the search API's wire format.

use serde::{Deserialize, Serialize};

/// A product as surfaced to tools and the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Listing title.
    pub title: String,
    /// Display price, e.g. "$19.99".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Star rating, e.g. "4.5".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    /// Listing URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Amazon identifier.
    pub asin: String,
    /// Carries the best-seller badge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_best_seller: Option<bool>,
    /// Carries the "Amazon's Choice" badge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_amazon_choice: Option<bool>,
    /// Eligible for Prime shipping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_prime: Option<bool>,
}

/// Product as returned by the search API.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ApiProduct {
    pub asin: String,
    pub product_title: String,
    pub product_price: Option<String>,
    pub product_star_rating: Option<String>,
    pub product_url: Option<String>,
    pub product_photo: Option<String>,
    pub is_best_seller: Option<bool>,
    pub is_amazon_choice: Option<bool>,
    pub is_prime: Option<bool>,
}

impl From<ApiProduct> for Product {
    fn from(raw: ApiProduct) -> Self {
        Self {
            title: raw.product_title,
            price: raw.product_price,
            rating: raw.product_star_rating,
            url: raw.product_url,
            image: raw.product_photo,
            asin: raw.asin,
            is_best_seller: raw.is_best_seller,
            is_amazon_choice: raw.is_amazon_choice,
            is_prime: raw.is_prime,
        }
    }
}

/// Envelope of a search API response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiSearchResponse {
    pub status: String,
    pub data: Option<ApiSearchData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSearchData {
    pub products: Option<Vec<ApiProduct>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_product_maps_to_camel_case() {
        let raw: ApiProduct = serde_json::from_value(serde_json::json!({
            "asin": "B000TEST",
            "product_title": "Organic Bananas",
            "product_price": "$3.49",
            "product_star_rating": "4.6",
            "product_num_ratings": 120,
            "is_prime": true
        }))
        .expect("valid product");

        let json = serde_json::to_value(Product::from(raw)).expect("serializable");
        assert_eq!(json["title"], "Organic Bananas");
        assert_eq!(json["price"], "$3.49");
        assert_eq!(json["isPrime"], true);
        assert!(json.get("isBestSeller").is_none());
        assert!(json.get("url").is_none());
    }
}
