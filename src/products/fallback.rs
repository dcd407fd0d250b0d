//! Fixed product sets returned when no live result is available.

use crate::products::types::Product;

/// Products returned when no credential is configured.
#[must_use]
pub fn unconfigured(query: &str) -> Vec<Product> {
    vec![
        Product {
            title: format!("Mock {query} - Premium Quality"),
            price: Some("$19.99".to_string()),
            rating: Some("4.5".to_string()),
            url: Some("https://amazon.com/mock-product".to_string()),
            image: Some("https://via.placeholder.com/300x300?text=Mock+Product".to_string()),
            asin: "B08N5WRWNW".to_string(),
            is_best_seller: Some(true),
            is_amazon_choice: Some(false),
            is_prime: Some(true),
        },
        Product {
            title: format!("{query} - Budget Option"),
            price: Some("$12.99".to_string()),
            rating: Some("4.2".to_string()),
            url: Some("https://amazon.com/mock-product-2".to_string()),
            image: Some("https://via.placeholder.com/300x300?text=Budget+Option".to_string()),
            asin: "B08N5WRWNY".to_string(),
            is_best_seller: Some(false),
            is_amazon_choice: Some(true),
            is_prime: Some(true),
        },
    ]
}

/// Product returned when the live search failed.
#[must_use]
pub fn api_error(query: &str) -> Vec<Product> {
    vec![Product {
        title: format!("{query} - API Error Fallback"),
        price: Some("$19.99".to_string()),
        rating: Some("4.5".to_string()),
        url: Some(format!("https://amazon.com/search?k={}", urlencoding::encode(query))),
        image: Some("https://via.placeholder.com/300x300?text=Product".to_string()),
        asin: "B08N5WRWNW".to_string(),
        is_best_seller: Some(false),
        is_amazon_choice: Some(false),
        is_prime: Some(true),
    }]
}
