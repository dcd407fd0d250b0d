//! Price parsing and cheapest-product selection.

use std::sync::LazyLock;

use regex::Regex;

use crate::products::types::Product;

static LEADING_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d*\.?\d+").ok());

/// Numeric value of a display price such as "$1,299.00".
///
/// Everything except digits and dots is dropped, then the leading number is
/// read, so a range like "$12.99 - $15.99" yields 12.9915.
#[must_use]
pub fn parse_price(price: &str) -> Option<f64> {
    let digits: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let number = LEADING_NUMBER.as_ref()?.find(&digits)?;
    number.as_str().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Cheapest product with a parseable price. Ties keep the earlier product.
#[must_use]
pub fn cheapest(products: &[Product]) -> Option<&Product> {
    products
        .iter()
        .filter_map(|p| p.price.as_deref().and_then(parse_price).map(|value| (value, p)))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(title: &str, price: Option<&str>) -> Product {
        Product {
            title: title.to_string(),
            price: price.map(str::to_string),
            rating: None,
            url: None,
            image: None,
            asin: title.to_string(),
            is_best_seller: None,
            is_amazon_choice: None,
            is_prime: None,
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$19.99"), Some(19.99));
        assert_eq!(parse_price("$1,299.00"), Some(1299.0));
        assert_eq!(parse_price("EUR 4"), Some(4.0));
        assert_eq!(parse_price("Check Amazon"), None);
        assert_eq!(parse_price("..."), None);
    }

    #[test]
    fn test_parse_price_reads_leading_number() {
        assert_eq!(parse_price("$12.99 - $15.99"), Some(12.9915));
        assert_eq!(parse_price("1.2.3"), Some(1.2));
        assert_eq!(parse_price("12."), Some(12.0));
        assert_eq!(parse_price(".5"), Some(0.5));
    }

    #[test]
    fn test_cheapest_ranks_range_prices() {
        let products = vec![priced("single", Some("$13.50")), priced("range", Some("$12.99 - $15.99"))];
        assert_eq!(cheapest(&products).map(|p| p.title.as_str()), Some("range"));
    }

    #[test]
    fn test_cheapest_skips_unpriced() {
        let products = vec![
            priced("a", Some("$19.99")),
            priced("b", None),
            priced("c", Some("see site")),
            priced("d", Some("$12.99")),
        ];
        assert_eq!(cheapest(&products).map(|p| p.title.as_str()), Some("d"));
    }

    #[test]
    fn test_cheapest_ties_and_empty() {
        let products = vec![priced("first", Some("$5")), priced("second", Some("$5.00"))];
        assert_eq!(cheapest(&products).map(|p| p.title.as_str()), Some("first"));
        assert!(cheapest(&[priced("x", None)]).is_none());
        assert!(cheapest(&[]).is_none());
    }
}
