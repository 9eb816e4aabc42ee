/// Represents a product in the static catalog.
///
/// Products are immutable catalog records. Prices are integers in the currency's minor
/// unit (cents for `usd`), so `1200` with currency `"usd"` renders as `$12.00`.
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Products, as it appears in the `/products/{id}` route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in minor units.
    pub price: u64,
    pub currency: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Creates a new Product instance without an image.
    ///
    /// # Arguments
    /// * `id` - Unique catalog identifier
    /// * `name` - Display name
    /// * `price` - Price in minor units
    /// * `currency` - ISO currency code, case-insensitive (e.g. `"usd"`)
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: u64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            currency: currency.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The price formatted for display, e.g. `$12.00`.
    pub fn display_price(&self) -> String {
        format_price(self.price, &self.currency)
    }
}

/// Formats a minor-unit amount in the given currency.
///
/// Known currencies get their symbol; anything else is printed as `12.00 XYZ`.
pub fn format_price(minor: u64, currency: &str) -> String {
    let code = currency.to_ascii_uppercase();
    let (symbol, digits) = match code.as_str() {
        "USD" => (Some("$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        "JPY" => (Some("¥"), 0),
        _ => (None, 2),
    };

    let amount = if digits == 0 {
        minor.to_string()
    } else {
        let scale = 10u64.pow(digits);
        format!(
            "{}.{:0width$}",
            minor / scale,
            minor % scale,
            width = digits as usize
        )
    };

    match symbol {
        Some(symbol) => format!("{symbol}{amount}"),
        None => format!("{amount} {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_known_currencies() {
        assert_eq!(format_price(1200, "usd"), "$12.00");
        assert_eq!(format_price(5, "USD"), "$0.05");
        assert_eq!(format_price(199, "eur"), "€1.99");
        assert_eq!(format_price(1200, "jpy"), "¥1200");
    }

    #[test]
    fn test_format_price_unknown_currency() {
        assert_eq!(format_price(123456, "chf"), "1234.56 CHF");
    }

    #[test]
    fn test_product_deserializes_without_image() {
        let product: Product = serde_json::from_str(
            r#"{ "id": "sku-1", "name": "Mug", "price": 1200, "currency": "usd" }"#,
        )
        .unwrap();
        assert_eq!(product.id, ProductId::from("sku-1"));
        assert_eq!(product.image, None);
        assert_eq!(product.display_price(), "$12.00");
    }
}
