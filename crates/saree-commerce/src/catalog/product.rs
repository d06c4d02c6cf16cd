//! Product types.

use crate::ids::ProductId;
use crate::money::{discount_percent, Money};
use serde::{Deserialize, Serialize};

/// A saree in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category slug (e.g., "banarasi").
    pub category: String,
    /// Selling price.
    pub price: Money,
    /// Price before markdown.
    pub original_price: Money,
    /// Primary image URL.
    pub image: String,
    pub in_stock: bool,
    pub is_new: bool,
    /// Average rating out of 5.
    pub rating: f32,
    pub review_count: u32,
    /// Short feature tags shown on the card.
    pub features: Vec<String>,
    pub description: String,
    /// Fabric filter value (e.g., "pure-silk").
    pub fabric: String,
    /// Color filter values.
    pub colors: Vec<String>,
    /// Occasion filter values.
    pub occasions: Vec<String>,
}

impl Product {
    /// Percentage off the original price.
    pub fn discount_percent(&self) -> u32 {
        discount_percent(self.original_price, self.price)
    }

    /// Amount saved against the original price.
    pub fn savings(&self) -> Money {
        self.original_price
            .try_subtract(&self.price)
            .filter(|m| !m.is_negative())
            .unwrap_or_default()
    }

    /// Case-insensitive substring match on name or category.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.category.to_lowercase().contains(&needle)
    }

    /// Link to the product detail page.
    pub fn detail_href(&self) -> String {
        format!("/product-detail?id={}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_product;

    #[test]
    fn test_search_is_case_insensitive() {
        let product = find_product(&ProductId::new("2")).unwrap();
        assert!(product.matches_search("KANJIVARAM"));
        assert!(!product.matches_search("temple"));
        assert!(product.matches_search("silk"));
    }

    #[test]
    fn test_discount_and_savings() {
        let product = find_product(&ProductId::new("1")).unwrap();
        assert_eq!(product.savings(), Money::new(4000));
        assert_eq!(product.discount_percent(), 20);
    }

    #[test]
    fn test_detail_href() {
        let product = find_product(&ProductId::new("3")).unwrap();
        assert_eq!(product.detail_href(), "/product-detail?id=3");
    }
}
