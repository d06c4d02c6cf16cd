//! Product detail page data.

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Stock count at or below which the page shows "Only N left".
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// A gallery image with caption tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub url: String,
    pub tags: Vec<String>,
}

/// A size option on the detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeOption {
    pub value: String,
    pub label: String,
    pub available: bool,
}

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_name: String,
    pub rating: u8,
    pub date: String,
    pub verified: bool,
    pub comment: String,
    pub helpful: u32,
}

/// Everything the product detail page shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// The catalog record this page describes.
    pub product: Product,
    pub brand: String,
    pub images: Vec<ProductImage>,
    pub sizes: Vec<SizeOption>,
    pub stock_count: u32,
    /// Per-order cap before stock is considered.
    pub max_quantity: u32,
    pub cultural_significance: Option<String>,
    pub occasions: Vec<String>,
    /// Ordered `(label, value)` pairs.
    pub specifications: Vec<(String, String)>,
    pub care_instructions: Vec<String>,
    pub reviews: Vec<Review>,
}

impl ProductDetail {
    /// Largest quantity the stepper allows: the order cap, limited by stock.
    pub fn max_orderable(&self) -> u32 {
        if !self.product.in_stock {
            return 0;
        }
        self.max_quantity.min(self.stock_count)
    }

    /// "Only N left" banner text when stock is low.
    pub fn stock_message(&self) -> Option<String> {
        if !self.product.in_stock || self.stock_count == 0 {
            return Some("Out of stock".to_string());
        }
        if self.stock_count <= LOW_STOCK_THRESHOLD {
            Some(format!("Only {} left in stock", self.stock_count))
        } else {
            None
        }
    }

    /// Resolve the shopper's size pick, which is required before adding to
    /// cart or buying.
    pub fn select_size(&self, value: Option<&str>) -> Result<&SizeOption, CommerceError> {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(CommerceError::SizeRequired)?;
        let size = self
            .sizes
            .iter()
            .find(|s| s.value == value)
            .ok_or_else(|| CommerceError::SizeUnavailable(value.to_string()))?;
        if !size.available {
            return Err(CommerceError::SizeUnavailable(size.label.clone()));
        }
        Ok(size)
    }

    /// Average of the listed reviews, or the catalog rating if there are none.
    pub fn average_rating(&self) -> f32 {
        if self.reviews.is_empty() {
            return self.product.rating;
        }
        let total: u32 = self.reviews.iter().map(|r| r.rating as u32).sum();
        total as f32 / self.reviews.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product_detail;
    use crate::ids::ProductId;

    #[test]
    fn test_size_required() {
        let detail = product_detail(&ProductId::new("1")).unwrap();
        assert!(matches!(detail.select_size(None), Err(CommerceError::SizeRequired)));
        assert!(matches!(detail.select_size(Some("  ")), Err(CommerceError::SizeRequired)));
    }

    #[test]
    fn test_unavailable_size_rejected() {
        let detail = product_detail(&ProductId::new("1")).unwrap();
        assert!(matches!(
            detail.select_size(Some("plus")),
            Err(CommerceError::SizeUnavailable(_))
        ));
        assert_eq!(detail.select_size(Some("free")).unwrap().label, "Free Size");
    }

    #[test]
    fn test_low_stock_message() {
        let detail = product_detail(&ProductId::new("1")).unwrap();
        assert_eq!(detail.stock_count, 3);
        assert_eq!(detail.stock_message().as_deref(), Some("Only 3 left in stock"));
        assert_eq!(detail.max_orderable(), 3);
    }

    #[test]
    fn test_out_of_stock_detail() {
        let detail = product_detail(&ProductId::new("5")).unwrap();
        assert_eq!(detail.max_orderable(), 0);
        assert_eq!(detail.stock_message().as_deref(), Some("Out of stock"));
    }
}
