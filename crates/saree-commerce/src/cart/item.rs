//! Cart line and saved-item types.

use crate::cart::PriceLine;
use crate::catalog::{Product, ProductDetail};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{discount_percent, Money};
use serde::{Deserialize, Serialize};

/// Quantity cap given to items moved back from the saved list.
pub const DEFAULT_MAX_QUANTITY: u32 = 10;

/// Stock badge shown on a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    #[default]
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    /// Status for a remaining stock count.
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => StockStatus::OutOfStock,
            1..=5 => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }
}

/// Clamp a stepper value into `[1, max]`.
pub fn clamp_quantity(quantity: i64, max: u32) -> u32 {
    quantity.clamp(1, max.max(1) as i64) as u32
}

/// A line in the cart.
///
/// `quantity` always stays within `[1, max_quantity]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product being purchased.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    pub image: String,
    /// Unit price.
    pub price: Money,
    pub original_price: Money,
    pub quantity: u32,
    pub max_quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
    pub fabric: Option<String>,
    pub stock_status: StockStatus,
    pub stock_count: Option<u32>,
}

impl CartItem {
    /// Create a line with quantity 1.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money, max_quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: String::new(),
            price,
            original_price: price,
            quantity: 1,
            max_quantity: max_quantity.max(1),
            size: None,
            color: None,
            fabric: None,
            stock_status: StockStatus::InStock,
            stock_count: None,
        }
    }

    /// Build a line from a product detail page selection.
    ///
    /// Fails when no size is picked, the size is unavailable, the product is
    /// out of stock, or the quantity is outside the orderable range.
    pub fn from_detail(
        detail: &ProductDetail,
        size: Option<&str>,
        quantity: u32,
    ) -> Result<Self, CommerceError> {
        let size = detail.select_size(size)?;
        let max = detail.max_orderable();
        if max == 0 {
            return Err(CommerceError::OutOfStock(detail.product.name.clone()));
        }
        if quantity == 0 || quantity > max {
            return Err(CommerceError::InvalidQuantity {
                quantity: quantity as i64,
                max,
            });
        }

        let product = &detail.product;
        Ok(Self {
            quantity,
            size: Some(size.label.clone()),
            stock_status: StockStatus::from_count(detail.stock_count),
            stock_count: Some(detail.stock_count),
            ..Self::from_product(product, max)
        })
    }

    /// A quantity-1 line for a catalog product (quick add from a card).
    pub fn from_product(product: &Product, max_quantity: u32) -> Self {
        Self {
            image: product.image.clone(),
            original_price: product.original_price,
            color: product.colors.first().cloned(),
            fabric: product.features.first().cloned(),
            stock_status: if product.in_stock {
                StockStatus::InStock
            } else {
                StockStatus::OutOfStock
            },
            ..Self::new(product.id.clone(), product.name.clone(), product.price, max_quantity)
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = original_price;
        self
    }

    /// Set the starting quantity, clamped into range.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = clamp_quantity(quantity as i64, self.max_quantity);
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_fabric(mut self, fabric: impl Into<String>) -> Self {
        self.fabric = Some(fabric.into());
        self
    }

    pub fn with_stock(mut self, status: StockStatus, count: u32) -> Self {
        self.stock_status = status;
        self.stock_count = Some(count);
        self
    }

    /// `price × quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity as i64)
            .ok_or(CommerceError::Overflow)
    }

    pub fn price_line(&self) -> PriceLine {
        PriceLine::new(self.price, self.quantity)
    }

    pub fn discount_percent(&self) -> u32 {
        discount_percent(self.original_price, self.price)
    }

    pub fn can_increment(&self) -> bool {
        self.quantity < self.max_quantity
    }

    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }
}

/// An item parked in the saved-for-later list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Money,
    pub original_price: Money,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    pub stock_status: StockStatus,
}

impl From<CartItem> for SavedItem {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            image: item.image,
            price: item.price,
            original_price: item.original_price,
            selected_size: item.size,
            selected_color: item.color,
            stock_status: item.stock_status,
        }
    }
}

impl From<SavedItem> for CartItem {
    /// Moving back to the cart starts at quantity 1 with the default cap.
    fn from(saved: SavedItem) -> Self {
        Self {
            id: saved.id,
            name: saved.name,
            image: saved.image,
            price: saved.price,
            original_price: saved.original_price,
            quantity: 1,
            max_quantity: DEFAULT_MAX_QUANTITY,
            size: saved.selected_size,
            color: saved.selected_color,
            fabric: None,
            stock_status: saved.stock_status,
            stock_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product_detail;

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(0, 5), 1);
        assert_eq!(clamp_quantity(-3, 5), 1);
        assert_eq!(clamp_quantity(3, 5), 3);
        assert_eq!(clamp_quantity(9, 5), 5);
        assert_eq!(clamp_quantity(2, 0), 1);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new("2", "Cotton", Money::new(2800), 10).with_quantity(2);
        assert_eq!(item.line_total().unwrap(), Money::new(5600));
    }

    #[test]
    fn test_from_detail_requires_size() {
        let detail = product_detail(&ProductId::new("1")).unwrap();
        assert!(matches!(
            CartItem::from_detail(&detail, None, 1),
            Err(CommerceError::SizeRequired)
        ));
    }

    #[test]
    fn test_from_detail_respects_stock() {
        let detail = product_detail(&ProductId::new("1")).unwrap();
        let item = CartItem::from_detail(&detail, Some("free"), 2).unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.max_quantity, 3);
        assert_eq!(item.size.as_deref(), Some("Free Size"));
        assert_eq!(item.stock_status, StockStatus::LowStock);

        assert!(matches!(
            CartItem::from_detail(&detail, Some("free"), 4),
            Err(CommerceError::InvalidQuantity { quantity: 4, max: 3 })
        ));
    }

    #[test]
    fn test_saved_roundtrip_resets_quantity() {
        let item = CartItem::new("1", "Banarasi", Money::new(8500), 5).with_quantity(3);
        let saved = SavedItem::from(item);
        let back = CartItem::from(saved);
        assert_eq!(back.quantity, 1);
        assert_eq!(back.max_quantity, DEFAULT_MAX_QUANTITY);
    }

    #[test]
    fn test_stock_status_serde() {
        let json = serde_json::to_string(&StockStatus::LowStock).unwrap();
        assert_eq!(json, "\"low-stock\"");
    }
}
