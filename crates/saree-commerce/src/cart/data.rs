//! Demo cart contents shown before anything has been persisted.

use crate::cart::{Cart, CartItem, SavedItem, StockStatus};
use crate::catalog::{IMG_BANARASI, IMG_DESIGNER, IMG_DRAPE};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A compact product card for the recently viewed and suggestion rails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSuggestion {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Money,
    pub original_price: Option<Money>,
    pub rating: f32,
    pub review_count: Option<u32>,
}

impl ProductSuggestion {
    fn new(id: u32, name: &str, image: &str, price: i64, original: Option<i64>, rating: f32) -> Self {
        Self {
            id: ProductId::from(id),
            name: name.to_string(),
            image: image.to_string(),
            price: Money::new(price),
            original_price: original.map(Money::new),
            rating,
            review_count: None,
        }
    }

    fn with_reviews(mut self, count: u32) -> Self {
        self.review_count = Some(count);
        self
    }
}

fn line(
    id: u32,
    name: &str,
    image: &str,
    (price, original): (i64, i64),
    (quantity, max): (u32, u32),
    (color, fabric): (&str, &str),
    (status, stock): (StockStatus, u32),
) -> CartItem {
    CartItem::new(id, name, Money::new(price), max)
        .with_image(image)
        .with_original_price(Money::new(original))
        .with_quantity(quantity)
        .with_size("Free Size")
        .with_color(color)
        .with_fabric(fabric)
        .with_stock(status, stock)
}

fn saved(id: u32, name: &str, image: &str, price: i64, original: i64, color: &str, status: StockStatus) -> SavedItem {
    SavedItem {
        id: ProductId::from(id),
        name: name.to_string(),
        image: image.to_string(),
        price: Money::new(price),
        original_price: Money::new(original),
        selected_size: Some("Free Size".to_string()),
        selected_color: Some(color.to_string()),
        stock_status: status,
    }
}

/// The cart a first-time visitor sees: three lines and two saved items.
pub fn seeded_cart() -> Cart {
    Cart {
        items: vec![
            line(
                1,
                "Banarasi Silk Saree with Golden Zari Work",
                IMG_BANARASI,
                (8500, 12000),
                (1, 5),
                ("Royal Blue", "Pure Silk"),
                (StockStatus::InStock, 8),
            ),
            line(
                2,
                "Handwoven Cotton Saree with Block Print",
                IMG_DRAPE,
                (2800, 3500),
                (2, 10),
                ("Emerald Green", "Cotton"),
                (StockStatus::LowStock, 3),
            ),
            line(
                3,
                "Designer Georgette Saree with Embroidery",
                IMG_DESIGNER,
                (4200, 5500),
                (1, 7),
                ("Maroon", "Georgette"),
                (StockStatus::InStock, 15),
            ),
        ],
        saved: vec![
            saved(
                4,
                "Kanjivaram Silk Saree with Temple Border",
                IMG_BANARASI,
                15000,
                18000,
                "Deep Purple",
                StockStatus::InStock,
            ),
            saved(
                5,
                "Chiffon Saree with Floral Print",
                IMG_DRAPE,
                3200,
                4000,
                "Pink",
                StockStatus::LowStock,
            ),
        ],
        promo: None,
    }
}

pub fn recently_viewed() -> Vec<ProductSuggestion> {
    vec![
        ProductSuggestion::new(6, "Tussar Silk Saree", IMG_DESIGNER, 6500, Some(8000), 4.5),
        ProductSuggestion::new(7, "Linen Saree with Zari", IMG_BANARASI, 4800, None, 4.2),
        ProductSuggestion::new(8, "Net Saree with Sequins", IMG_DRAPE, 5200, Some(6500), 4.7),
    ]
}

pub fn suggested_products() -> Vec<ProductSuggestion> {
    vec![
        ProductSuggestion::new(9, "Organza Saree with Embellishments", IMG_DESIGNER, 7200, Some(9000), 4.6)
            .with_reviews(89),
        ProductSuggestion::new(10, "Chanderi Silk Saree", IMG_BANARASI, 5800, None, 4.4)
            .with_reviews(156),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_cart_shape() {
        let cart = seeded_cart();
        assert_eq!(cart.items.len(), 3);
        assert_eq!(cart.saved.len(), 2);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.subtotal().unwrap(), Money::new(18300));
        assert!(cart.items.iter().all(|i| i.quantity <= i.max_quantity));
    }

    #[test]
    fn test_rails() {
        assert_eq!(recently_viewed().len(), 3);
        assert_eq!(suggested_products()[1].review_count, Some(156));
    }
}
