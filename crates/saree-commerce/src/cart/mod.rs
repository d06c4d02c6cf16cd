//! Cart module.
//!
//! Cart lines, totals, promo codes and the persisted cart itself.

#[allow(clippy::module_inception)]
mod cart;
mod data;
mod item;
mod promo;
mod totals;

pub use cart::Cart;
pub use data::{recently_viewed, seeded_cart, suggested_products, ProductSuggestion};
pub use item::{clamp_quantity, CartItem, SavedItem, StockStatus, DEFAULT_MAX_QUANTITY};
pub use promo::PromoCode;
pub use totals::{
    subtotal, CartSummary, OrderTotals, PriceLine, COD_CHARGES, FREE_SHIPPING_THRESHOLD,
    STANDARD_SHIPPING_FEE,
};
