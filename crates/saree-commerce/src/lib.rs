//! Storefront domain types and logic for R.G Kasat Saree Mall.
//!
//! This crate holds everything the storefront computes, independent of how
//! it is rendered:
//!
//! - **Catalog**: Products, product detail, related products
//! - **Cart**: Cart lines, saved-for-later, promo codes, GST totals
//! - **Checkout**: The shipping/delivery/payment/review wizard, orders
//! - **Search**: Catalog filters, sorting, load more
//! - **Nav**: Route table, breadcrumbs and link builders
//!
//! # Example
//!
//! ```rust
//! use saree_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.add_item(CartItem::new("1", "Banarasi Silk Saree", Money::new(12999), 5)).unwrap();
//! cart.add_item(CartItem::new("2", "Kanjivaram Silk Saree", Money::new(8999), 5)).unwrap();
//!
//! let totals = cart.order_totals(Money::zero(), Money::zero()).unwrap();
//! assert_eq!(totals.gst_amount, Money::new(3960));
//! assert_eq!(totals.total.display(), "₹25,958");
//! ```

pub mod delay;
pub mod error;
pub mod ids;
pub mod money;
pub mod validation;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod home;
pub mod nav;
pub mod search;

pub use delay::{Latency, NoDelay, Timer};
pub use error::{CommerceError, ValidationErrors};
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::delay::{Latency, NoDelay, Timer};
    pub use crate::error::{CommerceError, ValidationErrors};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Product, ProductDetail, SizeOption};

    // Cart
    pub use crate::cart::{
        Cart, CartItem, CartSummary, OrderTotals, PriceLine, PromoCode, SavedItem, StockStatus,
    };

    // Checkout
    pub use crate::checkout::{
        CardDetails, CheckoutFlow, CheckoutStep, DeliveryOption, GuestGate, OrderConfirmation,
        PaymentMethod, ShippingAddress,
    };

    // Search
    pub use crate::search::{CatalogQuery, FilterGroup, Filters, SortOption};
}
