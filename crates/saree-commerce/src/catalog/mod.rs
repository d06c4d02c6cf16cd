//! Catalog module.
//!
//! Contains product and product-detail types and the built-in catalog.

mod data;
mod detail;
mod product;

pub use data::{find_product, product_detail, products, related_products};
pub(crate) use data::{IMG_BANARASI, IMG_DESIGNER, IMG_DRAPE};
pub use detail::{ProductDetail, ProductImage, Review, SizeOption, LOW_STOCK_THRESHOLD};
pub use product::Product;
