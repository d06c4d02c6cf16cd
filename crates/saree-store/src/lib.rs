//! Client-side state store for the Saree Mall storefront.
//!
//! Cart count, cart contents and the signed-in flag live in a small
//! key-value store. Writers go through [`SharedStore`], which notifies
//! every subscriber so the header badge and pages stay in sync.
//!
//! # Example
//!
//! ```rust
//! use saree_store::{keys, SharedStore};
//!
//! let store = SharedStore::in_memory();
//! let _sub = store.subscribe(|event| println!("{} changed", event.key));
//!
//! store.set_item(keys::CART_COUNT, "3").unwrap();
//! assert_eq!(store.cart_count(), 3);
//! ```

mod error;
pub mod keys;
mod storage;
mod store;

pub use error::StoreError;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{badge_text, SharedStore, StoreEvent, SubscriptionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::keys;
    pub use crate::{SharedStore, Storage, StoreError, StoreEvent};
}
