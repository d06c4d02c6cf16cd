//! The shopping cart.

use crate::cart::{
    clamp_quantity, CartItem, CartSummary, OrderTotals, PriceLine, PromoCode, SavedItem,
};
use crate::delay::{Latency, Timer};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use saree_store::{keys, SharedStore};
use serde::{Deserialize, Serialize};

/// A shopping cart with its saved-for-later list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Lines in the cart, one per product.
    pub items: Vec<CartItem>,
    /// Items saved for later.
    pub saved: Vec<SavedItem>,
    /// Applied promo code.
    pub promo: Option<PromoCode>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the cart.
    ///
    /// Adding a product that is already in the cart merges quantities,
    /// capped at the line's maximum. Returns the line's new quantity.
    pub fn add_item(&mut self, item: CartItem) -> Result<u32, CommerceError> {
        if item.quantity == 0 || item.quantity > item.max_quantity {
            return Err(CommerceError::InvalidQuantity {
                quantity: item.quantity as i64,
                max: item.max_quantity,
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let merged = existing.quantity.saturating_add(item.quantity);
            existing.max_quantity = existing.max_quantity.min(item.max_quantity).max(1);
            existing.quantity = clamp_quantity(merged as i64, existing.max_quantity);
            if item.size.is_some() {
                existing.size = item.size;
            }
            if item.color.is_some() {
                existing.color = item.color;
            }
            tracing::debug!(product = %existing.id, quantity = existing.quantity, "merged cart line");
            return Ok(existing.quantity);
        }

        let quantity = item.quantity;
        tracing::debug!(product = %item.id, quantity, "added cart line");
        // Saved copy is superseded once the product is back in the cart.
        self.saved.retain(|s| s.id != item.id);
        self.items.push(item);
        Ok(quantity)
    }

    /// Step a line's quantity up by one, stopping at its maximum.
    pub fn increment(&mut self, id: &ProductId) -> Result<u32, CommerceError> {
        let item = self.item_mut(id)?;
        item.quantity = clamp_quantity(item.quantity as i64 + 1, item.max_quantity);
        Ok(item.quantity)
    }

    /// Step a line's quantity down by one, stopping at 1.
    pub fn decrement(&mut self, id: &ProductId) -> Result<u32, CommerceError> {
        let item = self.item_mut(id)?;
        item.quantity = clamp_quantity(item.quantity as i64 - 1, item.max_quantity);
        Ok(item.quantity)
    }

    /// Set a line's quantity directly.
    ///
    /// Values outside `[1, max_quantity]` are rejected and leave the line
    /// unchanged.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<u32, CommerceError> {
        let item = self.item_mut(id)?;
        if quantity < 1 || quantity > item.max_quantity as i64 {
            return Err(CommerceError::InvalidQuantity {
                quantity,
                max: item.max_quantity,
            });
        }
        item.quantity = quantity as u32;
        Ok(item.quantity)
    }

    /// Remove a line from the cart.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Move a line to the saved-for-later list.
    pub fn save_for_later(&mut self, id: &ProductId) -> Result<(), CommerceError> {
        let index = self
            .items
            .iter()
            .position(|i| &i.id == id)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        let item = self.items.remove(index);
        self.saved.retain(|s| &s.id != id);
        self.saved.push(SavedItem::from(item));
        tracing::debug!(product = %id, "saved for later");
        Ok(())
    }

    /// Move a saved item back into the cart with quantity 1.
    pub fn move_to_cart(&mut self, id: &ProductId) -> Result<u32, CommerceError> {
        let index = self
            .saved
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| CommerceError::ItemNotSaved(id.to_string()))?;
        let saved = self.saved.remove(index);
        self.add_item(CartItem::from(saved))
    }

    /// Drop an item from the saved list.
    pub fn remove_saved(&mut self, id: &ProductId) -> bool {
        let len_before = self.saved.len();
        self.saved.retain(|s| &s.id != id);
        self.saved.len() < len_before
    }

    /// Empty the cart and clear the promo. Saved items are kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.promo = None;
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn price_lines(&self) -> Vec<PriceLine> {
        self.items.iter().map(CartItem::price_line).collect()
    }

    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        crate::cart::subtotal(&self.price_lines())
    }

    /// Savings against original prices across all lines.
    pub fn savings(&self) -> Money {
        self.items
            .iter()
            .filter_map(|i| {
                i.original_price
                    .try_subtract(&i.price)?
                    .try_multiply(i.quantity as i64)
            })
            .filter(|m| !m.is_negative())
            .fold(Money::zero(), |acc, m| acc + m)
    }

    /// Cart page summary including shipping and any promo.
    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        let promo = self.promo.map(|p| (p.as_str(), p.percent()));
        CartSummary::compute(&self.price_lines(), promo)
    }

    /// Checkout totals for the current lines.
    pub fn order_totals(
        &self,
        delivery_charges: Money,
        cod_charges: Money,
    ) -> Result<OrderTotals, CommerceError> {
        OrderTotals::compute(&self.price_lines(), delivery_charges, cod_charges)
    }

    /// Validate a promo code against the (simulated) server and apply it.
    pub async fn apply_promo(
        &mut self,
        input: &str,
        timer: &dyn Timer,
        latency: &Latency,
    ) -> Result<PromoCode, CommerceError> {
        timer.sleep(Latency::duration(latency.promo_check)).await;
        let code: PromoCode = input.parse().inspect_err(|_| {
            tracing::info!(input, "rejected promo code");
        })?;
        self.promo = Some(code);
        tracing::info!(code = code.as_str(), percent = code.percent(), "applied promo code");
        Ok(code)
    }

    pub fn remove_promo(&mut self) -> Option<PromoCode> {
        self.promo.take()
    }

    fn item_mut(&mut self, id: &ProductId) -> Result<&mut CartItem, CommerceError> {
        self.items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))
    }

    /// Load the cart mirrored in the store. Missing keys mean an empty cart;
    /// stored lines are clamped back into `[1, max_quantity]`.
    pub fn load(store: &SharedStore) -> Result<Self, CommerceError> {
        let mut items: Vec<CartItem> = store.get(keys::CART_ITEMS)?.unwrap_or_default();
        for item in &mut items {
            let max = item.max_quantity.max(1);
            let quantity = clamp_quantity(item.quantity as i64, max);
            if quantity != item.quantity || max != item.max_quantity {
                tracing::warn!(
                    product = %item.id,
                    quantity = item.quantity,
                    max = item.max_quantity,
                    "clamped stored cart line"
                );
            }
            item.max_quantity = max;
            item.quantity = quantity;
        }
        let saved: Vec<SavedItem> = store.get(keys::SAVED_ITEMS)?.unwrap_or_default();
        let promo = store
            .get_item(keys::PROMO_CODE)?
            .and_then(|raw| raw.parse::<PromoCode>().ok());
        Ok(Self {
            items,
            saved,
            promo,
        })
    }

    /// Mirror the cart into the store.
    ///
    /// Writes `cartItems` and `cartCount` (removing `cartItems` when the cart
    /// is empty), then the saved list and promo.
    pub fn persist(&self, store: &SharedStore) -> Result<(), CommerceError> {
        if self.items.is_empty() {
            store.remove_item(keys::CART_ITEMS)?;
        } else {
            store.set(keys::CART_ITEMS, &self.items)?;
        }
        store.set_item(keys::CART_COUNT, &self.item_count().to_string())?;

        if self.saved.is_empty() {
            store.remove_item(keys::SAVED_ITEMS)?;
        } else {
            store.set(keys::SAVED_ITEMS, &self.saved)?;
        }

        match self.promo {
            Some(code) => store.set_item(keys::PROMO_CODE, code.as_str())?,
            None => store.remove_item(keys::PROMO_CODE)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{seeded_cart, StockStatus};
    use crate::delay::NoDelay;

    fn line(id: &str, price: i64, max: u32) -> CartItem {
        CartItem::new(id, format!("Saree {}", id), Money::new(price), max)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_same_item_merges_and_caps() {
        let mut cart = Cart::new();
        cart.add_item(line("1", 8500, 5).with_quantity(3)).unwrap();
        let quantity = cart.add_item(line("1", 8500, 5).with_quantity(4)).unwrap();

        assert_eq!(quantity, 5);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_add_rejects_bad_quantity() {
        let mut cart = Cart::new();
        let mut item = line("1", 100, 5);
        item.quantity = 0;
        assert!(cart.add_item(item).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_stepper_never_leaves_range() {
        let mut cart = Cart::new();
        let id = ProductId::new("2");
        cart.add_item(line("2", 2800, 3)).unwrap();

        assert_eq!(cart.decrement(&id).unwrap(), 1);
        assert_eq!(cart.increment(&id).unwrap(), 2);
        assert_eq!(cart.increment(&id).unwrap(), 3);
        assert_eq!(cart.increment(&id).unwrap(), 3);
        for _ in 0..5 {
            cart.decrement(&id).unwrap();
        }
        assert_eq!(cart.get_item(&id).unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity_out_of_range_is_rejected() {
        let mut cart = Cart::new();
        let id = ProductId::new("3");
        cart.add_item(line("3", 4200, 7)).unwrap();

        assert!(matches!(
            cart.set_quantity(&id, 8),
            Err(CommerceError::InvalidQuantity { quantity: 8, max: 7 })
        ));
        assert!(cart.set_quantity(&id, 0).is_err());
        assert_eq!(cart.set_quantity(&id, 7).unwrap(), 7);
        assert_eq!(cart.get_item(&id).unwrap().quantity, 7);
    }

    #[test]
    fn test_unknown_line() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.increment(&ProductId::new("42")),
            Err(CommerceError::ItemNotInCart(_))
        ));
        assert!(!cart.remove_item(&ProductId::new("42")));
    }

    #[test]
    fn test_save_for_later_and_move_back() {
        let mut cart = seeded_cart();
        let id = ProductId::new("2");

        cart.save_for_later(&id).unwrap();
        assert!(cart.get_item(&id).is_none());
        assert!(cart.saved.iter().any(|s| s.id == id));
        assert_eq!(cart.item_count(), 2);

        cart.move_to_cart(&id).unwrap();
        let item = cart.get_item(&id).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.max_quantity, 10);
        assert_eq!(item.stock_status, StockStatus::LowStock);
        assert!(!cart.saved.iter().any(|s| s.id == id));
    }

    #[test]
    fn test_move_unknown_saved_item() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.move_to_cart(&ProductId::new("9")),
            Err(CommerceError::ItemNotSaved(_))
        ));
    }

    #[test]
    fn test_savings() {
        let cart = seeded_cart();
        // (12000-8500) + 2*(3500-2800) + (5500-4200)
        assert_eq!(cart.savings(), Money::new(3500 + 1400 + 1300));
    }

    #[tokio::test]
    async fn test_apply_promo() {
        let mut cart = seeded_cart();
        let code = cart
            .apply_promo("festival15", &NoDelay, &Latency::instant())
            .await
            .unwrap();
        assert_eq!(code, PromoCode::Festival15);

        let summary = cart.summary().unwrap();
        assert_eq!(summary.discount, Money::new(2745));
        assert_eq!(summary.promo_code.as_deref(), Some("FESTIVAL15"));
    }

    #[tokio::test]
    async fn test_invalid_promo_keeps_previous() {
        let mut cart = seeded_cart();
        cart.apply_promo("SAVE10", &NoDelay, &Latency::instant())
            .await
            .unwrap();
        let err = cart
            .apply_promo("NOPE", &NoDelay, &Latency::instant())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid promo code. Please try again.");
        assert_eq!(cart.promo, Some(PromoCode::Save10));
    }

    #[test]
    fn test_persist_and_load() {
        let store = SharedStore::in_memory();
        let mut cart = seeded_cart();
        cart.promo = Some(PromoCode::First20);
        cart.persist(&store).unwrap();

        assert_eq!(store.cart_count(), 4);
        let loaded = Cart::load(&store).unwrap();
        assert_eq!(loaded, cart);
    }

    #[test]
    fn test_load_clamps_stored_quantities() {
        let store = SharedStore::in_memory();
        let mut cart = seeded_cart();
        cart.items[0].quantity = 50;
        cart.items[0].max_quantity = 5;
        cart.items[1].quantity = 0;
        cart.items[1].max_quantity = 0;
        store.set(keys::CART_ITEMS, &cart.items).unwrap();

        let loaded = Cart::load(&store).unwrap();
        assert_eq!(loaded.items[0].quantity, 5);
        assert_eq!(loaded.items[1].quantity, 1);
        assert_eq!(loaded.items[1].max_quantity, 1);
        assert!(loaded
            .items
            .iter()
            .all(|i| (1..=i.max_quantity).contains(&i.quantity)));
    }

    #[test]
    fn test_persist_empty_cart_removes_items_key() {
        let store = SharedStore::in_memory();
        seeded_cart().persist(&store).unwrap();

        let mut cart = Cart::load(&store).unwrap();
        cart.clear();
        cart.persist(&store).unwrap();

        assert_eq!(store.get_item(keys::CART_ITEMS).unwrap(), None);
        assert_eq!(store.get_item(keys::CART_COUNT).unwrap().as_deref(), Some("0"));
    }
}
