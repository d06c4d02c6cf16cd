//! Checkout flow state machine.
//!
//! The wizard is strictly linear: Shipping, Delivery, Payment, Review and
//! finally Success. Moving forward needs the current step's selection;
//! moving back is always allowed. Success is only reached by placing the
//! order from Review.

use crate::cart::{Cart, CartItem, OrderTotals};
use crate::catalog::{IMG_BANARASI, IMG_DRAPE};
use crate::checkout::{DeliveryOption, OrderConfirmation, PaymentMethod, ShippingAddress};
use crate::delay::{Latency, Timer};
use crate::error::CommerceError;
use crate::money::Money;
use saree_store::SharedStore;
use serde::{Deserialize, Serialize};

/// Where the guest gate sends shoppers who choose to sign in.
pub const SIGN_IN_REDIRECT: &str = "/user-authentication?redirect=/checkout-process";

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Shipping address.
    Shipping,
    /// Delivery speed.
    Delivery,
    /// Payment method.
    Payment,
    /// Order review before submission.
    Review,
    /// Order placed.
    Success,
}

impl CheckoutStep {
    /// Steps shown in the progress header.
    pub const VISIBLE: [CheckoutStep; 4] = [
        CheckoutStep::Shipping,
        CheckoutStep::Delivery,
        CheckoutStep::Payment,
        CheckoutStep::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Success => "success",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Delivery => "Delivery",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
            CheckoutStep::Success => "Success",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Delivery => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Review => 4,
            CheckoutStep::Success => 5,
        }
    }

    fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Shipping => Some(CheckoutStep::Delivery),
            CheckoutStep::Delivery => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Review),
            CheckoutStep::Review => Some(CheckoutStep::Success),
            CheckoutStep::Success => None,
        }
    }

    fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Shipping | CheckoutStep::Success => None,
            CheckoutStep::Delivery => Some(CheckoutStep::Shipping),
            CheckoutStep::Payment => Some(CheckoutStep::Delivery),
            CheckoutStep::Review => Some(CheckoutStep::Payment),
        }
    }
}

/// Selections gathered across the wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
    pub shipping_address: Option<ShippingAddress>,
    pub delivery_option: Option<DeliveryOption>,
    pub payment_method: Option<PaymentMethod>,
}

/// Checkout flow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    /// Current step.
    step: CheckoutStep,
    data: CheckoutData,
    items: Vec<CartItem>,
    terms_accepted: bool,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutFlow {
    /// Start a checkout for the given lines.
    ///
    /// An empty line list falls back to the demo order so the wizard always
    /// has something to show.
    pub fn new(items: Vec<CartItem>) -> Self {
        let items = if items.is_empty() { demo_items() } else { items };
        Self {
            step: CheckoutStep::Shipping,
            data: CheckoutData::default(),
            items,
            terms_accepted: false,
            confirmation: None,
        }
    }

    pub fn from_cart(cart: &Cart) -> Self {
        Self::new(cart.items.clone())
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn data(&self) -> &CheckoutData {
        &self.data
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Pick or enter the shipping address. Entered addresses are validated.
    pub fn set_shipping_address(&mut self, address: ShippingAddress) -> Result<(), CommerceError> {
        address.validate()?;
        self.data.shipping_address = Some(address);
        Ok(())
    }

    pub fn set_delivery_option(&mut self, option: DeliveryOption) {
        self.data.delivery_option = Some(option);
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CommerceError> {
        method.validate()?;
        self.data.payment_method = Some(method);
        Ok(())
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Whether the current step's required selection is set.
    pub fn can_advance(&self) -> bool {
        self.missing_for_step().is_none()
    }

    fn missing_for_step(&self) -> Option<&'static str> {
        match self.step {
            CheckoutStep::Shipping if self.data.shipping_address.is_none() => Some("shipping address"),
            CheckoutStep::Delivery if self.data.delivery_option.is_none() => Some("delivery option"),
            CheckoutStep::Payment if self.data.payment_method.is_none() => Some("payment method"),
            CheckoutStep::Review if !self.terms_accepted => Some("terms"),
            _ => None,
        }
    }

    /// Advance to the next step.
    ///
    /// Review only moves on through [`CheckoutFlow::place_order`].
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step.next() {
            Some(CheckoutStep::Success) | None => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: CheckoutStep::Success.as_str().to_string(),
                })
            }
            Some(next) => next,
        };

        if let Some(missing) = self.missing_for_step() {
            return Err(CommerceError::CheckoutIncomplete(missing.to_string()));
        }

        tracing::debug!(from = self.step.as_str(), to = next.as_str(), "checkout step");
        self.step = next;
        Ok(next)
    }

    /// Go back one step. Does nothing on the first step or after success.
    pub fn go_back(&mut self) -> CheckoutStep {
        if let Some(prev) = self.step.previous() {
            tracing::debug!(from = self.step.as_str(), to = prev.as_str(), "checkout step back");
            self.step = prev;
        }
        self.step
    }

    pub fn delivery_charges(&self) -> Money {
        self.data
            .delivery_option
            .map(|o| o.price())
            .unwrap_or_else(Money::zero)
    }

    pub fn cod_charges(&self) -> Money {
        self.data
            .payment_method
            .as_ref()
            .map(PaymentMethod::cod_charges)
            .unwrap_or_else(Money::zero)
    }

    /// Order summary totals for the current selections.
    pub fn totals(&self) -> Result<OrderTotals, CommerceError> {
        let lines: Vec<_> = self.items.iter().map(CartItem::price_line).collect();
        OrderTotals::compute(&lines, self.delivery_charges(), self.cod_charges())
    }

    /// Place the order from the Review step.
    ///
    /// Waits out the simulated processing delay, then moves to Success.
    pub async fn place_order(
        &mut self,
        timer: &dyn Timer,
        latency: &Latency,
    ) -> Result<OrderConfirmation, CommerceError> {
        if self.step != CheckoutStep::Review {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::Success.as_str().to_string(),
            });
        }
        if !self.terms_accepted {
            return Err(CommerceError::CheckoutIncomplete("terms".to_string()));
        }
        let (Some(address), Some(delivery), Some(payment)) = (
            self.data.shipping_address.clone(),
            self.data.delivery_option,
            self.data.payment_method.clone(),
        ) else {
            return Err(CommerceError::CheckoutIncomplete("checkout details".to_string()));
        };
        let totals = self.totals()?;

        timer.sleep(Latency::duration(latency.order_placement)).await;

        let confirmation = OrderConfirmation::new(
            chrono::Local::now(),
            self.items.clone(),
            address,
            delivery,
            payment,
            totals,
        );
        tracing::info!(
            order_id = %confirmation.order_id,
            total = %confirmation.totals.total,
            "order placed"
        );
        self.step = CheckoutStep::Success;
        self.confirmation = Some(confirmation.clone());
        Ok(confirmation)
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        let visible = CheckoutStep::VISIBLE.len() as u8;
        (self.step.number().min(visible) * 100) / visible
    }
}

/// Lines used when checkout is opened with nothing in the cart.
pub fn demo_items() -> Vec<CartItem> {
    vec![
        CartItem::new(1, "Banarasi Silk Saree - Royal Blue", Money::new(12999), 5)
            .with_image(IMG_BANARASI)
            .with_color("Royal Blue")
            .with_size("Free Size"),
        CartItem::new(2, "Kanjivaram Silk Saree - Maroon", Money::new(8999), 5)
            .with_image(IMG_DRAPE)
            .with_color("Maroon")
            .with_size("Free Size"),
    ]
}

/// The sign-in prompt shown to guests before the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestGate {
    /// Signed in, or already chose guest checkout.
    Open,
    /// Asking the shopper to sign in or continue as a guest.
    Prompt,
}

impl GuestGate {
    pub fn for_store(store: &SharedStore) -> Self {
        if store.is_authenticated() {
            GuestGate::Open
        } else {
            GuestGate::Prompt
        }
    }

    pub fn continue_as_guest(&mut self) {
        *self = GuestGate::Open;
    }

    pub fn sign_in_url(&self) -> &'static str {
        SIGN_IN_REDIRECT
    }

    pub fn is_open(&self) -> bool {
        matches!(self, GuestGate::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::NoDelay;
    use saree_store::keys;

    fn address() -> ShippingAddress {
        crate::checkout::saved_addresses().remove(0)
    }

    fn ready_for_review() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new(Vec::new());
        flow.set_shipping_address(address()).unwrap();
        flow.advance().unwrap();
        flow.set_delivery_option(DeliveryOption::Standard);
        flow.advance().unwrap();
        flow.set_payment_method(PaymentMethod::Cod).unwrap();
        flow.advance().unwrap();
        flow
    }

    #[test]
    fn test_checkout_creation() {
        let flow = CheckoutFlow::new(Vec::new());
        assert_eq!(flow.step(), CheckoutStep::Shipping);
        assert_eq!(flow.items().len(), 2);
        assert!(!flow.can_advance());
    }

    #[test]
    fn test_cannot_advance_without_selection() {
        let mut flow = CheckoutFlow::new(Vec::new());
        assert!(matches!(
            flow.advance(),
            Err(CommerceError::CheckoutIncomplete(ref m)) if m == "shipping address"
        ));
        assert_eq!(flow.step(), CheckoutStep::Shipping);

        flow.set_shipping_address(address()).unwrap();
        assert_eq!(flow.advance().unwrap(), CheckoutStep::Delivery);
        assert!(flow.advance().is_err());
    }

    #[test]
    fn test_invalid_address_is_not_stored() {
        let mut flow = CheckoutFlow::new(Vec::new());
        let mut bad = address();
        bad.pin_code = "40001".into();
        assert!(flow.set_shipping_address(bad).is_err());
        assert!(flow.data().shipping_address.is_none());
    }

    #[test]
    fn test_go_back_is_unconditional() {
        let mut flow = ready_for_review();
        assert_eq!(flow.step(), CheckoutStep::Review);
        assert_eq!(flow.go_back(), CheckoutStep::Payment);
        assert_eq!(flow.go_back(), CheckoutStep::Delivery);
        assert_eq!(flow.go_back(), CheckoutStep::Shipping);
        assert_eq!(flow.go_back(), CheckoutStep::Shipping);
        // selections survive going back
        assert!(flow.data().payment_method.is_some());
    }

    #[test]
    fn test_review_does_not_advance_directly() {
        let mut flow = ready_for_review();
        flow.set_terms_accepted(true);
        assert!(matches!(
            flow.advance(),
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
    }

    #[test]
    fn test_totals_include_surcharges() {
        let mut flow = ready_for_review();
        flow.set_delivery_option(DeliveryOption::Express);
        let totals = flow.totals().unwrap();
        assert_eq!(totals.subtotal, Money::new(21998));
        assert_eq!(totals.delivery_charges, Money::new(99));
        assert_eq!(totals.cod_charges, Money::new(50));
        assert_eq!(totals.total, Money::new(21998 + 99 + 50 + 3960));
    }

    #[tokio::test]
    async fn test_place_order_requires_terms() {
        let mut flow = ready_for_review();
        let err = flow
            .place_order(&NoDelay, &Latency::instant())
            .await
            .unwrap_err();
        assert!(matches!(err, CommerceError::CheckoutIncomplete(ref m) if m == "terms"));
        assert_eq!(flow.step(), CheckoutStep::Review);
    }

    #[tokio::test]
    async fn test_place_order() {
        let mut flow = ready_for_review();
        flow.set_terms_accepted(true);
        let confirmation = flow
            .place_order(&NoDelay, &Latency::instant())
            .await
            .unwrap();

        assert_eq!(flow.step(), CheckoutStep::Success);
        assert!(confirmation.order_id.as_str().starts_with("RGK"));
        assert_eq!(confirmation.order_id.as_str().len(), 11);
        assert_eq!(confirmation.totals.total, Money::new(21998 + 50 + 3960));
        assert_eq!(
            confirmation.estimated_delivery,
            DeliveryOption::Standard.estimated_delivery(confirmation.placed_on)
        );
        assert_eq!(flow.go_back(), CheckoutStep::Success);
        assert!(flow.advance().is_err());
    }

    #[tokio::test]
    async fn test_place_order_outside_review() {
        let mut flow = CheckoutFlow::new(Vec::new());
        assert!(flow.place_order(&NoDelay, &Latency::instant()).await.is_err());
    }

    #[test]
    fn test_progress() {
        let mut flow = CheckoutFlow::new(Vec::new());
        assert_eq!(flow.progress_percent(), 25);
        flow.set_shipping_address(address()).unwrap();
        flow.advance().unwrap();
        assert_eq!(flow.progress_percent(), 50);
    }

    #[test]
    fn test_guest_gate() {
        let store = SharedStore::in_memory();
        let mut gate = GuestGate::for_store(&store);
        assert_eq!(gate, GuestGate::Prompt);
        assert_eq!(gate.sign_in_url(), "/user-authentication?redirect=/checkout-process");
        gate.continue_as_guest();
        assert!(gate.is_open());

        store.set_item(keys::IS_AUTHENTICATED, "true").unwrap();
        assert!(GuestGate::for_store(&store).is_open());
    }
}
