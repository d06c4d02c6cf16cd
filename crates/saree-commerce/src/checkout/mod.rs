//! Checkout module.
//!
//! Contains the checkout wizard, addresses, delivery, payment, and orders.

mod address;
mod delivery;
mod flow;
mod order;
mod payment;

pub use address::{saved_addresses, AddressType, ShippingAddress, INDIAN_STATES};
pub use delivery::{format_delivery_date, DeliveryOption};
pub use flow::{demo_items, CheckoutData, CheckoutFlow, CheckoutStep, GuestGate, SIGN_IN_REDIRECT};
pub use order::{order_id_from_millis, OrderConfirmation, ORDER_ID_PREFIX};
pub use payment::{
    format_card_number, format_expiry, CardDetails, PaymentKind, PaymentMethod, NET_BANKING_BANKS,
    WALLETS,
};
