//! Commerce error types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Item not in the saved-for-later list.
    #[error("Item not saved for later: {0}")]
    ItemNotSaved(String),

    /// Quantity outside `[1, max]`.
    #[error("Invalid quantity {quantity}: must be between 1 and {max}")]
    InvalidQuantity { quantity: i64, max: u32 },

    /// Cart has nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// A size must be picked before adding to cart.
    #[error("Please select a size")]
    SizeRequired,

    /// Size option exists but is not available.
    #[error("Size unavailable: {0}")]
    SizeUnavailable(String),

    /// Product is out of stock.
    #[error("Out of stock: {0}")]
    OutOfStock(String),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Unknown promo code.
    #[error("Invalid promo code. Please try again.")]
    InvalidPromoCode(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// One or more form fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] saree_store::StoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Field errors, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CommerceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<ValidationErrors> for CommerceError {
    fn from(errors: ValidationErrors) -> Self {
        CommerceError::Validation(errors)
    }
}

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field. The first message for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Message for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise the errors as a [`CommerceError`].
    pub fn into_result(self) -> Result<(), CommerceError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("phone", "Phone number is required");
        errors.add("phone", "Please enter a valid Indian phone number");
        assert_eq!(errors.get("phone"), Some("Phone number is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("city", "City is required");
        let err = errors.into_result().unwrap_err();
        assert_eq!(
            err.field_errors().and_then(|e| e.get("city")),
            Some("City is required")
        );
    }

    #[test]
    fn test_promo_error_message() {
        let err = CommerceError::InvalidPromoCode("BOGUS".into());
        assert_eq!(err.to_string(), "Invalid promo code. Please try again.");
    }
}
