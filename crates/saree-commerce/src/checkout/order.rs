//! Order confirmation.

use crate::cart::{CartItem, OrderTotals};
use crate::checkout::{format_delivery_date, DeliveryOption, PaymentMethod, ShippingAddress};
use crate::ids::OrderId;
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Prefix of every order number.
pub const ORDER_ID_PREFIX: &str = "RGK";

/// `RGK` followed by the last eight digits of a millisecond timestamp.
pub fn order_id_from_millis(millis: i64) -> OrderId {
    OrderId::new(format!("{}{:08}", ORDER_ID_PREFIX, millis.rem_euclid(100_000_000)))
}

/// What the success screen shows once an order is placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub items: Vec<CartItem>,
    pub shipping_address: ShippingAddress,
    pub delivery_option: DeliveryOption,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
    pub placed_on: NaiveDate,
    pub estimated_delivery: NaiveDate,
}

impl OrderConfirmation {
    pub(crate) fn new<Tz: TimeZone>(
        placed_at: DateTime<Tz>,
        items: Vec<CartItem>,
        shipping_address: ShippingAddress,
        delivery_option: DeliveryOption,
        payment_method: PaymentMethod,
        totals: OrderTotals,
    ) -> Self {
        let placed_on = placed_at.date_naive();
        Self {
            order_id: order_id_from_millis(placed_at.timestamp_millis()),
            items,
            shipping_address,
            delivery_option,
            payment_method,
            totals,
            placed_on,
            estimated_delivery: delivery_option.estimated_delivery(placed_on),
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// `"Tuesday, 8 October 2024"`.
    pub fn estimated_delivery_label(&self) -> String {
        format!(
            "{} {}",
            format_delivery_date(self.estimated_delivery),
            self.estimated_delivery.format("%Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_format() {
        let id = order_id_from_millis(1_718_000_123_456);
        assert_eq!(id.as_str(), "RGK00123456");
        assert_eq!(id.as_str().len(), 11);

        let id = order_id_from_millis(1_718_987_654_321);
        assert_eq!(id.as_str(), "RGK87654321");
    }
}
