//! Order and cart total calculations.
//!
//! Totals are always derived from the lines and surcharges; nothing here is
//! stored independently of its inputs.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Subtotal at or above which the cart page ships free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::new(2000);

/// Cart page shipping fee below the threshold.
pub const STANDARD_SHIPPING_FEE: Money = Money::new(150);

/// Cash-on-delivery surcharge.
pub const COD_CHARGES: Money = Money::new(50);

/// A `{price, quantity}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub price: Money,
    pub quantity: u32,
}

impl PriceLine {
    pub fn new(price: Money, quantity: u32) -> Self {
        Self { price, quantity }
    }

    pub fn total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity as i64)
            .ok_or(CommerceError::Overflow)
    }
}

/// `Σ(price × quantity)` over the lines.
pub fn subtotal(lines: &[PriceLine]) -> Result<Money, CommerceError> {
    lines.iter().try_fold(Money::zero(), |acc, line| {
        acc.try_add(&line.total()?).ok_or(CommerceError::Overflow)
    })
}

/// Checkout totals: subtotal, delivery, COD and GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: Money,
    pub delivery_charges: Money,
    pub cod_charges: Money,
    pub gst_amount: Money,
    /// `subtotal + delivery_charges + cod_charges + gst_amount`.
    pub total: Money,
}

impl OrderTotals {
    /// Compute totals for a set of lines.
    ///
    /// An empty line list with no surcharges yields all zeros.
    ///
    /// ```
    /// use saree_commerce::cart::{OrderTotals, PriceLine};
    /// use saree_commerce::money::Money;
    ///
    /// let lines = [
    ///     PriceLine::new(Money::new(12999), 1),
    ///     PriceLine::new(Money::new(8999), 1),
    /// ];
    /// let totals = OrderTotals::compute(&lines, Money::zero(), Money::zero()).unwrap();
    /// assert_eq!(totals.subtotal, Money::new(21998));
    /// assert_eq!(totals.gst_amount, Money::new(3960));
    /// assert_eq!(totals.total, Money::new(25958));
    /// ```
    pub fn compute(
        lines: &[PriceLine],
        delivery_charges: Money,
        cod_charges: Money,
    ) -> Result<Self, CommerceError> {
        let subtotal = subtotal(lines)?;
        let gst_amount = subtotal.gst()?;
        let total = Money::try_sum([subtotal, delivery_charges, cod_charges, gst_amount].iter())
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            delivery_charges,
            cod_charges,
            gst_amount,
            total,
        })
    }
}

/// Shopping cart page summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal: Money,
    /// Promo discount on the subtotal.
    pub discount: Money,
    pub shipping: Money,
    /// 18% GST on the subtotal.
    pub tax: Money,
    /// `subtotal - discount + shipping + tax`.
    pub total: Money,
    pub promo_code: Option<String>,
}

impl CartSummary {
    /// Compute the cart page summary.
    ///
    /// Shipping is free at or above [`FREE_SHIPPING_THRESHOLD`]; GST is taken
    /// on the subtotal before the promo discount.
    pub fn compute(
        lines: &[PriceLine],
        promo: Option<(&str, u32)>,
    ) -> Result<Self, CommerceError> {
        let subtotal = subtotal(lines)?;
        let item_count: u32 = lines.iter().map(|l| l.quantity).sum();

        let discount = match promo {
            Some((_, percent)) => subtotal
                .try_percentage(percent as i64)
                .ok_or(CommerceError::Overflow)?,
            None => Money::zero(),
        };

        let shipping = if lines.is_empty() || subtotal >= FREE_SHIPPING_THRESHOLD {
            Money::zero()
        } else {
            STANDARD_SHIPPING_FEE
        };

        let tax = subtotal.gst()?;
        let total = subtotal
            .try_subtract(&discount)
            .and_then(|m| m.try_add(&shipping))
            .and_then(|m| m.try_add(&tax))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            item_count,
            subtotal,
            discount,
            shipping,
            tax,
            total,
            promo_code: promo.map(|(code, _)| code.to_string()),
        })
    }

    /// How much more to spend for free shipping, if anything.
    pub fn amount_to_free_shipping(&self) -> Option<Money> {
        if self.shipping.is_zero() {
            return None;
        }
        FREE_SHIPPING_THRESHOLD.try_subtract(&self.subtotal)
    }

    /// Savings line shown under the total.
    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(pairs: &[(i64, u32)]) -> Vec<PriceLine> {
        pairs
            .iter()
            .map(|&(price, qty)| PriceLine::new(Money::new(price), qty))
            .collect()
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let totals = OrderTotals::compute(&[], Money::zero(), Money::zero()).unwrap();
        assert_eq!(totals, OrderTotals::default());
    }

    #[test]
    fn test_order_totals_with_surcharges() {
        let totals = OrderTotals::compute(
            &lines(&[(12999, 1), (8999, 1)]),
            Money::new(99),
            COD_CHARGES,
        )
        .unwrap();
        assert_eq!(totals.subtotal, Money::new(21998));
        assert_eq!(totals.gst_amount, Money::new(3960));
        assert_eq!(totals.total, Money::new(21998 + 99 + 50 + 3960));
    }

    #[test]
    fn test_total_identity_holds() {
        for (price, qty, delivery, cod) in [
            (1, 1, 0, 0),
            (25, 3, 199, 50),
            (4200, 7, 99, 0),
            (15999, 2, 0, 50),
            (333, 9, 199, 0),
        ] {
            let totals = OrderTotals::compute(
                &lines(&[(price, qty)]),
                Money::new(delivery),
                Money::new(cod),
            )
            .unwrap();
            let expected_gst = (price * qty as i64 * 18 + 50) / 100;
            assert_eq!(totals.gst_amount, Money::new(expected_gst));
            assert_eq!(
                totals.total.rupees,
                totals.subtotal.rupees + delivery + cod + expected_gst
            );
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        let result = OrderTotals::compute(&lines(&[(i64::MAX, 2)]), Money::zero(), Money::zero());
        assert!(matches!(result, Err(CommerceError::Overflow)));
    }

    #[test]
    fn test_cart_summary_free_shipping() {
        // the seeded cart: 8500 + 2 * 2800 + 4200
        let summary =
            CartSummary::compute(&lines(&[(8500, 1), (2800, 2), (4200, 1)]), None).unwrap();
        assert_eq!(summary.item_count, 4);
        assert_eq!(summary.subtotal, Money::new(18300));
        assert_eq!(summary.shipping, Money::zero());
        assert_eq!(summary.tax, Money::new(3294));
        assert_eq!(summary.total, Money::new(21594));
        assert_eq!(summary.amount_to_free_shipping(), None);
    }

    #[test]
    fn test_cart_summary_below_threshold() {
        let summary = CartSummary::compute(&lines(&[(1500, 1)]), None).unwrap();
        assert_eq!(summary.shipping, STANDARD_SHIPPING_FEE);
        assert_eq!(summary.tax, Money::new(270));
        assert_eq!(summary.total, Money::new(1500 + 150 + 270));
        assert_eq!(summary.amount_to_free_shipping(), Some(Money::new(500)));
    }

    #[test]
    fn test_cart_summary_with_promo() {
        let summary =
            CartSummary::compute(&lines(&[(8500, 1), (2800, 2), (4200, 1)]), Some(("SAVE10", 10)))
                .unwrap();
        assert_eq!(summary.discount, Money::new(1830));
        assert_eq!(summary.total, Money::new(18300 - 1830 + 3294));
        assert_eq!(summary.promo_code.as_deref(), Some("SAVE10"));
        assert!(summary.has_discount());
    }

    #[test]
    fn test_empty_cart_summary_has_no_shipping() {
        let summary = CartSummary::compute(&[], None).unwrap();
        assert_eq!(summary.total, Money::zero());
    }
}
