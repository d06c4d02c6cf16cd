//! Money type for rupee amounts.
//!
//! Every price in the store is a whole number of rupees, so amounts are
//! stored as integers and rounding happens only at the points where a
//! percentage is taken (GST, promo discounts).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::CommerceError;

/// GST rate applied to every order, in percent.
pub const GST_PERCENT: i64 = 18;

/// A rupee amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money {
    /// Whole rupees.
    pub rupees: i64,
}

impl Money {
    pub const ZERO: Money = Money { rupees: 0 };

    pub const fn new(rupees: i64) -> Self {
        Self { rupees }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.rupees == 0
    }

    pub fn is_negative(&self) -> bool {
        self.rupees < 0
    }

    /// Format as a display string with Indian digit grouping (e.g., "₹1,23,456").
    pub fn display(&self) -> String {
        let sign = if self.rupees < 0 { "-" } else { "" };
        format!("{}\u{20b9}{}", sign, group_indian(self.rupees.unsigned_abs()))
    }

    /// Like [`display`](Self::display), but zero renders as "FREE".
    pub fn display_or_free(&self) -> String {
        if self.is_zero() {
            "FREE".to_string()
        } else {
            self.display()
        }
    }

    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.rupees.checked_add(other.rupees).map(Money::new)
    }

    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        self.rupees.checked_sub(other.rupees).map(Money::new)
    }

    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.rupees.checked_mul(factor).map(Money::new)
    }

    /// Take a whole-number percentage, rounding half up.
    ///
    /// ```
    /// use saree_commerce::money::Money;
    /// assert_eq!(Money::new(21998).try_percentage(18), Some(Money::new(3960)));
    /// ```
    pub fn try_percentage(&self, percent: i64) -> Option<Money> {
        let scaled = self.rupees.checked_mul(percent)?;
        let rounded = if scaled >= 0 {
            scaled.checked_add(50)? / 100
        } else {
            -((scaled.checked_neg()?.checked_add(50)?) / 100)
        };
        Some(Money::new(rounded))
    }

    /// 18% GST on this amount.
    pub fn gst(&self) -> Result<Money, CommerceError> {
        self.try_percentage(GST_PERCENT).ok_or(CommerceError::Overflow)
    }

    /// Sum an iterator of Money values, failing on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturating addition, for display-only arithmetic.
    fn add(self, other: Money) -> Money {
        Money::new(self.rupees.saturating_add(other.rupees))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<i64> for Money {
    fn from(rupees: i64) -> Self {
        Money::new(rupees)
    }
}

/// Percentage off the original price, rounded half up. Zero when there is
/// no markdown.
pub fn discount_percent(original: Money, price: Money) -> u32 {
    if original.rupees <= 0 || price.rupees >= original.rupees {
        return 0;
    }
    let off = (original.rupees - price.rupees) as i128;
    let original = original.rupees as i128;
    ((off * 200 + original) / (original * 2)) as u32
}

/// Group digits the Indian way: last three, then pairs.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(0).display(), "\u{20b9}0");
        assert_eq!(Money::new(999).display(), "\u{20b9}999");
        assert_eq!(Money::new(8999).display(), "\u{20b9}8,999");
        assert_eq!(Money::new(21998).display(), "\u{20b9}21,998");
        assert_eq!(Money::new(123456).display(), "\u{20b9}1,23,456");
        assert_eq!(Money::new(12345678).display(), "\u{20b9}1,23,45,678");
        assert_eq!(Money::new(-150).display(), "-\u{20b9}150");
    }

    #[test]
    fn test_display_or_free() {
        assert_eq!(Money::zero().display_or_free(), "FREE");
        assert_eq!(Money::new(99).display_or_free(), "\u{20b9}99");
    }

    #[test]
    fn test_gst_rounds_half_up() {
        assert_eq!(Money::new(21998).gst().unwrap(), Money::new(3960));
        // 25 * 0.18 = 4.5
        assert_eq!(Money::new(25).gst().unwrap(), Money::new(5));
        // 24 * 0.18 = 4.32
        assert_eq!(Money::new(24).gst().unwrap(), Money::new(4));
        assert_eq!(Money::zero().gst().unwrap(), Money::zero());
    }

    #[test]
    fn test_gst_overflow() {
        assert!(matches!(
            Money::new(i64::MAX).gst(),
            Err(CommerceError::Overflow)
        ));
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Money::new(i64::MAX).try_add(&Money::new(1)), None);
        assert_eq!(Money::new(10).try_multiply(3), Some(Money::new(30)));
        assert_eq!(
            Money::try_sum([Money::new(12999), Money::new(8999)].iter()),
            Some(Money::new(21998))
        );
    }

    #[test]
    fn test_try_sum_empty_and_overflow() {
        assert_eq!(Money::try_sum(std::iter::empty()), Some(Money::zero()));
        assert_eq!(
            Money::try_sum([Money::new(i64::MAX), Money::new(1)].iter()),
            None
        );
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(discount_percent(Money::new(18999), Money::new(12999)), 32);
        assert_eq!(discount_percent(Money::new(12000), Money::new(8500)), 29);
        assert_eq!(discount_percent(Money::new(1000), Money::new(1000)), 0);
        assert_eq!(discount_percent(Money::zero(), Money::new(10)), 0);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::new(8500)).unwrap();
        assert_eq!(json, "8500");
    }
}
