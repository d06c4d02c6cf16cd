//! Delivery options.

use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;
use crate::money::Money;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// How fast the order ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOption {
    Standard,
    Express,
    Premium,
}

impl DeliveryOption {
    pub const ALL: [DeliveryOption; 3] = [
        DeliveryOption::Standard,
        DeliveryOption::Express,
        DeliveryOption::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOption::Standard => "standard",
            DeliveryOption::Express => "express",
            DeliveryOption::Premium => "premium",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryOption::Standard => "Standard Delivery",
            DeliveryOption::Express => "Express Delivery",
            DeliveryOption::Premium => "Premium Delivery",
        }
    }

    pub fn description(&self) -> String {
        let (min, max) = self.business_days();
        format!("Delivered within {}-{} business days", min, max)
    }

    pub fn price(&self) -> Money {
        match self {
            DeliveryOption::Standard => Money::zero(),
            DeliveryOption::Express => Money::new(99),
            DeliveryOption::Premium => Money::new(199),
        }
    }

    /// Inclusive range of days to delivery.
    pub fn business_days(&self) -> (u64, u64) {
        match self {
            DeliveryOption::Standard => (5, 7),
            DeliveryOption::Express => (2, 3),
            DeliveryOption::Premium => (1, 2),
        }
    }

    /// `"5-7"` style label.
    pub fn estimated_days(&self) -> String {
        let (min, max) = self.business_days();
        format!("{}-{}", min, max)
    }

    /// Latest expected arrival when ordering on `today`.
    pub fn estimated_delivery(&self, today: NaiveDate) -> NaiveDate {
        let (_, max) = self.business_days();
        today.checked_add_days(Days::new(max)).unwrap_or(today)
    }
}

impl FromStr for DeliveryOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeliveryOption::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::CheckoutIncomplete(format!("delivery option '{}'", s)))
    }
}

impl fmt::Display for DeliveryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// `"Saturday, 24 October"`.
pub fn format_delivery_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prices() {
        assert_eq!(DeliveryOption::Standard.price(), Money::zero());
        assert_eq!(DeliveryOption::Express.price(), Money::new(99));
        assert_eq!(DeliveryOption::Premium.price(), Money::new(199));
    }

    #[test]
    fn test_estimated_delivery_uses_upper_bound() {
        let today = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        assert_eq!(
            DeliveryOption::Standard.estimated_delivery(today),
            NaiveDate::from_ymd_opt(2024, 10, 8).unwrap()
        );
        assert_eq!(
            DeliveryOption::Premium.estimated_delivery(today),
            NaiveDate::from_ymd_opt(2024, 10, 3).unwrap()
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("Express".parse::<DeliveryOption>().unwrap(), DeliveryOption::Express);
        assert!("overnight".parse::<DeliveryOption>().is_err());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 8).unwrap();
        assert_eq!(format_delivery_date(date), "Tuesday, 8 October");
    }
}
