//! Promo codes.

use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// The promo codes the store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromoCode {
    Save10,
    First20,
    Festival15,
}

impl PromoCode {
    pub const ALL: [PromoCode; 3] = [PromoCode::Save10, PromoCode::First20, PromoCode::Festival15];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromoCode::Save10 => "SAVE10",
            PromoCode::First20 => "FIRST20",
            PromoCode::Festival15 => "FESTIVAL15",
        }
    }

    /// Percentage off the subtotal.
    pub fn percent(&self) -> u32 {
        match self {
            PromoCode::Save10 => 10,
            PromoCode::First20 => 20,
            PromoCode::Festival15 => 15,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PromoCode::Save10 => "10% off your order",
            PromoCode::First20 => "20% off your first order",
            PromoCode::Festival15 => "15% festive discount",
        }
    }
}

impl FromStr for PromoCode {
    type Err = CommerceError;

    /// Codes are matched after trimming and upper-casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        PromoCode::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
            .ok_or(CommerceError::InvalidPromoCode(normalized))
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_input() {
        assert_eq!(" save10 ".parse::<PromoCode>().unwrap(), PromoCode::Save10);
        assert_eq!("First20".parse::<PromoCode>().unwrap(), PromoCode::First20);
        assert_eq!("FESTIVAL15".parse::<PromoCode>().unwrap().percent(), 15);
    }

    #[test]
    fn test_unknown_code() {
        let err = "WELCOME50".parse::<PromoCode>().unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPromoCode(ref code) if code == "WELCOME50"));
    }
}
