//! Payment methods and their form checks.
//!
//! Nothing here talks to a gateway. A method is "valid" when its form fields
//! pass the same checks the checkout page applies.

use crate::cart::COD_CHARGES;
use crate::error::{CommerceError, ValidationErrors};
use crate::money::Money;
use crate::validation::{is_valid_expiry, is_valid_upi};
use serde::{Deserialize, Serialize};

pub const NET_BANKING_BANKS: [&str; 10] = [
    "State Bank of India",
    "HDFC Bank",
    "ICICI Bank",
    "Axis Bank",
    "Kotak Mahindra Bank",
    "Punjab National Bank",
    "Bank of Baroda",
    "Canara Bank",
    "Union Bank of India",
    "Indian Bank",
];

pub const WALLETS: [&str; 5] = ["Paytm Wallet", "Amazon Pay", "Mobikwik", "Freecharge", "Ola Money"];

/// Minimum card number length once spaces are stripped.
const MIN_CARD_DIGITS: usize = 13;

/// The payment method picker, without any entered details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Card,
    Upi,
    NetBanking,
    Wallet,
    Cod,
}

impl PaymentKind {
    pub const ALL: [PaymentKind; 5] = [
        PaymentKind::Card,
        PaymentKind::Upi,
        PaymentKind::NetBanking,
        PaymentKind::Wallet,
        PaymentKind::Cod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Card => "card",
            PaymentKind::Upi => "upi",
            PaymentKind::NetBanking => "netbanking",
            PaymentKind::Wallet => "wallet",
            PaymentKind::Cod => "cod",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentKind::Card => "Credit/Debit Card",
            PaymentKind::Upi => "UPI Payment",
            PaymentKind::NetBanking => "Net Banking",
            PaymentKind::Wallet => "Digital Wallet",
            PaymentKind::Cod => "Cash on Delivery",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaymentKind::Card => "Visa, Mastercard, RuPay accepted",
            PaymentKind::Upi => "Pay using Google Pay, PhonePe, Paytm",
            PaymentKind::NetBanking => "All major banks supported",
            PaymentKind::Wallet => "Paytm, Amazon Pay, Mobikwik",
            PaymentKind::Cod => "Pay when you receive your order",
        }
    }

    /// Marked "Popular" in the picker.
    pub fn is_popular(&self) -> bool {
        matches!(self, PaymentKind::Card | PaymentKind::Upi)
    }
}

/// Card form fields as entered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl CardDetails {
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut errors = ValidationErrors::new();

        let digits: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.is_empty() {
            errors.add("cardNumber", "Card number is required");
        } else if digits.len() < MIN_CARD_DIGITS {
            errors.add("cardNumber", "Invalid card number");
        }

        if self.expiry_date.is_empty() {
            errors.add("expiryDate", "Expiry date is required");
        } else if !is_valid_expiry(&self.expiry_date) {
            errors.add("expiryDate", "Invalid expiry date format");
        }

        if self.cvv.is_empty() {
            errors.add("cvv", "CVV is required");
        } else if self.cvv.chars().count() < 3 {
            errors.add("cvv", "Invalid CVV");
        }

        if self.cardholder_name.trim().is_empty() {
            errors.add("cardholderName", "Cardholder name is required");
        }

        errors.into_result()
    }

    /// Last four digits for receipts.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

/// A chosen payment method with its details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentMethod {
    Card(CardDetails),
    Upi {
        #[serde(rename = "upiId")]
        upi_id: String,
    },
    #[serde(rename = "netbanking")]
    NetBanking { bank: Option<String> },
    Wallet { provider: Option<String> },
    Cod,
}

impl PaymentMethod {
    pub fn kind(&self) -> PaymentKind {
        match self {
            PaymentMethod::Card(_) => PaymentKind::Card,
            PaymentMethod::Upi { .. } => PaymentKind::Upi,
            PaymentMethod::NetBanking { .. } => PaymentKind::NetBanking,
            PaymentMethod::Wallet { .. } => PaymentKind::Wallet,
            PaymentMethod::Cod => PaymentKind::Cod,
        }
    }

    /// Surcharge added to the order for this method.
    pub fn cod_charges(&self) -> Money {
        match self {
            PaymentMethod::Cod => COD_CHARGES,
            _ => Money::zero(),
        }
    }

    /// Check the entered details.
    ///
    /// Bank and wallet may be left unpicked; a picked one must be from the
    /// offered list.
    pub fn validate(&self) -> Result<(), CommerceError> {
        match self {
            PaymentMethod::Card(card) => card.validate(),
            PaymentMethod::Upi { upi_id } => {
                let mut errors = ValidationErrors::new();
                if upi_id.trim().is_empty() {
                    errors.add("upiId", "UPI ID is required");
                } else if !is_valid_upi(upi_id) {
                    errors.add("upiId", "Invalid UPI ID format");
                }
                errors.into_result()
            }
            PaymentMethod::NetBanking { bank: Some(bank) } if !NET_BANKING_BANKS.contains(&bank.as_str()) => {
                let mut errors = ValidationErrors::new();
                errors.add("bank", "Please select a bank from the list");
                errors.into_result()
            }
            PaymentMethod::Wallet { provider: Some(provider) } if !WALLETS.contains(&provider.as_str()) => {
                let mut errors = ValidationErrors::new();
                errors.add("wallet", "Please select a wallet from the list");
                errors.into_result()
            }
            _ => Ok(()),
        }
    }

    /// Short description for the review step.
    pub fn summary(&self) -> String {
        match self {
            PaymentMethod::Card(card) => format!("Card ending in {}", card.last_four()),
            PaymentMethod::Upi { upi_id } => format!("UPI: {}", upi_id),
            PaymentMethod::NetBanking { bank: Some(bank) } => format!("Net Banking: {}", bank),
            PaymentMethod::Wallet { provider: Some(provider) } => provider.clone(),
            other => other.kind().display_name().to_string(),
        }
    }
}

/// Card number input formatter: digits only, grouped in fours, at most 16.
///
/// Fewer than four digits are returned ungrouped.
pub fn format_card_number(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return digits;
    }
    digits
        .as_bytes()
        .chunks(4)
        .take(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expiry input formatter: `MMYY` digits become `MM/YY`.
pub fn format_expiry(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= 2 {
        let year: String = digits.chars().skip(2).take(2).collect();
        format!("{}/{}", &digits[..2], year)
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardDetails {
        CardDetails {
            card_number: "4111 1111 1111 1111".into(),
            expiry_date: "12/27".into(),
            cvv: "123".into(),
            cardholder_name: "Priya Sharma".into(),
        }
    }

    #[test]
    fn test_valid_card() {
        assert!(card().validate().is_ok());
        assert_eq!(card().last_four(), "1111");
    }

    #[test]
    fn test_card_errors() {
        let bad = CardDetails {
            card_number: "4111 1111".into(),
            expiry_date: "1227".into(),
            cvv: "12".into(),
            cardholder_name: " ".into(),
        };
        let err = bad.validate().unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("cardNumber"), Some("Invalid card number"));
        assert_eq!(errors.get("expiryDate"), Some("Invalid expiry date format"));
        assert_eq!(errors.get("cvv"), Some("Invalid CVV"));
        assert_eq!(errors.get("cardholderName"), Some("Cardholder name is required"));
    }

    #[test]
    fn test_upi() {
        assert!(PaymentMethod::Upi { upi_id: "priya@okaxis".into() }.validate().is_ok());
        let err = PaymentMethod::Upi { upi_id: "priya".into() }.validate().unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("upiId"), Some("Invalid UPI ID format"));
    }

    #[test]
    fn test_bank_must_be_listed() {
        assert!(PaymentMethod::NetBanking { bank: Some("HDFC Bank".into()) }.validate().is_ok());
        assert!(PaymentMethod::NetBanking { bank: None }.validate().is_ok());
        assert!(PaymentMethod::NetBanking { bank: Some("Bank of Nowhere".into()) }.validate().is_err());
    }

    #[test]
    fn test_cod_surcharge() {
        assert_eq!(PaymentMethod::Cod.cod_charges(), Money::new(50));
        assert_eq!(PaymentMethod::Card(card()).cod_charges(), Money::zero());
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-1111-11"), "4111 1111 11");
        assert_eq!(format_card_number("41"), "41");
        assert_eq!(format_card_number("41111111111111119999"), "4111 1111 1111 1111");
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("1227"), "12/27");
        assert_eq!(format_expiry("12/275"), "12/27");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(PaymentMethod::Upi { upi_id: "a@b".into() }).unwrap();
        assert_eq!(json["method"], "upi");
        assert_eq!(json["upiId"], "a@b");
    }
}
