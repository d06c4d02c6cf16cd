//! Field format checks shared by the checkout and account forms.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Indian phone with optional `+91`, leading `0` or `91` prefix.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+91[\-\s]?)?[0]?(91)?[6789][0-9]{9}$").expect("Invalid regex")
});

/// Bare ten-digit mobile number, used for sign-in.
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("Invalid regex"));

static PIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{5}$").expect("Invalid regex"));

static UPI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.\-_]{2,256}@[a-zA-Z]{2,64}$").expect("Invalid regex")
});

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}$").expect("Invalid regex"));

static OTP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("Invalid regex"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Address-form phone check. Spaces are ignored.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| *c != ' ').collect();
    PHONE_RE.is_match(&compact)
}

pub fn is_valid_mobile(value: &str) -> bool {
    MOBILE_RE.is_match(value)
}

/// Six-digit Indian PIN code, not starting with zero.
pub fn is_valid_pin(value: &str) -> bool {
    PIN_RE.is_match(value)
}

pub fn is_valid_upi(value: &str) -> bool {
    UPI_RE.is_match(value)
}

/// `MM/YY` card expiry shape. The month range is not checked.
pub fn is_valid_expiry(value: &str) -> bool {
    EXPIRY_RE.is_match(value)
}

pub fn is_valid_otp(value: &str) -> bool {
    OTP_RE.is_match(value)
}

/// Loose check used by the newsletter box.
pub fn is_plausible_email(value: &str) -> bool {
    value.contains('@') && value.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_codes() {
        assert!(is_valid_pin("400001"));
        assert!(!is_valid_pin("40001"));
        assert!(!is_valid_pin("040001"));
        assert!(!is_valid_pin("4000011"));
        assert!(!is_valid_pin("40000a"));
    }

    #[test]
    fn test_phone_numbers() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("+91 9876543210"));
        assert!(is_valid_phone("+91-9876543210"));
        assert!(is_valid_phone("09876543210"));
        assert!(is_valid_phone("+91 98765 43210"));
        assert!(!is_valid_phone("5876543210"));
        assert!(!is_valid_phone("98765"));
    }

    #[test]
    fn test_mobile_numbers() {
        assert!(is_valid_mobile("9876543210"));
        assert!(!is_valid_mobile("+919876543210"));
        assert!(!is_valid_mobile("1234567890"));
    }

    #[test]
    fn test_emails() {
        assert!(is_valid_email("customer@rgkasat.com"));
        assert!(!is_valid_email("customer@rgkasat"));
        assert!(!is_valid_email("customer rgkasat.com"));
        assert!(is_plausible_email("a@b.c"));
        assert!(!is_plausible_email("ab.c"));
    }

    #[test]
    fn test_upi_ids() {
        assert!(is_valid_upi("priya.sharma@okaxis"));
        assert!(is_valid_upi("98765-43210@ybl"));
        assert!(!is_valid_upi("p@ybl"));
        assert!(!is_valid_upi("priya@123"));
    }

    #[test]
    fn test_expiry_and_otp() {
        assert!(is_valid_expiry("08/27"));
        assert!(!is_valid_expiry("8/27"));
        assert!(is_valid_otp("123456"));
        assert!(!is_valid_otp("12345"));
    }
}
