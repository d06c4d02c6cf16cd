//! Shipping address types.

use crate::error::{CommerceError, ValidationErrors};
use crate::ids::AddressId;
use crate::validation::{is_valid_phone, is_valid_pin};
use serde::{Deserialize, Serialize};

/// States accepted in the address form.
pub const INDIAN_STATES: [&str; 28] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    #[default]
    Home,
    Office,
    Other,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Home => "home",
            AddressType::Office => "office",
            AddressType::Other => "other",
        }
    }
}

/// A delivery address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Address ID (None for unsaved addresses).
    pub id: Option<AddressId>,
    pub full_name: String,
    pub phone_number: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub address_type: AddressType,
    pub is_default: bool,
}

impl ShippingAddress {
    /// Create a new address.
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        address_line1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        pin_code: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            address_line1: address_line1.into(),
            city: city.into(),
            state: state.into(),
            pin_code: pin_code.into(),
            ..Self::default()
        }
    }

    pub fn with_line2(mut self, line2: impl Into<String>) -> Self {
        self.address_line2 = Some(line2.into());
        self
    }

    pub fn with_type(mut self, address_type: AddressType) -> Self {
        self.address_type = address_type;
        self
    }

    /// Check every field and collect the messages the form shows.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut errors = ValidationErrors::new();

        if self.full_name.trim().is_empty() {
            errors.add("fullName", "Full name is required");
        }

        if self.phone_number.trim().is_empty() {
            errors.add("phoneNumber", "Phone number is required");
        } else if !is_valid_phone(&self.phone_number) {
            errors.add("phoneNumber", "Please enter a valid Indian phone number");
        }

        if self.address_line1.trim().is_empty() {
            errors.add("addressLine1", "Address line 1 is required");
        }

        if self.city.trim().is_empty() {
            errors.add("city", "City is required");
        }

        if self.state.is_empty() {
            errors.add("state", "State is required");
        } else if !INDIAN_STATES.contains(&self.state.as_str()) {
            errors.add("state", "Please select a valid state");
        }

        if self.pin_code.trim().is_empty() {
            errors.add("pinCode", "PIN code is required");
        } else if !is_valid_pin(&self.pin_code) {
            errors.add("pinCode", "Please enter a valid 6-digit PIN code");
        }

        errors.into_result()
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address_line1.clone()];
        if let Some(ref line2) = self.address_line2 {
            parts.push(line2.clone());
        }
        parts.push(self.city.clone());
        parts.push(format!("{} - {}", self.state, self.pin_code));
        parts.join(", ")
    }
}

/// Addresses offered to a returning shopper.
pub fn saved_addresses() -> Vec<ShippingAddress> {
    let home = ShippingAddress {
        id: Some(AddressId::from(1)),
        is_default: true,
        ..ShippingAddress::new(
            "Priya Sharma",
            "+91 98765 43210",
            "123 MG Road",
            "Mumbai",
            "Maharashtra",
            "400001",
        )
        .with_line2("Near City Mall")
    };
    let office = ShippingAddress {
        id: Some(AddressId::from(2)),
        ..ShippingAddress::new(
            "Priya Sharma",
            "+91 98765 43210",
            "Office Complex, Floor 5",
            "Mumbai",
            "Maharashtra",
            "400051",
        )
        .with_line2("Bandra Kurla Complex")
        .with_type(AddressType::Office)
    };
    vec![home, office]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ShippingAddress {
        ShippingAddress::new("Anita Rao", "9876543210", "12 Park Street", "Kolkata", "West Bengal", "700016")
    }

    #[test]
    fn test_valid_address() {
        assert!(valid().validate().is_ok());
        for address in saved_addresses() {
            assert!(address.validate().is_ok(), "{:?}", address);
        }
    }

    #[test]
    fn test_short_pin_rejected() {
        let mut address = valid();
        address.pin_code = "40001".into();
        let err = address.validate().unwrap_err();
        assert_eq!(
            err.field_errors().unwrap().get("pinCode"),
            Some("Please enter a valid 6-digit PIN code")
        );
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let err = ShippingAddress::default().validate().unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get("fullName"), Some("Full name is required"));
        assert_eq!(errors.get("state"), Some("State is required"));
    }

    #[test]
    fn test_one_line() {
        let address = &saved_addresses()[0];
        assert_eq!(
            address.one_line(),
            "123 MG Road, Near City Mall, Mumbai, Maharashtra - 400001"
        );
    }
}
