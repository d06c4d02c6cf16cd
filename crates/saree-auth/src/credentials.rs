//! The demo account and form validation for sign-in and registration.

use saree_commerce::validation::{is_valid_email, is_valid_mobile};
use saree_commerce::ValidationErrors;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::password::{MIN_LOGIN_PASSWORD_LEN, MIN_REGISTER_PASSWORD_LEN};

pub const DEMO_EMAIL: &str = "customer@rgkasat.com";
pub const DEMO_PHONE: &str = "9876543210";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_OTP: &str = "123456";

/// Display name written for the demo account.
pub const DEMO_USER_NAME: &str = "Priya Sharma";

/// How the shopper identified themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Phone(String),
}

impl Identifier {
    /// Anything with an `@` is treated as an email address.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.contains('@') {
            Identifier::Email(input.to_string())
        } else {
            Identifier::Phone(input.to_string())
        }
    }

    /// Email mirrored into the store. Phone logins get a synthetic address.
    pub fn session_email(&self) -> String {
        match self {
            Identifier::Email(email) => email.clone(),
            Identifier::Phone(phone) => phone_email(phone),
        }
    }

    fn is_demo_account(&self) -> bool {
        match self {
            Identifier::Email(email) => email == DEMO_EMAIL,
            Identifier::Phone(phone) => phone == DEMO_PHONE,
        }
    }
}

/// `<phone>@phone.com`, used where only a phone number is known.
pub fn phone_email(phone: &str) -> String {
    format!("{}@phone.com", phone)
}

fn finish(errors: ValidationErrors) -> Result<(), AuthError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Validation(errors))
    }
}

/// Sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email_or_phone: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn new(email_or_phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email_or_phone: email_or_phone.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        let mut errors = ValidationErrors::new();
        let id = self.email_or_phone.trim();
        if id.is_empty() {
            errors.add("emailOrPhone", "Email or phone number is required");
        } else if id.contains('@') {
            if !is_valid_email(id) {
                errors.add("emailOrPhone", "Please enter a valid email address");
            }
        } else if !is_valid_mobile(id) {
            errors.add("emailOrPhone", "Please enter a valid 10-digit phone number");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_LOGIN_PASSWORD_LEN {
            errors.add("password", "Password must be at least 6 characters");
        }
        finish(errors)
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::parse(&self.email_or_phone)
    }

    /// Check the form against the demo account.
    pub(crate) fn check_credentials(&self) -> Result<Identifier, AuthError> {
        let identifier = self.identifier();
        if identifier.is_demo_account() && self.password == DEMO_PASSWORD {
            Ok(identifier)
        } else {
            Err(AuthError::InvalidCredentials {
                email: DEMO_EMAIL,
                phone: DEMO_PHONE,
                password: DEMO_PASSWORD,
            })
        }
    }
}

/// New-account form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
    pub subscribe_newsletter: bool,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut errors = ValidationErrors::new();

        let name = self.full_name.trim();
        if name.is_empty() {
            errors.add("fullName", "Full name is required");
        } else if name.chars().count() < 2 {
            errors.add("fullName", "Name must be at least 2 characters");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.add("email", "Please enter a valid email address");
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.add("phone", "Phone number is required");
        } else if !is_valid_mobile(phone) {
            errors.add("phone", "Please enter a valid 10-digit phone number");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_REGISTER_PASSWORD_LEN {
            errors.add("password", "Password must be at least 8 characters");
        }

        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", "Please confirm your password");
        } else if self.confirm_password != self.password {
            errors.add("confirmPassword", "Passwords do not match");
        }

        if !self.accept_terms {
            errors.add("acceptTerms", "You must accept the terms and conditions");
        }
        finish(errors)
    }
}

/// Forgot-password email check.
pub fn validate_reset_email(email: &str) -> Result<(), AuthError> {
    let mut errors = ValidationErrors::new();
    let email = email.trim();
    if email.is_empty() {
        errors.add("email", "Email address is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Please enter a valid email address");
    }
    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(err: AuthError, name: &str) -> String {
        err.field_errors()
            .and_then(|e| e.get(name))
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_login_validation() {
        let err = LoginForm::new("", "").validate().unwrap_err();
        assert_eq!(field(err, "emailOrPhone"), "Email or phone number is required");

        let err = LoginForm::new("priya@mail", "secret1").validate().unwrap_err();
        assert_eq!(field(err, "emailOrPhone"), "Please enter a valid email address");

        let err = LoginForm::new("12345", "secret1").validate().unwrap_err();
        assert_eq!(
            field(err, "emailOrPhone"),
            "Please enter a valid 10-digit phone number"
        );

        let err = LoginForm::new(DEMO_PHONE, "abc").validate().unwrap_err();
        assert_eq!(field(err, "password"), "Password must be at least 6 characters");

        assert!(LoginForm::new(DEMO_EMAIL, DEMO_PASSWORD).validate().is_ok());
    }

    #[test]
    fn test_check_credentials() {
        let id = LoginForm::new(DEMO_PHONE, DEMO_PASSWORD)
            .check_credentials()
            .unwrap();
        assert_eq!(id.session_email(), "9876543210@phone.com");

        let err = LoginForm::new(DEMO_EMAIL, "password124")
            .check_credentials()
            .unwrap_err();
        assert!(err.is_auth_failure());
        assert!(err.to_string().starts_with("Invalid credentials. Use email:"));
    }

    #[test]
    fn test_register_validation() {
        let form = RegisterForm {
            full_name: "A".into(),
            email: "new@customer.in".into(),
            phone: "5123456789".into(),
            password: "short".into(),
            confirm_password: "shorter".into(),
            accept_terms: false,
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("fullName"), Some("Name must be at least 2 characters"));
        assert_eq!(errors.get("email"), None);
        assert_eq!(
            errors.get("phone"),
            Some("Please enter a valid 10-digit phone number")
        );
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
        assert_eq!(
            errors.get("acceptTerms"),
            Some("You must accept the terms and conditions")
        );
    }

    #[test]
    fn test_reset_email() {
        let err = validate_reset_email(" ").unwrap_err();
        assert_eq!(field(err, "email"), "Email address is required");
        assert!(validate_reset_email("priya@mail.com").is_ok());
    }
}
