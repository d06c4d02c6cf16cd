//! Authentication errors.

use saree_commerce::ValidationErrors;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Identifier or password did not match the demo account.
    #[error("Invalid credentials. Use email: {email} or phone: {phone} with password: {password}")]
    InvalidCredentials {
        email: &'static str,
        phone: &'static str,
        password: &'static str,
    },

    /// Wrong one-time password.
    #[error("Invalid OTP. Use: {0}")]
    InvalidOtp(&'static str),

    /// Fewer than six digits entered.
    #[error("Please enter complete 6-digit OTP")]
    IncompleteOtp,

    /// Resend requested before the cooldown ran out.
    #[error("You can resend the OTP in {0} seconds")]
    ResendNotReady(u32),

    /// One or more form fields failed validation.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] saree_store::StoreError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials { .. } | AuthError::InvalidOtp(_)
        )
    }

    /// Field errors, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            AuthError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}
