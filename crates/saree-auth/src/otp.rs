//! One-time password challenge started by registration.

use saree_commerce::validation::is_valid_otp;
use serde::{Deserialize, Serialize};

use crate::credentials::DEMO_OTP;
use crate::error::AuthError;

/// Seconds before another OTP may be requested.
pub const RESEND_COOLDOWN_SECS: u32 = 60;

/// Digits in an OTP.
pub const OTP_LENGTH: usize = 6;

/// A pending OTP verification for a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpChallenge {
    phone: String,
    seconds_left: u32,
}

impl OtpChallenge {
    /// Start a challenge. The resend cooldown starts full.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            seconds_left: RESEND_COOLDOWN_SECS,
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    /// Advance the cooldown by one second.
    pub fn tick(&mut self) {
        self.seconds_left = self.seconds_left.saturating_sub(1);
    }

    pub fn can_resend(&self) -> bool {
        self.seconds_left == 0
    }

    /// Restart the cooldown after a resend.
    pub(crate) fn restart(&mut self) -> Result<(), AuthError> {
        if !self.can_resend() {
            return Err(AuthError::ResendNotReady(self.seconds_left));
        }
        self.seconds_left = RESEND_COOLDOWN_SECS;
        Ok(())
    }

    /// Check an entered code.
    pub(crate) fn check(&self, code: &str) -> Result<(), AuthError> {
        let code = code.trim();
        if !is_valid_otp(code) {
            return Err(AuthError::IncompleteOtp);
        }
        if code != DEMO_OTP {
            return Err(AuthError::InvalidOtp(DEMO_OTP));
        }
        Ok(())
    }

    /// Countdown label, `m:ss`.
    pub fn countdown_label(&self) -> String {
        format_time(self.seconds_left)
    }
}

/// Format seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Keep only digits and cap at the OTP length, the way the input boxes do.
pub fn sanitize_otp_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(OTP_LENGTH)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(60), "1:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(5), "0:05");
        assert_eq!(format_time(0), "0:00");
    }

    #[test]
    fn test_cooldown() {
        let mut challenge = OtpChallenge::new("9123456780");
        assert!(!challenge.can_resend());
        assert!(matches!(challenge.restart(), Err(AuthError::ResendNotReady(60))));

        for _ in 0..RESEND_COOLDOWN_SECS + 5 {
            challenge.tick();
        }
        assert_eq!(challenge.seconds_left(), 0);
        assert!(challenge.restart().is_ok());
        assert_eq!(challenge.countdown_label(), "1:00");
    }

    #[test]
    fn test_check_code() {
        let challenge = OtpChallenge::new("9123456780");
        assert!(matches!(challenge.check("1234"), Err(AuthError::IncompleteOtp)));
        assert!(matches!(challenge.check("654321"), Err(AuthError::InvalidOtp(_))));
        assert!(challenge.check(" 123456 ").is_ok());
        assert_eq!(sanitize_otp_input("12a3-45678"), "123456");
    }
}
