//! Password rules and the strength meter.

use serde::{Deserialize, Serialize};

/// Minimum password length accepted at sign-in.
pub const MIN_LOGIN_PASSWORD_LEN: usize = 6;

/// Minimum password length for new accounts.
pub const MIN_REGISTER_PASSWORD_LEN: usize = 8;

/// Strength bucket shown under the registration password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Bucket a 0-5 score.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=1 => PasswordStrength::Weak,
            2..=3 => PasswordStrength::Medium,
            _ => PasswordStrength::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Medium => "Medium",
            PasswordStrength::Strong => "Strong",
        }
    }
}

/// One point each for length >= 8, a lowercase letter, an uppercase letter,
/// a digit and any other symbol.
pub fn password_score(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= MIN_REGISTER_PASSWORD_LEN,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|passed| **passed).count() as u8
}

/// Strength of a password, or `None` while the field is empty.
pub fn password_strength(password: &str) -> Option<PasswordStrength> {
    if password.is_empty() {
        return None;
    }
    Some(PasswordStrength::from_score(password_score(password)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_score() {
        assert_eq!(password_score(""), 0);
        assert_eq!(password_score("abc"), 1);
        assert_eq!(password_score("password123"), 3);
        assert_eq!(password_score("Password123"), 4);
        assert_eq!(password_score("Password@123"), 5);
    }

    #[test]
    fn test_strength_buckets() {
        assert_eq!(password_strength(""), None);
        assert_eq!(password_strength("abc"), Some(PasswordStrength::Weak));
        assert_eq!(password_strength("password123"), Some(PasswordStrength::Medium));
        assert_eq!(password_strength("Password@123"), Some(PasswordStrength::Strong));
        assert_eq!(PasswordStrength::from_score(4).label(), "Strong");
    }
}
