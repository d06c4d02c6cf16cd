//! Form value checks.

use anyhow::{bail, Result};
use saree_commerce::validation::{is_valid_email, is_valid_phone, is_valid_pin, is_valid_upi};

use super::{ValidateArgs, ValidateKind};
use crate::context::Context;

/// Run the validate command. Invalid values exit with an error.
pub async fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    let value = args.value.trim();
    let (valid, message) = check(args.kind, value);

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "value": value, "valid": valid }));
    }
    if !valid {
        bail!("{}", message);
    }
    ctx.output.success(&format!("{} is valid", value));
    Ok(())
}

/// Whether the value passes, and the message shown when it does not.
fn check(kind: ValidateKind, value: &str) -> (bool, &'static str) {
    match kind {
        ValidateKind::Pin => (is_valid_pin(value), "Please enter a valid 6-digit PIN code"),
        ValidateKind::Phone => (
            is_valid_phone(value),
            "Please enter a valid Indian phone number",
        ),
        ValidateKind::Upi => (is_valid_upi(value), "Invalid UPI ID format"),
        ValidateKind::Email => (is_valid_email(value), "Please enter a valid email address"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check() {
        assert!(check(ValidateKind::Pin, "400001").0);
        assert!(!check(ValidateKind::Pin, "012345").0);
        assert!(check(ValidateKind::Phone, "+91 98765 43210").0);
        assert!(check(ValidateKind::Upi, "priya@okicici").0);
        assert_eq!(
            check(ValidateKind::Email, "priya@mail").1,
            "Please enter a valid email address"
        );
    }
}
