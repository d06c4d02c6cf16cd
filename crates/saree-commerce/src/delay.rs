//! Simulated network latency.
//!
//! The storefront has no backend: promo checks, logins and order placement
//! wait a fixed delay and then succeed. The wait goes through [`Timer`] so
//! the browser, the CLI and tests can each supply their own clock.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Something that can sleep.
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// A timer that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait(?Send)]
impl Timer for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}

/// Simulated latencies, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Latency {
    pub catalog_load: u64,
    pub cart_load: u64,
    pub product_load: u64,
    pub promo_check: u64,
    pub order_placement: u64,
    pub login: u64,
    pub register: u64,
    pub otp_verify: u64,
    pub otp_resend: u64,
    pub social_login: u64,
    pub password_reset: u64,
    pub newsletter: u64,
    pub load_more: u64,
    pub checkout_redirect: u64,
}

impl Latency {
    /// All delays set to zero.
    pub fn instant() -> Self {
        Self {
            catalog_load: 0,
            cart_load: 0,
            product_load: 0,
            promo_check: 0,
            order_placement: 0,
            login: 0,
            register: 0,
            otp_verify: 0,
            otp_resend: 0,
            social_login: 0,
            password_reset: 0,
            newsletter: 0,
            load_more: 0,
            checkout_redirect: 0,
        }
    }

    pub fn duration(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            catalog_load: 1000,
            cart_load: 1000,
            product_load: 1000,
            promo_check: 1000,
            order_placement: 3000,
            login: 1500,
            register: 1000,
            otp_verify: 1500,
            otp_resend: 500,
            social_login: 2000,
            password_reset: 1500,
            newsletter: 1500,
            load_more: 1000,
            checkout_redirect: 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_latencies() {
        let latency = Latency::default();
        assert_eq!(latency.order_placement, 3000);
        assert_eq!(latency.otp_resend, 500);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let latency: Latency = serde_json::from_str(r#"{"login": 10}"#).unwrap();
        assert_eq!(latency.login, 10);
        assert_eq!(latency.promo_check, 1000);
    }

    #[tokio::test]
    async fn test_no_delay_returns() {
        NoDelay.sleep(Duration::from_secs(60)).await;
    }
}
