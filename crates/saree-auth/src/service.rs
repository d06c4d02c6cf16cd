//! Mocked account operations.
//!
//! Every operation waits its configured latency before answering, then
//! mirrors the outcome into the shared store so the header and the checkout
//! guest gate see the change.

use std::fmt;
use std::str::FromStr;

use saree_commerce::{Latency, Timer};
use saree_store::SharedStore;
use serde::{Deserialize, Serialize};

use crate::credentials::{
    phone_email, validate_reset_email, LoginForm, RegisterForm, DEMO_USER_NAME,
};
use crate::error::AuthError;
use crate::otp::OtpChallenge;
use crate::session::Session;

/// Display name given to accounts created through registration.
pub const NEW_CUSTOMER_NAME: &str = "New Customer";

/// Third-party sign-in buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Facebook,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 2] = [SocialProvider::Google, SocialProvider::Facebook];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Facebook => "facebook",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Facebook => "Facebook",
        }
    }

    /// Session handed out by the mocked provider.
    pub fn session(&self) -> Session {
        Session::new(
            format!("user@{}.com", self.as_str()),
            format!("{} User", self.display_name()),
        )
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "facebook" => Ok(SocialProvider::Facebook),
            other => Err(format!("unknown provider: {}", other)),
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Account operations over a shared store.
#[derive(Debug, Clone)]
pub struct AuthService {
    store: SharedStore,
    latency: Latency,
}

impl AuthService {
    pub fn new(store: SharedStore, latency: Latency) -> Self {
        Self { store, latency }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn current_session(&self) -> Option<Session> {
        Session::current(&self.store)
    }

    /// Sign in with the demo account.
    pub async fn login(&self, form: &LoginForm, timer: &dyn Timer) -> Result<Session, AuthError> {
        form.validate()?;
        timer.sleep(Latency::duration(self.latency.login)).await;

        let identifier = form.check_credentials().inspect_err(|_| {
            tracing::warn!("sign-in rejected");
        })?;
        let session = Session::new(identifier.session_email(), DEMO_USER_NAME);
        session.save(&self.store)?;
        tracing::info!(email = %session.email, "signed in");
        Ok(session)
    }

    /// Submit registration. The account is created once the OTP is verified.
    pub async fn register(
        &self,
        form: &RegisterForm,
        timer: &dyn Timer,
    ) -> Result<OtpChallenge, AuthError> {
        form.validate()?;
        timer.sleep(Latency::duration(self.latency.register)).await;

        let challenge = OtpChallenge::new(form.phone.trim());
        tracing::info!(phone = %challenge.phone(), "OTP sent");
        Ok(challenge)
    }

    /// Verify the OTP and sign the new customer in.
    pub async fn verify_otp(
        &self,
        challenge: &OtpChallenge,
        code: &str,
        timer: &dyn Timer,
    ) -> Result<Session, AuthError> {
        if code.trim().len() != crate::otp::OTP_LENGTH {
            return Err(AuthError::IncompleteOtp);
        }
        timer.sleep(Latency::duration(self.latency.otp_verify)).await;
        challenge.check(code)?;

        let session = Session::new(phone_email(challenge.phone()), NEW_CUSTOMER_NAME);
        session.save(&self.store)?;
        tracing::info!(phone = %challenge.phone(), "OTP verified, account created");
        Ok(session)
    }

    /// Send a fresh OTP once the cooldown has run out.
    pub async fn resend_otp(
        &self,
        challenge: &mut OtpChallenge,
        timer: &dyn Timer,
    ) -> Result<&'static str, AuthError> {
        if !challenge.can_resend() {
            return Err(AuthError::ResendNotReady(challenge.seconds_left()));
        }
        timer.sleep(Latency::duration(self.latency.otp_resend)).await;
        challenge.restart()?;
        tracing::debug!(phone = %challenge.phone(), "OTP resent");
        Ok("OTP resent successfully!")
    }

    /// Sign in through a third-party provider.
    pub async fn social_login(
        &self,
        provider: SocialProvider,
        timer: &dyn Timer,
    ) -> Result<Session, AuthError> {
        timer.sleep(Latency::duration(self.latency.social_login)).await;
        let session = provider.session();
        session.save(&self.store)?;
        tracing::info!(provider = provider.as_str(), "signed in");
        Ok(session)
    }

    /// Request a password reset link.
    pub async fn forgot_password(
        &self,
        email: &str,
        timer: &dyn Timer,
    ) -> Result<&'static str, AuthError> {
        validate_reset_email(email)?;
        timer.sleep(Latency::duration(self.latency.password_reset)).await;
        tracing::info!("password reset link sent");
        Ok("Password reset link sent successfully!")
    }

    /// Sign out, clearing every session key.
    pub fn logout(&self) -> Result<(), AuthError> {
        Session::clear(&self.store)?;
        tracing::info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{DEMO_EMAIL, DEMO_PASSWORD, DEMO_PHONE};
    use saree_commerce::NoDelay;

    fn service() -> AuthService {
        AuthService::new(SharedStore::in_memory(), Latency::instant())
    }

    #[tokio::test]
    async fn test_login_phone() {
        let auth = service();
        let session = auth
            .login(&LoginForm::new(DEMO_PHONE, DEMO_PASSWORD), &NoDelay)
            .await
            .unwrap();
        assert_eq!(session.email, "9876543210@phone.com");
        assert_eq!(session.name, "Priya Sharma");
        assert!(auth.store().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let auth = service();
        let err = auth
            .login(&LoginForm::new(DEMO_EMAIL, "wrongpass"), &NoDelay)
            .await
            .unwrap_err();
        assert!(err.is_auth_failure());
        assert!(!auth.store().is_authenticated());
    }

    #[tokio::test]
    async fn test_resend_respects_cooldown() {
        let auth = service();
        let mut challenge = OtpChallenge::new("9123456780");
        assert!(matches!(
            auth.resend_otp(&mut challenge, &NoDelay).await,
            Err(AuthError::ResendNotReady(60))
        ));
        for _ in 0..60 {
            challenge.tick();
        }
        assert_eq!(
            auth.resend_otp(&mut challenge, &NoDelay).await.unwrap(),
            "OTP resent successfully!"
        );
        assert_eq!(challenge.seconds_left(), 60);
    }

    #[tokio::test]
    async fn test_social_login() {
        let auth = service();
        let session = auth.social_login(SocialProvider::Facebook, &NoDelay).await.unwrap();
        assert_eq!(session.email, "user@facebook.com");
        assert_eq!(session.name, "Facebook User");
        assert_eq!("GOOGLE".parse::<SocialProvider>(), Ok(SocialProvider::Google));
    }

    #[tokio::test]
    async fn test_forgot_password() {
        let auth = service();
        assert!(auth.forgot_password("nope", &NoDelay).await.is_err());
        assert_eq!(
            auth.forgot_password("priya@mail.com", &NoDelay).await.unwrap(),
            "Password reset link sent successfully!"
        );
    }
}
