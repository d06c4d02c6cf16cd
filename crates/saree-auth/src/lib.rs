//! Mocked authentication for R.G Kasat Saree Mall.
//!
//! There is no backend. Sign-in accepts one demo account, registration is
//! confirmed with a fixed OTP, and the outcome is mirrored into the shared
//! store under `isAuthenticated`, `userEmail` and `userName`.
//!
//! # Example
//!
//! ```rust
//! use saree_auth::{AuthService, LoginForm};
//! use saree_commerce::Latency;
//! use saree_store::SharedStore;
//!
//! let auth = AuthService::new(SharedStore::in_memory(), Latency::instant());
//! let form = LoginForm::new("customer@rgkasat.com", "password123");
//! assert!(form.validate().is_ok());
//! assert!(auth.current_session().is_none());
//! ```

pub mod credentials;
pub mod error;
pub mod otp;
pub mod password;
pub mod service;
pub mod session;

pub use credentials::{Identifier, LoginForm, RegisterForm};
pub use error::AuthError;
pub use otp::OtpChallenge;
pub use password::{password_strength, PasswordStrength};
pub use service::{AuthService, SocialProvider};
pub use session::{authenticated_redirect, Session};
