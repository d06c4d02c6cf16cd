//! Account flows as the header and checkout observe them through the store.

use std::sync::{Arc, Mutex};

use saree_auth::{authenticated_redirect, AuthError, AuthService, LoginForm, RegisterForm};
use saree_commerce::checkout::GuestGate;
use saree_commerce::{Latency, NoDelay};
use saree_store::{keys, SharedStore};

fn registration() -> RegisterForm {
    RegisterForm {
        full_name: "Meera Patel".into(),
        email: "meera@example.in".into(),
        phone: "9123456780".into(),
        password: "Sarees@2024".into(),
        confirm_password: "Sarees@2024".into(),
        accept_terms: true,
        subscribe_newsletter: false,
    }
}

#[tokio::test]
async fn register_verify_then_checkout_opens() {
    let store = SharedStore::in_memory();
    let auth = AuthService::new(store.clone(), Latency::instant());
    assert_eq!(GuestGate::for_store(&store), GuestGate::Prompt);

    let challenge = auth.register(&registration(), &NoDelay).await.unwrap();
    assert_eq!(challenge.phone(), "9123456780");
    assert!(!store.is_authenticated());

    let err = auth.verify_otp(&challenge, "000000", &NoDelay).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid OTP. Use: 123456");

    let session = auth.verify_otp(&challenge, "123456", &NoDelay).await.unwrap();
    assert_eq!(session.email, "9123456780@phone.com");
    assert_eq!(session.name, "New Customer");
    assert_eq!(GuestGate::for_store(&store), GuestGate::Open);
    assert_eq!(
        authenticated_redirect(&store, Some("/checkout-process")).as_deref(),
        Some("/checkout-process")
    );
}

#[tokio::test]
async fn header_sees_login_and_logout() {
    let store = SharedStore::in_memory();
    let flags = Arc::new(Mutex::new(Vec::new()));
    let seen = flags.clone();
    store.subscribe(move |event| {
        if event.key == keys::IS_AUTHENTICATED {
            seen.lock().unwrap().push(event.value.clone());
        }
    });

    let auth = AuthService::new(store.clone(), Latency::instant());
    auth.login(&LoginForm::new("customer@rgkasat.com", "password123"), &NoDelay)
        .await
        .unwrap();
    assert_eq!(store.user_name().as_deref(), Some("Priya Sharma"));

    auth.logout().unwrap();
    assert!(auth.current_session().is_none());
    for key in keys::SESSION_KEYS {
        assert_eq!(store.get_item(key).unwrap(), None);
    }
    assert_eq!(*flags.lock().unwrap(), vec![Some("true".to_string()), None]);
}

#[tokio::test]
async fn invalid_registration_does_not_send_otp() {
    let auth = AuthService::new(SharedStore::in_memory(), Latency::instant());
    let mut form = registration();
    form.accept_terms = false;
    match auth.register(&form, &NoDelay).await {
        Err(AuthError::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get("acceptTerms"),
                Some("You must accept the terms and conditions")
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}
