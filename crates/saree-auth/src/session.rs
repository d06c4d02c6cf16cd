//! The signed-in shopper, as mirrored in the shared store.

use saree_commerce::nav::redirect_target;
use saree_store::{keys, SharedStore};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub name: String,
}

impl Session {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// Read the session from the store. `None` when the flag is unset.
    pub fn current(store: &SharedStore) -> Option<Session> {
        if !store.is_authenticated() {
            return None;
        }
        Some(Session {
            email: store.user_email().unwrap_or_default(),
            name: store.user_name().unwrap_or_default(),
        })
    }

    /// Write the session keys.
    pub fn save(&self, store: &SharedStore) -> Result<(), AuthError> {
        store.set_item(keys::IS_AUTHENTICATED, "true")?;
        store.set_item(keys::USER_EMAIL, &self.email)?;
        store.set_item(keys::USER_NAME, &self.name)?;
        tracing::debug!(email = %self.email, "session saved");
        Ok(())
    }

    /// Remove every session key.
    pub fn clear(store: &SharedStore) -> Result<(), AuthError> {
        for key in keys::SESSION_KEYS {
            store.remove_item(key)?;
        }
        Ok(())
    }
}

/// Where an already signed-in visitor to the auth page should be sent.
///
/// Returns `None` for signed-out visitors, who stay on the page.
pub fn authenticated_redirect(store: &SharedStore, redirect: Option<&str>) -> Option<String> {
    if store.is_authenticated() {
        Some(redirect_target(redirect))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_clear() {
        let store = SharedStore::in_memory();
        assert_eq!(Session::current(&store), None);

        let session = Session::new("customer@rgkasat.com", "Priya Sharma");
        session.save(&store).unwrap();
        assert_eq!(Session::current(&store), Some(session));

        Session::clear(&store).unwrap();
        assert_eq!(Session::current(&store), None);
        assert_eq!(store.user_email(), None);
    }

    #[test]
    fn test_authenticated_redirect() {
        let store = SharedStore::in_memory();
        assert_eq!(authenticated_redirect(&store, Some("/checkout-process")), None);

        Session::new("a@b.com", "A").save(&store).unwrap();
        assert_eq!(
            authenticated_redirect(&store, Some("/checkout-process")).as_deref(),
            Some("/checkout-process")
        );
        assert_eq!(authenticated_redirect(&store, None).as_deref(), Some("/homepage"));
    }
}
