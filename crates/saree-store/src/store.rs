//! Observable store over a [`Storage`] backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::{de::DeserializeOwned, Serialize};

use crate::keys;
use crate::storage::{MemoryStorage, Storage};
use crate::StoreError;

/// A change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// Key that changed.
    pub key: String,
    /// New raw value, `None` when the key was removed.
    pub value: Option<String>,
}

/// Handle returned by [`SharedStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

struct Inner {
    storage: Box<dyn Storage>,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

/// Shared, cloneable store with change notification.
///
/// Every clone points at the same backend and subscriber list, so the
/// header badge and the cart page see the same writes.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Inner>,
}

impl SharedStore {
    /// Create a store over the given backend.
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                storage: Box::new(storage),
                listeners: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Create a store backed by memory only.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Read a raw string value.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.storage.get_item(key)
    }

    /// Write a raw string value and notify subscribers.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.storage.set_item(key, value)?;
        tracing::trace!(key, "store write");
        self.notify(StoreEvent {
            key: key.to_string(),
            value: Some(value.to_string()),
        });
        Ok(())
    }

    /// Remove a key and notify subscribers.
    pub fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.inner.storage.remove_item(key)?;
        tracing::trace!(key, "store remove");
        self.notify(StoreEvent {
            key: key.to_string(),
            value: None,
        });
        Ok(())
    }

    /// Read a JSON-encoded value.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Write a value as JSON.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }

    /// List every key in the backend.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.inner.storage.keys()
    }

    /// Register a change listener.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut listeners) = self.inner.listeners.write() {
            listeners.push((id, Arc::new(listener)));
        }
        id
    }

    /// Remove a change listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Ok(mut listeners) = self.inner.listeners.write() else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() < before
    }

    fn notify(&self, event: StoreEvent) {
        // Snapshot first so listeners may read or write the store.
        let listeners: Vec<Listener> = match self.inner.listeners.read() {
            Ok(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            listener(&event);
        }
    }

    /// Total cart quantity; missing or malformed values read as zero.
    pub fn cart_count(&self) -> u32 {
        self.get_item(keys::CART_COUNT)
            .ok()
            .flatten()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Whether the session flag is set.
    pub fn is_authenticated(&self) -> bool {
        matches!(
            self.get_item(keys::IS_AUTHENTICATED).ok().flatten().as_deref(),
            Some("true")
        )
    }

    /// Display name of the signed-in shopper.
    pub fn user_name(&self) -> Option<String> {
        self.get_item(keys::USER_NAME).ok().flatten()
    }

    /// Email of the signed-in shopper.
    pub fn user_email(&self) -> Option<String> {
        self.get_item(keys::USER_EMAIL).ok().flatten()
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore").finish_non_exhaustive()
    }
}

/// Badge text for a cart count: hidden at zero, capped at `99+`.
pub fn badge_text(count: u32) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_typed_get_set() {
        let store = SharedStore::in_memory();
        store.set("savedItems", &vec![1, 2, 3]).unwrap();
        let items: Option<Vec<i32>> = store.get("savedItems").unwrap();
        assert_eq!(items, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = SharedStore::in_memory();
        let value: Option<Vec<i32>> = store.get("cartItems").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_subscribers_see_writes_from_any_clone() {
        let store = SharedStore::in_memory();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        let other = store.clone();
        other.set_item(keys::CART_COUNT, "4").unwrap();
        other.remove_item(keys::CART_COUNT).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].value.as_deref(), Some("4"));
        assert_eq!(seen[1].value, None);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = SharedStore::in_memory();
        let hits = Arc::new(AtomicU64::new(0));
        let counter = hits.clone();
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set_item("a", "1").unwrap();
        assert!(store.unsubscribe(id));
        store.set_item("a", "2").unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = SharedStore::in_memory();
        let observed = Arc::new(AtomicU64::new(0));
        let reader = store.clone();
        let out = observed.clone();
        store.subscribe(move |_| {
            out.store(reader.cart_count() as u64, Ordering::SeqCst);
        });

        store.set_item(keys::CART_COUNT, "7").unwrap();
        assert_eq!(observed.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_cart_count_defaults_to_zero() {
        let store = SharedStore::in_memory();
        assert_eq!(store.cart_count(), 0);
        store.set_item(keys::CART_COUNT, "garbage").unwrap();
        assert_eq!(store.cart_count(), 0);
    }

    #[test]
    fn test_auth_flag_requires_literal_true() {
        let store = SharedStore::in_memory();
        assert!(!store.is_authenticated());
        store.set_item(keys::IS_AUTHENTICATED, "yes").unwrap();
        assert!(!store.is_authenticated());
        store.set_item(keys::IS_AUTHENTICATED, "true").unwrap();
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_badge_text() {
        assert_eq!(badge_text(0), None);
        assert_eq!(badge_text(5).as_deref(), Some("5"));
        assert_eq!(badge_text(99).as_deref(), Some("99"));
        assert_eq!(badge_text(100).as_deref(), Some("99+"));
    }
}
