//! Browser bindings: `localStorage` as a store backend and a timeout-based
//! timer.

use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::prelude::set_timeout;
use saree_commerce::Timer;
use saree_store::{SharedStore, Storage, StoreError};

/// The page's `localStorage`.
///
/// Holds no handle; the storage object is looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::OpenError("no window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::OpenError("localStorage unavailable".to_string()))
    }

    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> StoreError {
    StoreError::StorageError(format!("{:?}", err))
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let storage = Self::storage()?;
        let len = storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = storage.key(index).map_err(js_error)? {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Store over `localStorage`, or memory when the browser refuses access.
pub fn open_store() -> SharedStore {
    if LocalStorage::is_available() {
        SharedStore::new(LocalStorage)
    } else {
        SharedStore::in_memory()
    }
}

/// Sleeps with `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let (tx, rx) = oneshot::channel::<()>();
        set_timeout(
            move || {
                let _ = tx.send(());
            },
            duration,
        );
        let _ = rx.await;
    }
}
