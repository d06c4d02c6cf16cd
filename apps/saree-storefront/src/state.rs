//! App-wide state shared through context.

use leptos::prelude::*;
use saree_auth::{AuthService, Session};
use saree_commerce::cart::Cart;
use saree_commerce::Latency;
use saree_store::{keys, SharedStore};

use crate::platform::{open_store, BrowserTimer};

/// Everything pages share: the store, the cart and the signed-in shopper.
///
/// `cart_count` and `session` follow the store through a subscription, so a
/// write from any page reaches the header without a reload.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub latency: Latency,
    pub timer: BrowserTimer,
    pub cart: RwSignal<Cart>,
    pub cart_count: RwSignal<u32>,
    pub session: RwSignal<Option<Session>>,
}

impl AppState {
    pub fn new() -> Self {
        let store = open_store();
        let cart = Cart::load(&store).unwrap_or_default();
        let cart_count = RwSignal::new(store.cart_count());
        let session = RwSignal::new(Session::current(&store));

        let watched = store.clone();
        store.subscribe(move |event| {
            if event.key == keys::CART_COUNT {
                cart_count.set(watched.cart_count());
            } else if keys::SESSION_KEYS.contains(&event.key.as_str()) {
                session.set(Session::current(&watched));
            }
        });

        Self {
            store,
            latency: Latency::default(),
            timer: BrowserTimer,
            cart: RwSignal::new(cart),
            cart_count,
            session,
        }
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store.clone(), self.latency.clone())
    }

    /// Change the cart and mirror it into the store.
    ///
    /// The closure's error, if any, is returned and nothing is written.
    pub fn update_cart<T>(
        &self,
        change: impl FnOnce(&mut Cart) -> Result<T, saree_commerce::CommerceError>,
    ) -> Result<T, String> {
        let mut cart = self.cart.get_untracked();
        let value = change(&mut cart).map_err(|e| e.to_string())?;
        cart.persist(&self.store).map_err(|e| e.to_string())?;
        self.cart.set(cart);
        Ok(value)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_app_state() {
    provide_context(AppState::new());
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
