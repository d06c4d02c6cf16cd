//! R.G Kasat Saree Mall storefront
//!
//! A client-side Leptos app over the storefront crates:
//! - Routing for the homepage, catalog, product detail, cart, checkout and
//!   account pages
//! - A header cart badge and account menu fed by the shared store
//! - Browser `localStorage` as the store backend

mod app;
mod pages;
mod platform;
mod state;

pub use app::App;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
