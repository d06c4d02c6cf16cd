//! Routed pages and the pieces they share.

mod auth;
mod cart;
mod catalog;
mod checkout;
mod home;
mod not_found;
mod product;

pub use auth::AuthPage;
pub use cart::CartPage;
pub use catalog::CatalogPage;
pub use checkout::CheckoutPage;
pub use home::HomePage;
pub use not_found::NotFound;
pub use product::ProductPage;

use leptos::prelude::*;
use leptos::task::spawn_local;
use saree_commerce::cart::{clamp_quantity, CartItem, DEFAULT_MAX_QUANTITY};
use saree_commerce::catalog::{find_product, product_detail, Product, ProductDetail};
use saree_commerce::{Latency, ProductId, Timer, ValidationErrors};

use crate::state::use_app_state;

/// `true` until a simulated fetch of `ms` milliseconds has finished.
pub(crate) fn loading_for(ms: u64) -> ReadSignal<bool> {
    let timer = use_app_state().timer;
    let (loading, set_loading) = signal(true);
    spawn_local(async move {
        timer.sleep(Latency::duration(ms)).await;
        set_loading.set(false);
    });
    loading
}

/// Message under a form field, if validation flagged it.
pub(crate) fn field_error(
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
) -> impl IntoView {
    move || {
        errors.with(|errors| {
            errors
                .get(field)
                .map(|message| view! { <p class="field-error">{message.to_string()}</p> })
        })
    }
}

pub(crate) fn stars(rating: f32) -> String {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

// ============================================================================
// Product Components
// ============================================================================

#[component]
pub(crate) fn ProductCard(product: Product) -> impl IntoView {
    let state = use_app_state();
    let notice = RwSignal::new(None::<String>);
    let href = product.detail_href();
    let discount = product.discount_percent();
    let in_stock = product.in_stock;
    let line = CartItem::from_product(&product, DEFAULT_MAX_QUANTITY);
    let id = product.id.clone();
    let quick_view = RwSignal::new(false);

    let quick_add = move |_: leptos::ev::MouseEvent| {
        let line = line.clone();
        let message = match state.update_cart(|cart| cart.add_item(line)) {
            Ok(_) => "Added to cart!".to_string(),
            Err(err) => err,
        };
        notice.set(Some(message));
    };

    view! {
        <div class="product-card">
            <a href=href.clone()>
                <img src=product.image.clone() alt=product.name.clone() loading="lazy"/>
            </a>
            {product.is_new.then(|| view! { <span class="tag new">"New"</span> })}
            {(discount > 0).then(|| view! { <span class="tag off">{format!("{}% OFF", discount)}</span> })}
            <div class="product-info">
                <a href=href><h3>{product.name.clone()}</h3></a>
                <p class="rating">
                    {stars(product.rating)} " (" {product.review_count.to_string()} ")"
                </p>
                <p>
                    <span class="price">{product.price.display()}</span>
                    {(discount > 0).then(|| view! {
                        <span class="original">{product.original_price.display()}</span>
                    })}
                </p>
                <button class="btn" disabled={!in_stock} on:click=quick_add>
                    {if in_stock { "Add to Cart" } else { "Out of Stock" }}
                </button>
                <button class="link" on:click=move |_| quick_view.set(true)>"Quick View"</button>
                {move || notice.get().map(|text| view! { <p class="notice">{text}</p> })}
            </div>
        </div>
        {move || quick_view.get().then(|| view! { <QuickView id=id.clone() open=quick_view/> })}
    }
}

/// Catalog product preview with size and quantity pickers.
#[component]
fn QuickView(id: ProductId, open: RwSignal<bool>) -> impl IntoView {
    let state = use_app_state();
    let close = move |_: leptos::ev::MouseEvent| open.set(false);

    let escape = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            open.set(false);
        }
    });
    on_cleanup(move || escape.remove());

    let Some(product) = find_product(&id) else {
        return view! {
            <div class="modal" on:click=close>
                <div class="quick-view"><p class="field-error">"Product not found"</p></div>
            </div>
        }
            .into_any();
    };

    let detail = StoredValue::new(product_detail(&id));
    let size = RwSignal::new(None::<String>);
    let quantity = RwSignal::new(1u32);
    let error = RwSignal::new(None::<String>);
    let max = detail.with_value(|d| d.as_ref().map_or(0, ProductDetail::max_orderable));
    let sizes = detail.with_value(|d| d.as_ref().map(|d| d.sizes.clone()).unwrap_or_default());
    let discount = product.discount_percent();

    let add = move |_: leptos::ev::MouseEvent| {
        let line = detail.with_value(|d| match d {
            Some(d) => CartItem::from_detail(d, size.get_untracked().as_deref(), quantity.get_untracked())
                .map_err(|e| e.to_string()),
            None => Err("Product not found".to_string()),
        });
        match line.and_then(|line| state.update_cart(|cart| cart.add_item(line))) {
            Ok(_) => open.set(false),
            Err(err) => error.set(Some(err)),
        }
    };

    view! {
        <div class="modal" on:click=close>
            <div
                class="quick-view"
                role="dialog"
                aria-label="Quick view"
                on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
            >
                <button class="link close" aria-label="Close quick view" on:click=close>"✕"</button>
                <img src=product.image.clone() alt=product.name.clone()/>
                <div class="info">
                    <h2>{product.name.clone()}</h2>
                    <p class="rating">
                        {stars(product.rating)} " (" {product.review_count.to_string()} " reviews)"
                    </p>
                    <p>
                        <span class="price">{product.price.display()}</span>
                        {(discount > 0).then(|| view! {
                            <span class="original">{product.original_price.display()}</span>
                            <span class="tag off">{format!("{}% OFF", discount)}</span>
                        })}
                    </p>
                    <p>{product.description.clone()}</p>
                    <div class="sizes">
                        {sizes
                            .into_iter()
                            .map(|option| {
                                let value = option.value.clone();
                                let selected = option.value.clone();
                                view! {
                                    <button
                                        class="size"
                                        class:active=move || size.with(|s| s.as_deref() == Some(selected.as_str()))
                                        disabled={!option.available}
                                        on:click=move |_| size.set(Some(value.clone()))
                                    >
                                        {option.label.clone()}
                                    </button>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </div>
                    <div class="stepper">
                        <button
                            disabled={move || quantity.get() <= 1}
                            on:click=move |_| quantity.update(|q| *q = clamp_quantity(*q as i64 - 1, max))
                        >"−"</button>
                        <span>{move || quantity.get().to_string()}</span>
                        <button
                            disabled={move || quantity.get() >= max}
                            on:click=move |_| quantity.update(|q| *q = clamp_quantity(*q as i64 + 1, max))
                        >"+"</button>
                    </div>
                    <div class="actions">
                        <button class="btn primary" disabled={max == 0} on:click=add>"Add to Cart"</button>
                        <a class="btn" href=product.detail_href()>"View Full Details"</a>
                    </div>
                    {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
                </div>
            </div>
        </div>
    }
        .into_any()
}

// ============================================================================
// Skeleton Components (Loading States)
// ============================================================================

#[component]
pub(crate) fn ProductGridSkeleton(#[prop(default = 4)] count: usize) -> impl IntoView {
    view! {
        <div class="products">
            {(0..count).map(|_| view! { <ProductCardSkeleton/> }).collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn ProductCardSkeleton() -> impl IntoView {
    view! {
        <div class="product-card">
            <div class="skeleton" style="width: 100%; height: 200px;"></div>
            <div class="product-info">
                <div class="skeleton" style="width: 80%; height: 1.5rem; margin-bottom: 0.5rem;"></div>
                <div class="skeleton" style="width: 40%; height: 1.25rem;"></div>
            </div>
        </div>
    }
}

#[component]
pub(crate) fn ListSkeleton(#[prop(default = 3)] rows: usize) -> impl IntoView {
    view! {
        <div style="max-width: 600px;">
            <div class="skeleton" style="width: 200px; height: 1.5rem; margin-bottom: 1rem;"></div>
            {(0..rows)
                .map(|_| view! {
                    <div class="skeleton" style="width: 100%; height: 4rem; margin-bottom: 0.5rem;"></div>
                })
                .collect::<Vec<_>>()}
        </div>
    }
}
