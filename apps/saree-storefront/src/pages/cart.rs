use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use saree_commerce::cart::{
    recently_viewed, suggested_products, Cart, CartItem, CartSummary, ProductSuggestion, SavedItem,
};
use saree_commerce::nav::Route;
use saree_commerce::{CommerceError, Latency, ProductId, Timer};

use super::{loading_for, stars, ListSkeleton};
use crate::app::Breadcrumb;
use crate::state::use_app_state;

/// Shopping cart page
#[component]
pub fn CartPage() -> impl IntoView {
    let state = use_app_state();
    let loading = loading_for(state.latency.cart_load);
    let cart = state.cart;
    let is_empty = Memo::new(move |_| cart.with(Cart::is_empty));

    view! {
        <Breadcrumb/>
        <h2>"Shopping Cart"</h2>
        {move || {
            if loading.get() {
                return view! { <ListSkeleton/> }.into_any();
            }
            if is_empty.get() {
                return view! { <EmptyCart/> }.into_any();
            }
            view! {
                <div class="cart">
                    <section>
                        <p>{move || format!("{} item(s) in your cart", cart.with(Cart::item_count))}</p>
                        <For
                            each=move || cart.get().items
                            key=|item| (item.id.clone(), item.quantity, item.size.clone())
                            children=|item| view! { <CartLine item=item/> }
                        />
                        <SavedForLater/>
                    </section>
                    <aside>
                        <PromoForm/>
                        <OrderSummary/>
                    </aside>
                </div>
            }
                .into_any()
        }}
        <SuggestionRail title="Recently Viewed" products=recently_viewed()/>
        <SuggestionRail title="You May Also Like" products=suggested_products()/>
    }
}

#[component]
fn EmptyCart() -> impl IntoView {
    view! {
        <div class="empty">
            <p>"Your cart is empty."</p>
            <a href=Route::ProductCatalog.path() class="btn">"Continue Shopping"</a>
        </div>
        <SavedForLater/>
    }
}

// ============================================================================
// Cart Components
// ============================================================================

#[component]
fn CartLine(item: CartItem) -> impl IntoView {
    let state = use_app_state();
    let error = RwSignal::new(None::<String>);
    let id = StoredValue::new(item.id.clone());

    // Every button on the line goes through here.
    let act = move |change: fn(&mut Cart, &ProductId) -> Result<(), CommerceError>| {
        let result = state.update_cart(|cart| id.with_value(|id| change(cart, id)));
        error.set(result.err());
    };

    let subtotal = item
        .line_total()
        .map(|m| m.display())
        .unwrap_or_else(|e| e.to_string());
    let discount = item.discount_percent();
    let details: Vec<String> = [item.size.clone(), item.color.clone(), item.fabric.clone()]
        .into_iter()
        .flatten()
        .collect();

    view! {
        <div class="cart-line">
            <img src=item.image.clone() alt=item.name.clone()/>
            <div class="grow">
                <strong>{item.name.clone()}</strong>
                <p class="muted">{details.join(" · ")}</p>
                <p>
                    <span class="price">{item.price.display()}</span>
                    {(discount > 0).then(|| view! {
                        <span class="original">{item.original_price.display()}</span>
                        <span class="tag off">{format!("{}% OFF", discount)}</span>
                    })}
                </p>
                <p class="muted">{item.stock_status.display_name()}</p>
                <div class="stepper">
                    <button
                        disabled={!item.can_decrement()}
                        on:click={
                            let act = act.clone();
                            move |_| act(|cart, id| cart.decrement(id).map(|_| ()))
                        }
                    >"−"</button>
                    <span>{item.quantity.to_string()}</span>
                    <button
                        disabled={!item.can_increment()}
                        on:click={
                            let act = act.clone();
                            move |_| act(|cart, id| cart.increment(id).map(|_| ()))
                        }
                    >"+"</button>
                </div>
                <button class="link" on:click={
                    let act = act.clone();
                    move |_| act(Cart::save_for_later)
                }>"Save for Later"</button>
                <button class="link" on:click=move |_| act(|cart, id| {
                    cart.remove_item(id);
                    Ok(())
                })>"Remove"</button>
                {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
            </div>
            <strong>{subtotal}</strong>
        </div>
    }
}

#[component]
fn SavedForLater() -> impl IntoView {
    let state = use_app_state();
    let cart = state.cart;

    view! {
        {move || {
            let saved = cart.with(|c| c.saved.clone());
            (!saved.is_empty()).then(|| {
                let count = saved.len();
                view! {
                    <section class="saved">
                        <h3>{format!("Saved for Later ({})", count)}</h3>
                        {saved
                            .into_iter()
                            .map(|item| view! { <SavedLine item=item/> })
                            .collect::<Vec<_>>()}
                    </section>
                }
            })
        }}
    }
}

#[component]
fn SavedLine(item: SavedItem) -> impl IntoView {
    let state = use_app_state();
    let move_id = item.id.clone();
    let remove_id = item.id.clone();
    let mover = state.clone();

    view! {
        <div class="cart-line">
            <img src=item.image.clone() alt=item.name.clone()/>
            <div class="grow">
                <strong>{item.name.clone()}</strong>
                <p><span class="price">{item.price.display()}</span></p>
                <p class="muted">{item.stock_status.display_name()}</p>
                <button class="link" on:click=move |_| {
                    if let Err(err) = mover.update_cart(|cart| cart.move_to_cart(&move_id)) {
                        leptos::logging::warn!("{}", err);
                    }
                }>"Move to Cart"</button>
                <button class="link" on:click=move |_| {
                    let removed = state.update_cart(|cart| Ok(cart.remove_saved(&remove_id)));
                    if let Err(err) = removed {
                        leptos::logging::warn!("{}", err);
                    }
                }>"Remove"</button>
            </div>
        </div>
    }
}

#[component]
fn PromoForm() -> impl IntoView {
    let state = use_app_state();
    let cart = state.cart;
    let code = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let apply = {
        let state = state.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let state = state.clone();
            let input = code.get_untracked();
            let mut probe = state.cart.get_untracked();
            pending.set(true);
            error.set(None);
            spawn_local(async move {
                let checked = probe.apply_promo(&input, &state.timer, &state.latency).await;
                let outcome = checked.map_err(|e| e.to_string()).and_then(|promo| {
                    // The cart may have changed while the code was checked.
                    state.update_cart(|cart| {
                        cart.promo = Some(promo);
                        Ok(())
                    })
                });
                match outcome {
                    Ok(()) => code.set(String::new()),
                    Err(message) => error.set(Some(message)),
                }
                pending.set(false);
            });
        }
    };

    let remove = move |_: leptos::ev::MouseEvent| {
        if let Err(err) = state.update_cart(|cart| {
            cart.remove_promo();
            Ok(())
        }) {
            error.set(Some(err));
        }
    };

    view! {
        <section class="promo">
            <h3>"Promo Code"</h3>
            {move || match cart.with(|c| c.promo) {
                Some(promo) => view! {
                    <p class="notice">
                        {format!("{} applied: {}", promo.as_str(), promo.description())}
                        " "
                        <button class="link" on:click=remove.clone()>"Remove"</button>
                    </p>
                }
                    .into_any(),
                None => view! {
                    <form on:submit=apply.clone()>
                        <input
                            type="text"
                            placeholder="Enter promo code"
                            prop:value=move || code.get()
                            on:input=move |ev| code.set(event_target_value(&ev))
                        />
                        <button type="submit" class="btn" disabled=move || pending.get()>
                            {move || if pending.get() { "Applying..." } else { "Apply" }}
                        </button>
                    </form>
                }
                    .into_any(),
            }}
            {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
        </section>
    }
}

#[component]
fn OrderSummary() -> impl IntoView {
    let cart = use_app_state().cart;

    move || match cart.with(Cart::summary) {
        Ok(summary) => {
            let savings = cart.with(Cart::savings).display();
            view! { <SummaryTable summary=summary savings=savings/> }.into_any()
        }
        Err(err) => view! { <p class="field-error">{err.to_string()}</p> }.into_any(),
    }
}

#[component]
fn SummaryTable(summary: CartSummary, savings: String) -> impl IntoView {
    let hint = summary.amount_to_free_shipping().map(|short| {
        view! { <p class="notice">"Add " {short.display()} " more for FREE shipping"</p> }
    });

    view! {
        <section class="summary">
            <h3>"Order Summary"</h3>
            <table>
                <tr>
                    <td>{format!("Subtotal ({} items)", summary.item_count)}</td>
                    <td>{summary.subtotal.display()}</td>
                </tr>
                {summary.has_discount().then(|| view! {
                    <tr class="discount">
                        <td>{format!("Discount ({})", summary.promo_code.clone().unwrap_or_default())}</td>
                        <td>"-" {summary.discount.display()}</td>
                    </tr>
                })}
                <tr><td>"Shipping"</td><td>{summary.shipping.display_or_free()}</td></tr>
                <tr><td>"GST (18%)"</td><td>{summary.tax.display()}</td></tr>
                <tr class="total"><td>"Total"</td><td>{summary.total.display()}</td></tr>
            </table>
            {hint}
            <p class="muted">"You save " {savings} " on this order"</p>
            <CheckoutButton/>
            <a href=Route::ProductCatalog.path()>"Continue Shopping"</a>
        </section>
    }
}

#[component]
fn CheckoutButton() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();
    let processing = RwSignal::new(false);

    let on_click = move |_: leptos::ev::MouseEvent| {
        let timer = state.timer;
        let delay = Latency::duration(state.latency.checkout_redirect);
        let navigate = navigate.clone();
        processing.set(true);
        spawn_local(async move {
            timer.sleep(delay).await;
            processing.set(false);
            navigate(Route::CheckoutProcess.path(), Default::default());
        });
    };

    view! {
        <button class="btn primary" disabled=move || processing.get() on:click=on_click>
            {move || if processing.get() { "Processing..." } else { "Proceed to Checkout" }}
        </button>
    }
}

#[component]
fn SuggestionRail(title: &'static str, products: Vec<ProductSuggestion>) -> impl IntoView {
    view! {
        <section class="rail">
            <h3>{title}</h3>
            <div class="products">
                {products
                    .into_iter()
                    .map(|p| view! {
                        <a class="product-card" href=format!("{}?id={}", Route::ProductDetail.path(), p.id)>
                            <img src=p.image alt=p.name.clone()/>
                            <div class="product-info">
                                <h3>{p.name}</h3>
                                <p class="rating">{stars(p.rating)}</p>
                                <p>
                                    <span class="price">{p.price.display()}</span>
                                    {p.original_price.map(|m| view! { <span class="original">{m.display()}</span> })}
                                </p>
                            </div>
                        </a>
                    })
                    .collect::<Vec<_>>()}
            </div>
        </section>
    }
}
