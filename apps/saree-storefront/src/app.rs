//! Application shell: router, header, breadcrumbs and footer.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::path;
use saree_commerce::nav::{
    breadcrumbs, search_href, Crumb, Route as Page, NAV_ITEMS, QUICK_ACTIONS,
};
use saree_store::badge_text;

use crate::pages::{
    AuthPage, CartPage, CatalogPage, CheckoutPage, HomePage, NotFound, ProductPage,
};
use crate::state::{provide_app_state, use_app_state};

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_state();

    let fallback = || view! { <NotFound/> }.into_view();

    view! {
        <Meta name="description" content="R.G Kasat Saree Mall - Traditional and designer sarees"/>
        <Title text="R.G Kasat Saree Mall"/>

        <Router>
            <Header/>
            <main>
                <Routes fallback>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/homepage") view=HomePage/>
                    <Route path=path!("/product-catalog") view=CatalogPage/>
                    <Route path=path!("/product-detail") view=ProductPage/>
                    <Route path=path!("/shopping-cart") view=CartPage/>
                    <Route path=path!("/checkout-process") view=CheckoutPage/>
                    <Route path=path!("/user-authentication") view=AuthPage/>
                    <Route path=path!("/*any") view=NotFound/>
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header() -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();
    let query = RwSignal::new(String::new());
    let menu_open = RwSignal::new(false);

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(href) = search_href(&query.get_untracked()) {
            navigate(&href, Default::default());
            query.set(String::new());
        }
    };

    view! {
        <header class="site-header">
            <button
                class="menu-toggle"
                aria-label="Open menu"
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >"☰"</button>
            <A href=Page::Home.path() attr:class="brand">"R.G Kasat Saree Mall"</A>
            <nav>
                {NAV_ITEMS
                    .into_iter()
                    .map(|page| view! { <A href=page.path()>{page.label()}</A> })
                    .collect_view()}
            </nav>
            <form class="search" on:submit=on_search>
                <input
                    type="search"
                    placeholder="Search sarees..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </form>
            <AccountMenu/>
            <A href=Page::ShoppingCart.path() attr:class="cart-link">
                "Cart"
                <CartBadge count=state.cart_count/>
            </A>
        </header>
        <MobileMenu open=menu_open/>
    }
}

/// Slide-in navigation for narrow screens. Any route change closes it.
#[component]
fn MobileMenu(open: RwSignal<bool>) -> impl IntoView {
    let state = use_app_state();
    let location = use_location();
    let session = state.session;
    let auth = state.auth();

    Effect::new(move |previous: Option<String>| {
        let path = location.pathname.get();
        if previous.is_some_and(|p| p != path) {
            open.set(false);
        }
        path
    });

    let close = move |_: leptos::ev::MouseEvent| open.set(false);
    let link = |route: Page| {
        view! {
            <A href=route.path()>
                <strong>{route.label()}</strong>
                {route.description().map(|text| view! { <span class="muted">{text}</span> })}
            </A>
        }
    };

    move || {
        open.get().then(|| {
            let auth = auth.clone();
            view! {
                <div class="menu-backdrop" on:click=close></div>
                <aside class="mobile-menu" role="dialog" aria-modal="true" aria-label="Mobile navigation menu">
                    <div class="menu-head">
                        <strong>"R.G Kasat Saree Mall"</strong>
                        <button class="link" aria-label="Close menu" on:click=close>"✕"</button>
                    </div>
                    <nav>{NAV_ITEMS.into_iter().map(link).collect_view()}</nav>
                    <h4>"Quick Actions"</h4>
                    <nav>{QUICK_ACTIONS.into_iter().map(link).collect_view()}</nav>
                    {move || match session.get() {
                        Some(session) => {
                            let auth = auth.clone();
                            view! {
                                <p class="muted">"Signed in as " {session.name}</p>
                                <button class="btn" on:click=move |_| {
                                    if let Err(err) = auth.logout() {
                                        leptos::logging::warn!("sign out failed: {}", err);
                                    }
                                    open.set(false);
                                }>"Sign Out"</button>
                            }
                                .into_any()
                        }
                        None => view! {
                            <A href=Page::UserAuthentication.path() attr:class="btn">"Sign In"</A>
                        }
                            .into_any(),
                    }}
                </aside>
            }
        })
    }
}

/// Item count bubble on the cart link.
#[component]
fn CartBadge(count: RwSignal<u32>) -> impl IntoView {
    move || badge_text(count.get()).map(|text| view! { <span class="badge">{text}</span> })
}

#[component]
fn AccountMenu() -> impl IntoView {
    let state = use_app_state();
    let auth = state.auth();

    view! {
        {move || match state.session.get() {
            Some(session) => {
                let auth = auth.clone();
                view! {
                    <div class="account">
                        <span>{session.name}</span>
                        <button on:click=move |_| {
                            if let Err(err) = auth.logout() {
                                leptos::logging::warn!("sign out failed: {}", err);
                            }
                        }>"Sign Out"</button>
                    </div>
                }
                    .into_any()
            }
            None => view! {
                <A href=Page::UserAuthentication.path() attr:class="account">"Sign In"</A>
            }
                .into_any(),
        }}
    }
}

/// Trail for the current path, or `items` when a page supplies its own.
/// Hidden on the homepage unless `items` are given.
#[component]
pub fn Breadcrumb(#[prop(optional)] items: Option<Vec<Crumb>>) -> impl IntoView {
    let location = use_location();
    let crumbs = move || items.clone().or_else(|| breadcrumbs(&location.pathname.get()));

    move || {
        crumbs().map(|crumbs| {
            let last = crumbs.len().saturating_sub(1);
            view! {
                <nav class="breadcrumb" aria-label="Breadcrumb">
                    {crumbs
                        .into_iter()
                        .enumerate()
                        .map(|(index, crumb)| {
                            if index == last {
                                view! { <span aria-current="page">{crumb.label}</span> }.into_any()
                            } else {
                                view! {
                                    <A href=crumb.path>{crumb.label}</A>
                                    <span class="sep">"›"</span>
                                }
                                    .into_any()
                            }
                        })
                        .collect_view()}
                </nav>
            }
        })
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer>
            <p>"R.G Kasat Saree Mall - Weaving traditions since generations"</p>
            <p class="muted">"Free shipping on orders above ₹2,000 · 18% GST included at checkout"</p>
        </footer>
    }
}
