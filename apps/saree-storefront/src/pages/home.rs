use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use saree_commerce::catalog::products;
use saree_commerce::home::{
    category_tiles, hero_slides, subscribe_newsletter, testimonials, Carousel, HERO_INTERVAL_MS,
    TESTIMONIAL_INTERVAL_MS,
};

use super::{stars, ProductCard};
use crate::state::use_app_state;

const SHOWCASE_SIZE: usize = 4;

/// Home page: hero, categories, showcase, testimonials and newsletter.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <HeroCarousel/>
        <CategoryGrid/>
        <h2>"Featured Sarees"</h2>
        <div class="products">
            {products()
                .into_iter()
                .take(SHOWCASE_SIZE)
                .map(|product| view! { <ProductCard product=product/> })
                .collect::<Vec<_>>()}
        </div>
        <Testimonials/>
        <Newsletter/>
    }
}

/// Advance `carousel` every `ms` until the owning component is dropped.
fn auto_advance(carousel: RwSignal<Carousel>, ms: u64) {
    match set_interval_with_handle(
        move || carousel.update(|c| {
            c.next();
        }),
        Duration::from_millis(ms),
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => leptos::logging::warn!("carousel timer unavailable: {:?}", err),
    }
}

#[component]
fn HeroCarousel() -> impl IntoView {
    let slides = StoredValue::new(hero_slides());
    let carousel = RwSignal::new(Carousel::new(slides.with_value(Vec::len)));
    auto_advance(carousel, HERO_INTERVAL_MS);

    let current = move || slides.with_value(|s| s[carousel.get().index()].clone());

    view! {
        <section class="hero">
            {move || {
                let slide = current();
                view! {
                    <span class="offer">{slide.offer}</span>
                    <h2>{slide.title}</h2>
                    <p class="subtitle">{slide.subtitle}</p>
                    <p>{slide.description}</p>
                    <a href=slide.cta_link class="btn">{slide.cta_text}</a>
                }
            }}
            <div class="carousel-controls">
                <button on:click=move |_| carousel.update(|c| { c.previous(); })>"‹"</button>
                {(0..slides.with_value(Vec::len))
                    .map(|index| view! {
                        <button
                            class="dot"
                            class:active=move || carousel.get().index() == index
                            on:click=move |_| carousel.update(|c| c.go_to(index))
                        ></button>
                    })
                    .collect::<Vec<_>>()}
                <button on:click=move |_| carousel.update(|c| { c.next(); })>"›"</button>
            </div>
        </section>
    }
}

#[component]
fn CategoryGrid() -> impl IntoView {
    view! {
        <h2>"Shop by Category"</h2>
        <div class="categories">
            {category_tiles()
                .into_iter()
                .map(|tile| view! {
                    <a href=tile.link class="category-tile" class:featured=tile.featured>
                        <h3>{tile.name}</h3>
                        <p>{tile.description}</p>
                        <span class="muted">{tile.product_count}</span>
                    </a>
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn Testimonials() -> impl IntoView {
    let items = StoredValue::new(testimonials());
    let carousel = RwSignal::new(Carousel::new(items.with_value(Vec::len)));
    auto_advance(carousel, TESTIMONIAL_INTERVAL_MS);

    view! {
        <section class="testimonials">
            <h2>"What Our Customers Say"</h2>
            {move || {
                let t = items.with_value(|items| items[carousel.get().index()].clone());
                view! {
                    <blockquote>
                        <p class="rating">{stars(t.rating as f32)}</p>
                        <p>{t.review}</p>
                        <footer>
                            <strong>{t.name}</strong> ", " {t.location}
                            <span class="muted">" · " {t.purchase_type}</span>
                            {t.verified.then(|| view! { <span class="tag">"Verified"</span> })}
                        </footer>
                    </blockquote>
                }
            }}
        </section>
    }
}

#[component]
fn Newsletter() -> impl IntoView {
    let state = use_app_state();
    let email = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let result = RwSignal::new(None::<Result<(), &'static str>>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let state = state.clone();
        let address = email.get_untracked();
        pending.set(true);
        spawn_local(async move {
            let outcome = subscribe_newsletter(&address, &state.timer, &state.latency).await;
            if outcome.is_ok() {
                email.set(String::new());
            }
            result.set(Some(outcome));
            pending.set(false);
        });
    };

    view! {
        <section class="newsletter">
            <h2>"Stay in Style"</h2>
            <p>"Get early access to new collections and festive offers."</p>
            <form on:submit=on_submit>
                <input
                    type="email"
                    placeholder="Enter your email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <button type="submit" class="btn" disabled=move || pending.get()>
                    {move || if pending.get() { "Subscribing..." } else { "Subscribe" }}
                </button>
            </form>
            {move || result.get().map(|outcome| match outcome {
                Ok(()) => view! {
                    <p class="notice">"Thank you for subscribing!"</p>
                }.into_any(),
                Err(message) => view! { <p class="field-error">{message}</p> }.into_any(),
            })}
        </section>
    }
}
