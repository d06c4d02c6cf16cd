use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use saree_commerce::cart::{clamp_quantity, CartItem};
use saree_commerce::catalog::{product_detail, related_products, ProductDetail};
use saree_commerce::nav::{breadcrumbs, Crumb, Route};
use saree_commerce::ProductId;

use super::{loading_for, stars, ListSkeleton, ProductCard};
use crate::app::Breadcrumb;
use crate::state::use_app_state;

const DEFAULT_PRODUCT_ID: &str = "1";
const RELATED_LIMIT: usize = 4;

/// Product detail page for `?id=`.
#[component]
pub fn ProductPage() -> impl IntoView {
    let state = use_app_state();
    let params = use_query_map();
    let loading = loading_for(state.latency.product_load);

    let detail = Memo::new(move |_| {
        let id = params
            .read()
            .get("id")
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_ID.to_string());
        product_detail(&ProductId::new(id))
    });

    move || {
        if loading.get() {
            return view! { <ListSkeleton rows=4/> }.into_any();
        }
        match detail.get() {
            Some(detail) => view! { <ProductDetailView detail=detail/> }.into_any(),
            None => view! {
                <div style="text-align: center; padding: 4rem;">
                    <h2>"Product Not Found"</h2>
                    <p>"Failed to load product details"</p>
                    <a href=Route::ProductCatalog.path()>"Browse All Products"</a>
                </div>
            }
                .into_any(),
        }
    }
}

#[component]
fn ProductDetailView(detail: ProductDetail) -> impl IntoView {
    let state = use_app_state();
    let navigate = use_navigate();
    let detail = StoredValue::new(detail);
    let size = RwSignal::new(None::<String>);
    let quantity = RwSignal::new(1u32);
    let image = RwSignal::new(0usize);
    let notice = RwSignal::new(None::<String>);
    let max = detail.with_value(ProductDetail::max_orderable);

    let mut trail = breadcrumbs(Route::ProductCatalog.path()).unwrap_or_default();
    trail.push(
        Crumb::new(detail.with_value(|d| d.product.name.clone()), Route::ProductDetail.path())
            .with_icon(Route::ProductDetail.icon()),
    );

    // Size is checked before anything is written.
    let add_selection = {
        let state = state.clone();
        move || -> Result<u32, String> {
            let line = detail.with_value(|d| {
                CartItem::from_detail(d, size.get_untracked().as_deref(), quantity.get_untracked())
            });
            let line = line.map_err(|e| e.to_string())?;
            state.update_cart(|cart| cart.add_item(line))
        }
    };

    let add_to_cart = {
        let add_selection = add_selection.clone();
        move |_: leptos::ev::MouseEvent| {
            let message = match add_selection() {
                Ok(_) => format!("Added {} item(s) to cart!", quantity.get_untracked()),
                Err(err) => err,
            };
            notice.set(Some(message));
        }
    };

    let buy_now = move |_: leptos::ev::MouseEvent| match add_selection() {
        Ok(_) => navigate(Route::CheckoutProcess.path(), Default::default()),
        Err(err) => notice.set(Some(err)),
    };

    let d = detail.get_value();
    let product = d.product.clone();
    let id = product.id.clone();
    let discount = product.discount_percent();

    view! {
        <Breadcrumb items=trail/>
        <div class="product-detail">
            <div class="gallery">
                {move || detail.with_value(|d| {
                    d.images.get(image.get()).map(|img| view! {
                        <img src=img.url.clone() alt=img.tags.join(", ")/>
                    })
                })}
                <div class="thumbs">
                    {d.images
                        .iter()
                        .enumerate()
                        .map(|(index, img)| view! {
                            <button
                                class:active=move || image.get() == index
                                on:click=move |_| image.set(index)
                            >
                                <img src=img.url.clone() alt=img.tags.first().cloned().unwrap_or_default()/>
                            </button>
                        })
                        .collect::<Vec<_>>()}
                </div>
            </div>

            <div class="info">
                <p class="muted">{d.brand.clone()}</p>
                <h1>{product.name.clone()}</h1>
                <p class="rating">
                    {stars(d.average_rating())}
                    " " {format!("{:.1}", d.average_rating())}
                    " (" {product.review_count.to_string()} " reviews)"
                </p>
                <p>
                    <span class="price">{product.price.display()}</span>
                    {(discount > 0).then(|| view! {
                        <span class="original">{product.original_price.display()}</span>
                        <span class="tag off">{format!("{}% OFF", discount)}</span>
                        <p class="notice">"You save " {product.savings().display()}</p>
                    })}
                </p>
                {d.stock_message().map(|message| view! { <p class="stock">{message}</p> })}

                <fieldset class="sizes">
                    <legend>"Size"</legend>
                    {d.sizes
                        .iter()
                        .map(|option| {
                            let value = option.value.clone();
                            let selected = value.clone();
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
                </fieldset>

                <div class="stepper">
                    <button
                        disabled={move || quantity.get() <= 1}
                        on:click=move |_| quantity.update(|q| *q = clamp_quantity(*q as i64 - 1, max))
                    >"−"</button>
                    <input
                        type="number"
                        min="1"
                        max=max.to_string()
                        prop:value=move || quantity.get().to_string()
                        on:change=move |ev| {
                            let requested = event_target_value(&ev).parse::<i64>().unwrap_or(1);
                            quantity.set(clamp_quantity(requested, max));
                        }
                    />
                    <button
                        disabled={move || quantity.get() >= max}
                        on:click=move |_| quantity.update(|q| *q = clamp_quantity(*q as i64 + 1, max))
                    >"+"</button>
                </div>

                <div class="actions">
                    <button class="btn" disabled={max == 0} on:click=add_to_cart>"Add to Cart"</button>
                    <button class="btn primary" disabled={max == 0} on:click=buy_now>"Buy Now"</button>
                </div>
                {move || notice.get().map(|text| view! { <p class="notice">{text}</p> })}

                <p>{product.description.clone()}</p>
                {d.cultural_significance.clone().map(|text| view! {
                    <section>
                        <h3>"Cultural Significance"</h3>
                        <p>{text}</p>
                    </section>
                })}
                {(!d.occasions.is_empty()).then(|| view! {
                    <p class="muted">"Perfect for: " {d.occasions.join(", ")}</p>
                })}
            </div>
        </div>

        <section class="specs">
            <h3>"Specifications"</h3>
            <table>
                {d.specifications
                    .iter()
                    .map(|(name, value)| view! {
                        <tr><th>{name.clone()}</th><td>{value.clone()}</td></tr>
                    })
                    .collect::<Vec<_>>()}
            </table>
            <h3>"Care Instructions"</h3>
            <ul>
                {d.care_instructions
                    .iter()
                    .map(|line| view! { <li>{line.clone()}</li> })
                    .collect::<Vec<_>>()}
            </ul>
        </section>

        <section class="reviews">
            <h3>"Customer Reviews"</h3>
            {if d.reviews.is_empty() {
                view! { <p class="muted">"No reviews yet."</p> }.into_any()
            } else {
                d.reviews
                    .iter()
                    .map(|review| view! {
                        <article class="review">
                            <p>
                                <strong>{review.user_name.clone()}</strong>
                                " " <span class="rating">{stars(review.rating as f32)}</span>
                                {review.verified.then(|| view! { <span class="tag">"Verified Purchase"</span> })}
                            </p>
                            <p class="muted">{review.date.clone()}</p>
                            <p>{review.comment.clone()}</p>
                            <p class="muted">{format!("{} people found this helpful", review.helpful)}</p>
                        </article>
                    })
                    .collect::<Vec<_>>()
                    .into_any()
            }}
        </section>

        <h2>"You May Also Like"</h2>
        <div class="products">
            {related_products(&id, RELATED_LIMIT)
                .into_iter()
                .map(|product| view! { <ProductCard product=product/> })
                .collect::<Vec<_>>()}
        </div>
    }
}
