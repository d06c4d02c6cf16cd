use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use saree_commerce::catalog::products;
use saree_commerce::search::{CatalogQuery, CatalogResults, FilterGroup, LoadMore, SortOption};

use super::{loading_for, ProductCard, ProductGridSkeleton};
use crate::state::use_app_state;

/// Product catalog with the filter panel, sort and "load more".
#[component]
pub fn CatalogPage() -> impl IntoView {
    let state = use_app_state();
    let params = use_query_map();
    let catalog = StoredValue::new(products());
    let query = RwSignal::new(CatalogQuery::new());
    let loading = loading_for(state.latency.catalog_load);

    // Deep links (`?search=`, `?category=`) reset the panel.
    Effect::new(move |_| {
        let params = params.get();
        let pairs: Vec<(&str, String)> = ["search", "category"]
            .into_iter()
            .filter_map(|key| params.get(key).map(|value| (key, value)))
            .collect();
        query.set(CatalogQuery::from_params(
            pairs.iter().map(|(key, value)| (*key, value.as_str())),
        ));
    });

    let results = Signal::derive(move || {
        query.with(|q| catalog.with_value(|catalog| CatalogResults::new(q, catalog)))
    });

    view! {
        <h2>"Shop Sarees"</h2>
        {move || {
            let search = query.with(|q| q.search.clone());
            (!search.is_empty()).then(|| view! {
                <p class="muted">"Results for \"" {search} "\""</p>
            })
        }}
        <div class="catalog">
            <FilterPanel query=query/>
            <section>
                <div class="toolbar">
                    <span>{move || results.with(CatalogResults::count_label)}</span>
                    <SortSelect query=query/>
                </div>
                <ActiveFilters query=query/>
                {move || {
                    if loading.get() {
                        return view! { <ProductGridSkeleton count=8/> }.into_any();
                    }
                    let results = results.get();
                    if results.is_empty() {
                        return view! {
                            <div class="empty">
                                <p>"No sarees match your filters."</p>
                                <button class="btn" on:click=move |_| query.update(|q| {
                                    q.filters.clear();
                                    q.search.clear();
                                })>"Clear all filters"</button>
                            </div>
                        }
                            .into_any();
                    }
                    view! {
                        <div class="products">
                            {results
                                .items
                                .into_iter()
                                .map(|product| view! { <ProductCard product=product/> })
                                .collect::<Vec<_>>()}
                        </div>
                        <LoadMoreButton/>
                    }
                        .into_any()
                }}
            </section>
        </div>
    }
}

#[component]
fn FilterPanel(query: RwSignal<CatalogQuery>) -> impl IntoView {
    view! {
        <aside class="filters">
            <div class="filters-head">
                <h3>"Filters"</h3>
                {move || {
                    let count = query.with(|q| q.filters.active_count());
                    (count > 0).then(|| view! {
                        <button class="link" on:click=move |_| query.update(|q| q.filters.clear())>
                            {format!("Clear all ({})", count)}
                        </button>
                    })
                }}
            </div>
            {FilterGroup::ALL
                .into_iter()
                .map(|group| view! {
                    <fieldset>
                        <legend>{group.title()}</legend>
                        {group
                            .options()
                            .iter()
                            .map(|option| {
                                let value = option.value;
                                view! {
                                    <label>
                                        <input
                                            type="checkbox"
                                            prop:checked=move || query.with(|q| q.filters.is_selected(group, value))
                                            on:change=move |_| query.update(|q| q.filters.toggle(group, value))
                                        />
                                        {option.swatch.map(|colour| view! {
                                            <span class="swatch" style=format!("background: {};", colour)></span>
                                        })}
                                        {option.label}
                                    </label>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </fieldset>
                })
                .collect::<Vec<_>>()}
        </aside>
    }
}

#[component]
fn ActiveFilters(query: RwSignal<CatalogQuery>) -> impl IntoView {
    move || {
        let chips = query.with(|q| q.filters.chips());
        (!chips.is_empty()).then(|| view! {
            <div class="chips">
                {chips
                    .into_iter()
                    .map(|(group, value, label)| view! {
                        <button class="chip" on:click=move |_| query.update(|q| q.filters.remove(group, &value))>
                            {label} " ×"
                        </button>
                    })
                    .collect::<Vec<_>>()}
            </div>
        })
    }
}

#[component]
fn SortSelect(query: RwSignal<CatalogQuery>) -> impl IntoView {
    let on_change = move |ev: leptos::ev::Event| match event_target_value(&ev).parse::<SortOption>() {
        Ok(sort) => query.update(|q| q.sort = sort),
        Err(err) => leptos::logging::warn!("{}", err),
    };

    view! {
        <label class="sort">
            "Sort by "
            <select on:change=on_change>
                {SortOption::ALL
                    .into_iter()
                    .map(|sort| view! {
                        <option
                            value=sort.as_str()
                            selected=move || query.with(|q| q.sort == sort)
                        >
                            {sort.display_name()}
                        </option>
                    })
                    .collect::<Vec<_>>()}
            </select>
        </label>
    }
}

#[component]
fn LoadMoreButton() -> impl IntoView {
    let state = use_app_state();
    let load_more = RwSignal::new(LoadMore::new());
    let pending = RwSignal::new(false);

    let on_click = move |_: leptos::ev::MouseEvent| {
        let state = state.clone();
        let mut next = load_more.get_untracked();
        pending.set(true);
        spawn_local(async move {
            next.load(&state.timer, &state.latency).await;
            load_more.set(next);
            pending.set(false);
        });
    };

    view! {
        {move || {
            if load_more.get().has_more {
                view! {
                    <button class="btn load-more" disabled=move || pending.get() on:click=on_click.clone()>
                        {move || if pending.get() { "Loading..." } else { "Load More Sarees" }}
                    </button>
                }
                    .into_any()
            } else {
                view! { <p class="muted">"You've seen all our sarees."</p> }.into_any()
            }
        }}
    }
}
