use leptos::prelude::*;
use saree_commerce::nav::Route;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div style="text-align: center; padding: 4rem;">
            <h1>"404"</h1>
            <p>"The page you are looking for could not be found."</p>
            <a href=Route::Home.path() class="btn">"Back to Home"</a>
            " "
            <a href=Route::ProductCatalog.path()>"Shop Sarees"</a>
        </div>
    }
}
