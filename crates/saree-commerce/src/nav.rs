//! Route table, breadcrumbs and link builders shared by the shell.

use serde::{Deserialize, Serialize};

/// A page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    ProductCatalog,
    ProductDetail,
    ShoppingCart,
    CheckoutProcess,
    UserAuthentication,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::ProductCatalog,
        Route::ProductDetail,
        Route::ShoppingCart,
        Route::CheckoutProcess,
        Route::UserAuthentication,
    ];

    /// Canonical path. `/` is an alias of the homepage.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/homepage",
            Route::ProductCatalog => "/product-catalog",
            Route::ProductDetail => "/product-detail",
            Route::ShoppingCart => "/shopping-cart",
            Route::CheckoutProcess => "/checkout-process",
            Route::UserAuthentication => "/user-authentication",
            Route::NotFound => "/404",
        }
    }

    /// Breadcrumb label.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::ProductCatalog => "Shop Sarees",
            Route::ProductDetail => "Product Details",
            Route::ShoppingCart => "Shopping Cart",
            Route::CheckoutProcess => "Checkout",
            Route::UserAuthentication => "Account",
            Route::NotFound => "Page Not Found",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::ProductCatalog => "ShoppingBag",
            Route::ProductDetail => "Eye",
            Route::ShoppingCart => "ShoppingCart",
            Route::CheckoutProcess => "CreditCard",
            Route::UserAuthentication => "User",
            Route::NotFound => "AlertTriangle",
        }
    }

    /// One-line blurb shown under the link in the mobile menu.
    pub fn description(&self) -> Option<&'static str> {
        match self {
            Route::Home => Some("Discover our latest collections"),
            Route::ProductCatalog => Some("Browse our premium saree collection"),
            Route::ShoppingCart => Some("View your selected items"),
            Route::CheckoutProcess => Some("Complete your purchase"),
            _ => None,
        }
    }

    /// Resolve a path, ignoring any query string or trailing slash.
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        if path.is_empty() {
            return Route::Home;
        }
        Route::ALL
            .into_iter()
            .find(|r| r.path() == path)
            .unwrap_or(Route::NotFound)
    }
}

/// Top navigation links.
pub const NAV_ITEMS: [Route; 2] = [Route::Home, Route::ProductCatalog];

/// Shortcuts listed below the navigation in the mobile menu.
pub const QUICK_ACTIONS: [Route; 2] = [Route::ShoppingCart, Route::CheckoutProcess];

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub label: String,
    pub path: String,
    pub icon: Option<String>,
}

impl Crumb {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    fn for_route(route: Route) -> Self {
        Crumb::new(route.label(), route.path()).with_icon(route.icon())
    }
}

/// Breadcrumbs for a path: Home followed by the matching route.
///
/// Returns `None` on the homepage, where no trail is shown. Unknown paths
/// get just the Home crumb.
pub fn breadcrumbs(path: &str) -> Option<Vec<Crumb>> {
    let mut crumbs = vec![Crumb::for_route(Route::Home)];
    match Route::from_path(path) {
        Route::Home => return None,
        Route::NotFound => {}
        route => crumbs.push(Crumb::for_route(route)),
    }
    Some(crumbs)
}

/// Trail used on the checkout page.
pub fn checkout_breadcrumbs() -> Vec<Crumb> {
    [Route::Home, Route::ShoppingCart, Route::CheckoutProcess]
        .into_iter()
        .map(Crumb::for_route)
        .collect()
}

/// Catalog link for the header search box. Blank queries go nowhere.
pub fn search_href(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(format!(
        "{}?search={}",
        Route::ProductCatalog.path(),
        urlencoding::encode(query)
    ))
}

/// Catalog link with one category preselected.
pub fn category_href(category: &str) -> String {
    format!(
        "{}?category={}",
        Route::ProductCatalog.path(),
        urlencoding::encode(category)
    )
}

/// Where to go after signing in: the `redirect` target, else the homepage.
pub fn redirect_target(redirect: Option<&str>) -> String {
    match redirect {
        Some(target) if target.starts_with('/') && !target.starts_with("//") => target.to_string(),
        _ => Route::Home.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_menu_entries_have_descriptions() {
        for route in NAV_ITEMS.into_iter().chain(QUICK_ACTIONS) {
            assert!(route.description().is_some(), "{:?}", route);
        }
        assert_eq!(QUICK_ACTIONS[0].label(), "Shopping Cart");
        assert_eq!(Route::UserAuthentication.description(), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path("/homepage"), Route::Home);
        assert_eq!(Route::from_path("/product-detail?id=3"), Route::ProductDetail);
        assert_eq!(Route::from_path("/shopping-cart/"), Route::ShoppingCart);
        assert_eq!(Route::from_path("/wishlist"), Route::NotFound);
    }

    #[test]
    fn test_breadcrumbs() {
        assert_eq!(breadcrumbs("/homepage"), None);

        let crumbs = breadcrumbs("/product-catalog?search=silk").unwrap();
        let labels: Vec<_> = crumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Home", "Shop Sarees"]);

        assert_eq!(breadcrumbs("/nowhere").unwrap().len(), 1);
        assert_eq!(checkout_breadcrumbs().last().unwrap().label, "Checkout");
    }

    #[test]
    fn test_search_href() {
        assert_eq!(search_href("   "), None);
        assert_eq!(
            search_href(" red silk ").as_deref(),
            Some("/product-catalog?search=red%20silk")
        );
    }

    #[test]
    fn test_redirect_target() {
        assert_eq!(redirect_target(Some("/checkout-process")), "/checkout-process");
        assert_eq!(redirect_target(None), "/homepage");
        assert_eq!(redirect_target(Some("https://evil.example")), "/homepage");
    }
}
