//! Catalog query: search text, filters and sort.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::search::{FilterGroup, Filters};
use serde::{Deserialize, Serialize};

/// Sort options for the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep catalog order.
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceLowHigh,
    /// Sort by price, high to low.
    PriceHighLow,
    /// New arrivals first.
    Newest,
    /// Sort by highest rated.
    Rating,
    /// Most reviewed first.
    Popularity,
    /// Highest percentage off first.
    Discount,
}

impl SortOption {
    pub const ALL: [SortOption; 7] = [
        SortOption::Relevance,
        SortOption::PriceLowHigh,
        SortOption::PriceHighLow,
        SortOption::Newest,
        SortOption::Rating,
        SortOption::Popularity,
        SortOption::Discount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceLowHigh => "price-low-high",
            SortOption::PriceHighLow => "price-high-low",
            SortOption::Newest => "newest",
            SortOption::Rating => "rating",
            SortOption::Popularity => "popularity",
            SortOption::Discount => "discount",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Best Match",
            SortOption::PriceLowHigh => "Price: Low to High",
            SortOption::PriceHighLow => "Price: High to Low",
            SortOption::Newest => "Newest Arrivals",
            SortOption::Rating => "Customer Rating",
            SortOption::Popularity => "Most Popular",
            SortOption::Discount => "Highest Discount",
        }
    }

    /// Sort in place. Equal elements keep their catalog order.
    pub fn sort(&self, products: &mut [Product]) {
        match self {
            SortOption::Relevance => {}
            SortOption::PriceLowHigh => products.sort_by_key(|p| p.price),
            SortOption::PriceHighLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOption::Newest => products.sort_by_key(|p| !p.is_new),
            SortOption::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOption::Popularity => products.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
            SortOption::Discount => {
                products.sort_by(|a, b| b.discount_percent().cmp(&a.discount_percent()))
            }
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| format!("unknown sort option '{}'", s))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Everything that shapes the catalog grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Substring matched against name and category.
    pub search: String,
    pub filters: Filters,
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, group: FilterGroup, value: impl Into<String>) -> Self {
        self.filters.add(group, value);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Build a query from decoded URL parameters.
    ///
    /// `search` sets the text and `category` preselects one category. Other
    /// parameters are ignored.
    pub fn from_params<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::new();
        for (key, value) in params {
            match key {
                "search" => query.search = value.to_string(),
                "category" if !value.is_empty() => {
                    query.filters.set(FilterGroup::Category, vec![value.to_string()])
                }
                _ => {}
            }
        }
        query
    }

    /// Filter then sort.
    ///
    /// The result is always a subset of `products`; with no search and no
    /// filters it is the full list in catalog order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let search = self.search.trim();
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| search.is_empty() || p.matches_search(search))
            .filter(|p| self.filters.matches(p))
            .cloned()
            .collect();
        self.sort.sort(&mut matched);
        tracing::debug!(
            search,
            filters = self.filters.active_count(),
            sort = self.sort.as_str(),
            matched = matched.len(),
            "catalog query"
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::products;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let all = products();
        assert_eq!(CatalogQuery::new().apply(&all), all);
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let result = CatalogQuery::new().with_search("kanjivaram").apply(&products());
        assert_eq!(ids(&result), vec!["2"]);

        let result = CatalogQuery::new().with_search("SILK").apply(&products());
        assert!(result.iter().all(|p| p.matches_search("silk")));
        assert!(!result.is_empty());
    }

    #[test]
    fn test_price_sorts() {
        let result = CatalogQuery::new()
            .with_sort(SortOption::PriceLowHigh)
            .apply(&products());
        assert!(result.windows(2).all(|w| w[0].price <= w[1].price));

        let result = CatalogQuery::new()
            .with_sort(SortOption::PriceHighLow)
            .apply(&products());
        assert!(result.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_newest_is_stable() {
        let result = CatalogQuery::new().with_sort(SortOption::Newest).apply(&products());
        let new_ids: Vec<_> = result.iter().filter(|p| p.is_new).map(|p| p.id.as_str()).collect();
        assert_eq!(new_ids, vec!["1", "3", "6", "8"]);
        assert!(result[..4].iter().all(|p| p.is_new));
    }

    #[test]
    fn test_rating_and_popularity() {
        let result = CatalogQuery::new().with_sort(SortOption::Rating).apply(&products());
        assert!(result.windows(2).all(|w| w[0].rating >= w[1].rating));

        let result = CatalogQuery::new().with_sort(SortOption::Popularity).apply(&products());
        assert_eq!(result[0].id.as_str(), "3");
    }

    #[test]
    fn test_discount_sort() {
        let result = CatalogQuery::new().with_sort(SortOption::Discount).apply(&products());
        assert!(result
            .windows(2)
            .all(|w| w[0].discount_percent() >= w[1].discount_percent()));
    }

    #[test]
    fn test_result_is_subset() {
        let all = products();
        let result = CatalogQuery::new()
            .with_filter(FilterGroup::Occasion, "party")
            .with_sort(SortOption::Rating)
            .apply(&all);
        assert!(result.iter().all(|p| all.contains(p)));
        assert!(result.len() < all.len());
    }

    #[test]
    fn test_from_params() {
        let query = CatalogQuery::from_params([("search", "silk"), ("category", "banarasi"), ("page", "2")]);
        assert_eq!(query.search, "silk");
        assert_eq!(query.filters.values(FilterGroup::Category), ["banarasi".to_string()]);

        let query = CatalogQuery::from_params([("category", "")]);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("price-low-high".parse::<SortOption>().unwrap(), SortOption::PriceLowHigh);
        assert!("cheapest".parse::<SortOption>().is_err());
        assert_eq!(SortOption::default().display_name(), "Best Match");
    }
}
