//! Catalog results and "load more".

use crate::catalog::Product;
use crate::delay::{Latency, Timer};
use crate::search::CatalogQuery;
use serde::{Deserialize, Serialize};

/// The catalog grid's single-shot "load more" control.
///
/// The first load succeeds and disables the control; later calls do
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadMore {
    /// Current page (1-indexed).
    pub page: u32,
    pub has_more: bool,
}

impl Default for LoadMore {
    fn default() -> Self {
        Self {
            page: 1,
            has_more: true,
        }
    }
}

impl LoadMore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the next page. Returns whether anything was loaded.
    pub async fn load(&mut self, timer: &dyn Timer, latency: &Latency) -> bool {
        if !self.has_more {
            return false;
        }
        timer.sleep(Latency::duration(latency.load_more)).await;
        self.page += 1;
        self.has_more = false;
        tracing::debug!(page = self.page, "loaded more products");
        true
    }
}

/// Catalog results container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogResults {
    /// The result items.
    pub items: Vec<Product>,
    /// Size of the unfiltered catalog.
    pub total: usize,
    pub load_more: LoadMore,
}

impl CatalogResults {
    pub fn new(query: &CatalogQuery, catalog: &[Product]) -> Self {
        Self {
            items: query.apply(catalog),
            total: catalog.len(),
            load_more: LoadMore::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `"8 products found"`.
    pub fn count_label(&self) -> String {
        match self.items.len() {
            1 => "1 product found".to_string(),
            n => format!("{} products found", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::products;
    use crate::delay::NoDelay;
    use crate::search::{FilterGroup, SortOption};

    #[tokio::test]
    async fn test_load_more_only_once() {
        let mut load_more = LoadMore::new();
        assert!(load_more.load(&NoDelay, &Latency::instant()).await);
        assert_eq!(load_more.page, 2);
        assert!(!load_more.has_more);

        assert!(!load_more.load(&NoDelay, &Latency::instant()).await);
        assert_eq!(load_more.page, 2);
    }

    #[test]
    fn test_count_label() {
        let catalog = products();
        let results = CatalogResults::new(&CatalogQuery::new(), &catalog);
        assert_eq!(results.count_label(), "8 products found");

        let query = CatalogQuery::new()
            .with_filter(FilterGroup::Category, "kanjivaram")
            .with_sort(SortOption::Rating);
        let results = CatalogResults::new(&query, &catalog);
        assert_eq!(results.count_label(), "1 product found");
        assert_eq!(results.total, 8);
    }
}
