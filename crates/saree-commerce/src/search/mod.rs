//! Search module.
//!
//! Contains catalog filters, sorting and the results grid state.

mod filter;
mod query;
mod results;

pub use filter::{FilterGroup, FilterOption, Filters, PriceRange};
pub use query::{CatalogQuery, SortOption};
pub use results::{CatalogResults, LoadMore};
