//! Catalog filter groups and selections.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A filter panel section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterGroup {
    Category,
    Price,
    Fabric,
    Color,
    Occasion,
}

/// One checkbox in a filter section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    /// Swatch colour for the color group.
    pub swatch: Option<&'static str>,
}

const fn opt(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption {
        value,
        label,
        swatch: None,
    }
}

const fn swatch(value: &'static str, label: &'static str, hex: &'static str) -> FilterOption {
    FilterOption {
        value,
        label,
        swatch: Some(hex),
    }
}

const CATEGORY_OPTIONS: &[FilterOption] = &[
    opt("silk", "Silk Sarees"),
    opt("cotton", "Cotton Sarees"),
    opt("chiffon", "Chiffon Sarees"),
    opt("georgette", "Georgette Sarees"),
    opt("banarasi", "Banarasi Sarees"),
    opt("kanjivaram", "Kanjivaram Sarees"),
    opt("designer", "Designer Sarees"),
];

const PRICE_OPTIONS: &[FilterOption] = &[
    opt("0-2000", "Under ₹2,000"),
    opt("2000-5000", "₹2,000 - ₹5,000"),
    opt("5000-10000", "₹5,000 - ₹10,000"),
    opt("10000-20000", "₹10,000 - ₹20,000"),
    opt("20000-50000", "₹20,000 - ₹50,000"),
    opt("50000+", "Above ₹50,000"),
];

const FABRIC_OPTIONS: &[FilterOption] = &[
    opt("pure-silk", "Pure Silk"),
    opt("art-silk", "Art Silk"),
    opt("cotton-silk", "Cotton Silk"),
    opt("handloom", "Handloom"),
    opt("linen", "Linen"),
    opt("crepe", "Crepe"),
    opt("georgette", "Georgette"),
    opt("chiffon", "Chiffon"),
];

const COLOR_OPTIONS: &[FilterOption] = &[
    swatch("red", "Red", "#DC2626"),
    swatch("blue", "Blue", "#2563EB"),
    swatch("green", "Green", "#16A34A"),
    swatch("pink", "Pink", "#EC4899"),
    swatch("yellow", "Yellow", "#EAB308"),
    swatch("purple", "Purple", "#9333EA"),
    swatch("orange", "Orange", "#EA580C"),
    swatch("black", "Black", "#000000"),
    swatch("white", "White", "#FFFFFF"),
    swatch("gold", "Gold", "#D4AF37"),
];

const OCCASION_OPTIONS: &[FilterOption] = &[
    opt("wedding", "Wedding"),
    opt("festival", "Festival"),
    opt("party", "Party"),
    opt("casual", "Casual"),
    opt("office", "Office Wear"),
    opt("traditional", "Traditional"),
];

impl FilterGroup {
    pub const ALL: [FilterGroup; 5] = [
        FilterGroup::Category,
        FilterGroup::Price,
        FilterGroup::Fabric,
        FilterGroup::Color,
        FilterGroup::Occasion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterGroup::Category => "category",
            FilterGroup::Price => "price",
            FilterGroup::Fabric => "fabric",
            FilterGroup::Color => "color",
            FilterGroup::Occasion => "occasion",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FilterGroup::Category => "Category",
            FilterGroup::Price => "Price Range",
            FilterGroup::Fabric => "Fabric",
            FilterGroup::Color => "Color",
            FilterGroup::Occasion => "Occasion",
        }
    }

    pub fn options(&self) -> &'static [FilterOption] {
        match self {
            FilterGroup::Category => CATEGORY_OPTIONS,
            FilterGroup::Price => PRICE_OPTIONS,
            FilterGroup::Fabric => FABRIC_OPTIONS,
            FilterGroup::Color => COLOR_OPTIONS,
            FilterGroup::Occasion => OCCASION_OPTIONS,
        }
    }

    /// Label for an option value, falling back to the value itself.
    pub fn label_for<'a>(&self, value: &'a str) -> &'a str {
        self.options()
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label)
            .unwrap_or(value)
    }

    /// Whether a product passes this group for one selected value.
    fn matches(&self, product: &Product, value: &str) -> bool {
        match self {
            FilterGroup::Category => product.category == value,
            FilterGroup::Price => match value.parse::<PriceRange>() {
                Ok(range) => range.contains(product.price),
                Err(_) => {
                    tracing::warn!(value, "ignoring unparseable price range");
                    false
                }
            },
            FilterGroup::Fabric => product.fabric == value,
            FilterGroup::Color => product.colors.iter().any(|c| c == value),
            FilterGroup::Occasion => product.occasions.iter().any(|o| o == value),
        }
    }
}

impl FromStr for FilterGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown filter group '{}'", s))
    }
}

impl fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A price filter value: `"min-max"` (inclusive) or `"min+"` (open-ended).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Money,
    pub max: Option<Money>,
}

impl PriceRange {
    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

impl FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<i64>()
                .map(Money::new)
                .map_err(|_| format!("invalid price range '{}'", s))
        };

        if let Some(min) = s.strip_suffix('+') {
            return Ok(Self {
                min: parse(min)?,
                max: None,
            });
        }

        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid price range '{}'", s))?;
        let range = Self {
            min: parse(min)?,
            max: Some(parse(max)?),
        };
        if range.max.is_some_and(|max| max < range.min) {
            return Err(format!("invalid price range '{}'", s));
        }
        Ok(range)
    }
}

/// Selected filter values per group.
///
/// Within a group any selected value may match; across groups every
/// non-empty group must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    selected: BTreeMap<FilterGroup, Vec<String>>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, group: FilterGroup, value: impl Into<String>) -> Self {
        self.add(group, value);
        self
    }

    /// Select a value. Selecting twice has no effect.
    pub fn add(&mut self, group: FilterGroup, value: impl Into<String>) {
        let value = value.into();
        let values = self.selected.entry(group).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }

    /// Flip a checkbox.
    pub fn toggle(&mut self, group: FilterGroup, value: &str) {
        if self.is_selected(group, value) {
            self.remove(group, value);
        } else {
            self.add(group, value);
        }
    }

    /// Replace a group's selection.
    pub fn set(&mut self, group: FilterGroup, values: Vec<String>) {
        if values.is_empty() {
            self.selected.remove(&group);
        } else {
            self.selected.insert(group, values);
        }
    }

    pub fn remove(&mut self, group: FilterGroup, value: &str) {
        if let Some(values) = self.selected.get_mut(&group) {
            values.retain(|v| v != value);
            if values.is_empty() {
                self.selected.remove(&group);
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn values(&self, group: FilterGroup) -> &[String] {
        self.selected.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_selected(&self, group: FilterGroup, value: &str) -> bool {
        self.values(group).iter().any(|v| v == value)
    }

    /// Number of selected values across all groups.
    pub fn active_count(&self) -> usize {
        self.selected.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// `(group, value, label)` for each active chip, in group order.
    pub fn chips(&self) -> Vec<(FilterGroup, String, String)> {
        self.selected
            .iter()
            .flat_map(|(group, values)| {
                values
                    .iter()
                    .map(move |v| (*group, v.clone(), group.label_for(v).to_string()))
            })
            .collect()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.selected
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .all(|(group, values)| values.iter().any(|v| group.matches(product, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::products;

    #[test]
    fn test_price_range_parse() {
        let range: PriceRange = "2000-5000".parse().unwrap();
        assert!(range.contains(Money::new(2000)));
        assert!(range.contains(Money::new(5000)));
        assert!(!range.contains(Money::new(5001)));

        let open: PriceRange = "50000+".parse().unwrap();
        assert_eq!(open.max, None);
        assert!(open.contains(Money::new(1_00_000)));

        assert!("cheap".parse::<PriceRange>().is_err());
        assert!("5000-2000".parse::<PriceRange>().is_err());
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = Filters::new();
        assert!(products().iter().all(|p| filters.matches(p)));
    }

    #[test]
    fn test_or_within_and_across_groups() {
        let filters = Filters::new()
            .with(FilterGroup::Category, "banarasi")
            .with(FilterGroup::Category, "cotton");
        let matched: Vec<_> = products().into_iter().filter(|p| filters.matches(p)).collect();
        assert_eq!(matched.len(), 3);

        let filters = filters.with(FilterGroup::Price, "0-5000");
        let matched: Vec<_> = products().into_iter().filter(|p| filters.matches(p)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.as_str(), "4");
    }

    #[test]
    fn test_attribute_groups() {
        let filters = Filters::new().with(FilterGroup::Color, "gold");
        let ids: Vec<_> = products()
            .into_iter()
            .filter(|p| filters.matches(p))
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_invalid_price_matches_nothing() {
        let filters = Filters::new().with(FilterGroup::Price, "abc");
        assert!(products().iter().all(|p| !filters.matches(p)));
    }

    #[test]
    fn test_toggle_and_count() {
        let mut filters = Filters::new();
        filters.toggle(FilterGroup::Fabric, "pure-silk");
        filters.toggle(FilterGroup::Occasion, "party");
        filters.add(FilterGroup::Occasion, "party");
        assert_eq!(filters.active_count(), 2);

        filters.toggle(FilterGroup::Fabric, "pure-silk");
        assert_eq!(filters.active_count(), 1);
        assert_eq!(
            filters.chips(),
            vec![(FilterGroup::Occasion, "party".to_string(), "Party".to_string())]
        );

        filters.clear();
        assert!(filters.is_empty());
    }
}
