//! Catalog listing.

use anyhow::{anyhow, Result};
use saree_commerce::catalog::products;
use saree_commerce::search::{CatalogQuery, CatalogResults, FilterGroup, SortOption};
use saree_commerce::{Latency, Timer};

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{price_with_original, stars};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    if args.options {
        return list_options(ctx);
    }

    let query = build_query(&args)?;

    let spinner = ctx.output.spinner("Loading sarees...");
    ctx.timer
        .sleep(Latency::duration(ctx.latency().catalog_load))
        .await;
    let results = CatalogResults::new(&query, &products());
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&results.items);
        return Ok(());
    }

    ctx.output.header("Shop Sarees");
    for (group, _, label) in query.filters.chips() {
        ctx.output.kv(group.title(), &label);
    }
    ctx.output.kv("Sort", query.sort.display_name());

    if results.is_empty() {
        ctx.output.info("No products found. Try adjusting your search or filters.");
        return Ok(());
    }

    ctx.output.info(&results.count_label());
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "RATING"], &[4, 40, 24, 12]);
    for product in &results.items {
        let name = if product.is_new {
            format!("{} [NEW]", product.name)
        } else {
            product.name.clone()
        };
        let price = price_with_original(product.price, product.original_price);
        let rating = format!("{} ({})", stars(product.rating), product.review_count);
        ctx.output
            .table_row(&[product.id.as_str(), &name, &price, &rating], &[4, 40, 24, 12]);
    }

    Ok(())
}

fn build_query(args: &CatalogArgs) -> Result<CatalogQuery> {
    let sort: SortOption = args.sort.parse().map_err(|e: String| anyhow!(e))?;
    let mut query = CatalogQuery::new().with_sort(sort);
    if let Some(ref search) = args.search {
        query = query.with_search(search.clone());
    }

    let groups = [
        (FilterGroup::Category, &args.category),
        (FilterGroup::Price, &args.price),
        (FilterGroup::Fabric, &args.fabric),
        (FilterGroup::Color, &args.color),
        (FilterGroup::Occasion, &args.occasion),
    ];
    for (group, values) in groups {
        for value in values {
            query = query.with_filter(group, value.clone());
        }
    }
    Ok(query)
}

fn list_options(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        let groups: Vec<_> = FilterGroup::ALL
            .iter()
            .map(|group| {
                let values: Vec<_> = group.options().iter().map(|o| o.value).collect();
                serde_json::json!({ "group": group.as_str(), "options": values })
            })
            .collect();
        ctx.output.json(&groups);
        return Ok(());
    }

    for group in FilterGroup::ALL {
        ctx.output.header(group.title());
        for option in group.options() {
            ctx.output
                .list_item(&format!("{} ({})", option.label, option.value));
        }
    }
    ctx.output.header("Sort");
    for sort in SortOption::ALL {
        ctx.output
            .list_item(&format!("{} ({})", sort.display_name(), sort.as_str()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CatalogArgs {
        CatalogArgs {
            search: None,
            category: Vec::new(),
            price: Vec::new(),
            fabric: Vec::new(),
            color: Vec::new(),
            occasion: Vec::new(),
            sort: "relevance".to_string(),
            options: false,
        }
    }

    #[test]
    fn test_build_query() {
        let mut a = args();
        a.category = vec!["silk".into(), "cotton".into()];
        a.sort = "price-low-high".into();
        let query = build_query(&a).unwrap();
        assert_eq!(query.filters.values(FilterGroup::Category), ["silk", "cotton"]);
        assert_eq!(query.sort, SortOption::PriceLowHigh);

        a.sort = "cheapest".into();
        assert!(build_query(&a).is_err());
    }
}
