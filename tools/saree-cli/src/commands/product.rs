//! Product detail.

use anyhow::{bail, Result};
use saree_commerce::catalog::{product_detail, related_products};
use saree_commerce::{Latency, ProductId, Timer};

use super::ProductArgs;
use crate::context::Context;
use crate::output::{price_with_original, stars};

/// How many related products the detail page shows.
const RELATED_LIMIT: usize = 4;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id.trim());

    let spinner = ctx.output.spinner("Loading product...");
    ctx.timer
        .sleep(Latency::duration(ctx.latency().product_load))
        .await;
    spinner.finish_and_clear();

    let Some(detail) = product_detail(&id) else {
        bail!("Product '{}' not found", id);
    };
    let related = if args.related {
        related_products(&id, RELATED_LIMIT)
    } else {
        Vec::new()
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": detail,
            "related": related,
        }));
        return Ok(());
    }

    let product = &detail.product;
    ctx.output.header(&product.name);
    ctx.output.kv("Brand", &detail.brand);
    ctx.output.kv(
        "Price",
        &format!(
            "{} ({}% off)",
            price_with_original(product.price, product.original_price),
            product.discount_percent()
        ),
    );
    ctx.output.kv(
        "Rating",
        &format!(
            "{} {:.1} ({} reviews)",
            stars(product.rating),
            product.rating,
            product.review_count
        ),
    );
    ctx.output.kv("Fabric", &product.fabric);
    if let Some(message) = detail.stock_message() {
        ctx.output.warn(&message);
    }

    let sizes: Vec<String> = detail
        .sizes
        .iter()
        .map(|s| {
            if s.available {
                format!("{} ({})", s.label, s.value)
            } else {
                format!("{} (unavailable)", s.label)
            }
        })
        .collect();
    ctx.output.kv("Sizes", &sizes.join(", "));
    ctx.output
        .kv("Max per order", &detail.max_orderable().to_string());

    ctx.output.header("Description");
    ctx.output.info(&product.description);
    if let Some(ref significance) = detail.cultural_significance {
        ctx.output.info(significance);
    }

    ctx.output.header("Specifications");
    for (label, value) in &detail.specifications {
        ctx.output.kv(label, value);
    }

    ctx.output.header("Care Instructions");
    for instruction in &detail.care_instructions {
        ctx.output.list_item(instruction);
    }

    if args.reviews {
        ctx.output.header(&format!(
            "Reviews ({:.1} average)",
            detail.average_rating()
        ));
        for review in &detail.reviews {
            let verified = if review.verified { " ✓ verified" } else { "" };
            ctx.output.list_item(&format!(
                "{} {} on {}{}",
                stars(review.rating as f32),
                review.user_name,
                review.date,
                verified
            ));
            ctx.output.info(&review.comment);
        }
    }

    if !related.is_empty() {
        ctx.output.header("You May Also Like");
        for product in &related {
            ctx.output.list_item(&format!(
                "[{}] {} {}",
                product.id,
                product.name,
                product.price.display()
            ));
        }
    }

    Ok(())
}
