//! Cart management against the persisted store.

use anyhow::{anyhow, Context as _, Result};
use saree_commerce::cart::{seeded_cart, Cart, CartItem};
use saree_commerce::catalog::product_detail;
use saree_commerce::{Latency, ProductId, Timer};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{price_with_original, stock_badge};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = Cart::load(&ctx.store).context("Failed to load cart")?;

    let command = args.command.unwrap_or(CartCommand::Show);
    let changed = match command {
        CartCommand::Show => {
            let spinner = ctx.output.spinner("Loading your cart...");
            ctx.timer
                .sleep(Latency::duration(ctx.latency().cart_load))
                .await;
            spinner.finish_and_clear();
            false
        }
        CartCommand::Add { id, size, quantity } => {
            let id = ProductId::new(id.trim());
            let detail =
                product_detail(&id).ok_or_else(|| anyhow!("Product '{}' not found", id))?;
            let item = CartItem::from_detail(&detail, size.as_deref(), quantity)?;
            let name = item.name.clone();
            let total = cart.add_item(item)?;
            ctx.output
                .success(&format!("Added {} to cart (quantity {})", name, total));
            true
        }
        CartCommand::Inc { id } => {
            let quantity = cart.increment(&ProductId::new(id))?;
            ctx.output.success(&format!("Quantity is now {}", quantity));
            true
        }
        CartCommand::Dec { id } => {
            let quantity = cart.decrement(&ProductId::new(id))?;
            ctx.output.success(&format!("Quantity is now {}", quantity));
            true
        }
        CartCommand::Set { id, quantity } => {
            let quantity = cart.set_quantity(&ProductId::new(id), quantity)?;
            ctx.output.success(&format!("Quantity is now {}", quantity));
            true
        }
        CartCommand::Remove { id } => {
            let id = ProductId::new(id);
            if !cart.remove_item(&id) {
                return Err(anyhow!("Item not in cart: {}", id));
            }
            ctx.output.success("Item removed from cart");
            true
        }
        CartCommand::Save { id } => {
            cart.save_for_later(&ProductId::new(id))?;
            ctx.output.success("Item saved for later");
            true
        }
        CartCommand::Restore { id } => {
            cart.move_to_cart(&ProductId::new(id))?;
            ctx.output.success("Item moved to cart");
            true
        }
        CartCommand::Promo { code, remove } => {
            if remove {
                match cart.remove_promo() {
                    Some(code) => ctx.output.success(&format!("Removed promo code {}", code)),
                    None => ctx.output.info("No promo code applied"),
                }
            } else {
                let code = code.ok_or_else(|| anyhow!("Please enter a promo code"))?;
                let spinner = ctx.output.spinner("Applying promo code...");
                let applied = cart
                    .apply_promo(&code, &ctx.timer, ctx.latency())
                    .await;
                spinner.finish_and_clear();
                let applied = applied?;
                ctx.output.success(&format!(
                    "Promo code {} applied: {}",
                    applied,
                    applied.description()
                ));
            }
            true
        }
        CartCommand::Clear => {
            cart.clear();
            ctx.output.success("Cart cleared");
            true
        }
        CartCommand::Seed => {
            cart = seeded_cart();
            ctx.output.success("Loaded the demo cart");
            true
        }
    };

    if changed {
        cart.persist(&ctx.store).context("Failed to save cart")?;
    }
    show(&cart, ctx)
}

fn show(cart: &Cart, ctx: &Context) -> Result<()> {
    let summary = cart.summary()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items,
            "saved": cart.saved,
            "summary": summary,
        }));
        return Ok(());
    }

    ctx.output
        .header(&format!("Shopping Cart ({} items)", summary.item_count));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty. Browse the catalog to add sarees.");
    } else {
        let widths = [4, 36, 24, 6, 12, 14];
        ctx.output
            .table_row(&["ID", "NAME", "PRICE", "QTY", "TOTAL", "STOCK"], &widths);
        for item in &cart.items {
            let line_total = item.line_total()?.display();
            let quantity = format!("{}/{}", item.quantity, item.max_quantity);
            ctx.output.table_row(
                &[
                    item.id.as_str(),
                    &item.name,
                    &price_with_original(item.price, item.original_price),
                    &quantity,
                    &line_total,
                    &stock_badge(item.stock_status),
                ],
                &widths,
            );
        }
    }

    if !cart.saved.is_empty() {
        ctx.output.header("Saved for Later");
        for item in &cart.saved {
            ctx.output.list_item(&format!(
                "[{}] {} {}",
                item.id,
                item.name,
                price_with_original(item.price, item.original_price)
            ));
        }
    }

    if cart.is_empty() {
        return Ok(());
    }

    ctx.output.header("Order Summary");
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    if let Some(ref code) = summary.promo_code {
        ctx.output
            .kv(&format!("Discount ({})", code), &format!("-{}", summary.discount.display()));
    }
    ctx.output.kv("Shipping", &summary.shipping.display_or_free());
    ctx.output.kv("GST (18%)", &summary.tax.display());
    ctx.output.kv("Total", &summary.total.display());
    if let Some(more) = summary.amount_to_free_shipping() {
        ctx.output
            .info(&format!("Add {} more for free shipping", more.display()));
    }
    let savings = cart.savings();
    if !savings.is_zero() {
        ctx.output
            .success(&format!("You save {} on this order", savings.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use saree_store::keys;

    async fn cart(ctx: &Context, command: CartCommand) -> Result<()> {
        run(CartArgs { command: Some(command) }, ctx).await
    }

    #[tokio::test]
    async fn test_add_persists_count() {
        let ctx = Context::for_tests();
        cart(&ctx, CartCommand::Add { id: "1".into(), size: Some("free".into()), quantity: 2 })
            .await
            .unwrap();
        cart(&ctx, CartCommand::Inc { id: "1".into() }).await.unwrap();

        assert_eq!(ctx.store.cart_count(), 3);
        assert_eq!(ctx.store.get_item(keys::CART_COUNT).unwrap().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_unknown_product_fails() {
        let ctx = Context::for_tests();
        let err = cart(&ctx, CartCommand::Add { id: "999".into(), size: None, quantity: 1 })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(ctx.store.cart_count(), 0);
    }

    #[tokio::test]
    async fn test_promo_and_clear() {
        let ctx = Context::for_tests();
        cart(&ctx, CartCommand::Seed).await.unwrap();
        cart(&ctx, CartCommand::Promo { code: Some(" save10 ".into()), remove: false })
            .await
            .unwrap();
        assert!(Cart::load(&ctx.store).unwrap().promo.is_some());

        assert!(cart(&ctx, CartCommand::Promo { code: Some("BOGUS".into()), remove: false })
            .await
            .is_err());

        cart(&ctx, CartCommand::Clear).await.unwrap();
        assert!(Cart::load(&ctx.store).unwrap().is_empty());
        assert_eq!(ctx.store.cart_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_missing_line() {
        let ctx = Context::for_tests();
        assert!(cart(&ctx, CartCommand::Remove { id: "1".into() }).await.is_err());
    }
}
