//! Run the checkout wizard end to end.

use anyhow::{anyhow, bail, Context as _, Result};
use saree_commerce::cart::Cart;
use saree_commerce::checkout::{
    saved_addresses, CardDetails, CheckoutFlow, CheckoutStep, DeliveryOption, GuestGate,
    PaymentMethod, ShippingAddress,
};
use saree_commerce::{Latency, Timer};

use super::{CheckoutArgs, PaymentArg};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut gate = GuestGate::for_store(&ctx.store);
    if !gate.is_open() {
        if !args.guest {
            bail!(
                "Sign in with `saree auth login` (the storefront sends you to {}) or pass --guest",
                gate.sign_in_url()
            );
        }
        gate.continue_as_guest();
        ctx.output.info("Continuing as guest");
    }

    let mut cart = Cart::load(&ctx.store).context("Failed to load cart")?;
    if cart.is_empty() {
        ctx.output
            .warn("Your cart is empty; checking out the sample order instead");
    }

    let spinner = ctx.output.spinner("Proceeding to checkout...");
    ctx.timer
        .sleep(Latency::duration(ctx.latency().checkout_redirect))
        .await;
    spinner.finish_and_clear();

    let mut flow = CheckoutFlow::from_cart(&cart);
    let total_steps = CheckoutStep::VISIBLE.len();

    // Shipping
    let address = shipping_address(&args)?;
    ctx.output.step(
        CheckoutStep::Shipping.number() as usize,
        total_steps,
        &format!("Shipping to {}", address.one_line()),
    );
    flow.set_shipping_address(address)?;
    flow.advance()?;

    // Delivery
    let delivery: DeliveryOption = args.delivery.parse()?;
    ctx.output.step(
        CheckoutStep::Delivery.number() as usize,
        total_steps,
        &format!(
            "{} ({}, {})",
            delivery.display_name(),
            delivery.estimated_days(),
            delivery.price().display_or_free()
        ),
    );
    flow.set_delivery_option(delivery);
    flow.advance()?;

    // Payment
    let payment = payment_method(&args)?;
    ctx.output.step(
        CheckoutStep::Payment.number() as usize,
        total_steps,
        &payment.summary(),
    );
    flow.set_payment_method(payment)?;
    flow.advance()?;

    // Review
    let totals = flow.totals()?;
    ctx.output.step(
        CheckoutStep::Review.number() as usize,
        total_steps,
        "Review your order",
    );
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output
        .kv("Delivery", &totals.delivery_charges.display_or_free());
    if !totals.cod_charges.is_zero() {
        ctx.output.kv("COD charges", &totals.cod_charges.display());
    }
    ctx.output.kv("GST (18%)", &totals.gst_amount.display());
    ctx.output.kv("Total", &totals.total.display());

    if !args.accept_terms {
        bail!("Please accept the terms and conditions (--accept-terms)");
    }
    flow.set_terms_accepted(true);

    let spinner = ctx.output.spinner("Processing your order...");
    let placed = flow.place_order(&ctx.timer, ctx.latency()).await;
    spinner.finish_and_clear();
    let order = placed?;

    if !cart.is_empty() {
        cart.clear();
        cart.persist(&ctx.store).context("Failed to clear cart")?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success("Order placed successfully!");
    ctx.output.kv("Order ID", order.order_id.as_str());
    ctx.output.kv("Items", &order.item_count().to_string());
    ctx.output.kv("Total paid", &order.totals.total.display());
    ctx.output.kv("Payment", &order.payment_method.summary());
    ctx.output
        .kv("Estimated delivery", &order.estimated_delivery_label());
    Ok(())
}

fn shipping_address(args: &CheckoutArgs) -> Result<ShippingAddress> {
    if let Some(ref name) = args.name {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        let mut address = ShippingAddress::new(
            name.clone(),
            field(&args.phone),
            field(&args.line1),
            field(&args.city),
            field(&args.state),
            field(&args.pin),
        );
        if let Some(ref line2) = args.line2 {
            address = address.with_line2(line2.clone());
        }
        return Ok(address);
    }

    let addresses = saved_addresses();
    args.address
        .checked_sub(1)
        .and_then(|index| addresses.get(index).cloned())
        .ok_or_else(|| {
            anyhow!(
                "No saved address #{} (there are {})",
                args.address,
                addresses.len()
            )
        })
}

fn payment_method(args: &CheckoutArgs) -> Result<PaymentMethod> {
    let method = match args.payment {
        PaymentArg::Card => PaymentMethod::Card(CardDetails {
            card_number: args.card_number.clone().unwrap_or_default(),
            expiry_date: args.expiry.clone().unwrap_or_default(),
            cvv: args.cvv.clone().unwrap_or_default(),
            cardholder_name: args.cardholder.clone().unwrap_or_default(),
        }),
        PaymentArg::Upi => PaymentMethod::Upi {
            upi_id: args
                .upi_id
                .clone()
                .ok_or_else(|| anyhow!("--upi-id is required for UPI payments"))?,
        },
        PaymentArg::Netbanking => PaymentMethod::NetBanking {
            bank: args.bank.clone(),
        },
        PaymentArg::Wallet => PaymentMethod::Wallet {
            provider: args.wallet.clone(),
        },
        PaymentArg::Cod => PaymentMethod::Cod,
    };
    Ok(method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CheckoutArgs,
    }

    fn parse(argv: &[&str]) -> CheckoutArgs {
        let mut full = vec!["checkout"];
        full.extend_from_slice(argv);
        Harness::parse_from(full).args
    }

    #[test]
    fn test_saved_address_selection() {
        let args = parse(&["--address", "2"]);
        let address = shipping_address(&args).unwrap();
        assert_eq!(address.pin_code, "400051");
        assert!(shipping_address(&parse(&["--address", "0"])).is_err());
        assert!(shipping_address(&parse(&["--address", "3"])).is_err());
    }

    #[test]
    fn test_new_address() {
        let args = parse(&[
            "--name", "Anita Rao", "--phone", "9876543210", "--line1", "12 Park Street",
            "--city", "Kolkata", "--state", "West Bengal", "--pin", "700016",
        ]);
        let address = shipping_address(&args).unwrap();
        assert!(address.validate().is_ok());
    }

    #[test]
    fn test_payment_method() {
        let upi = payment_method(&parse(&["--payment", "upi", "--upi-id", "priya@okicici"]));
        assert!(matches!(upi, Ok(PaymentMethod::Upi { .. })));
        assert!(payment_method(&parse(&["--payment", "upi"])).is_err());
        assert_eq!(payment_method(&parse(&[])).unwrap(), PaymentMethod::Cod);
    }
}
