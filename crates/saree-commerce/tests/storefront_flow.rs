//! End-to-end storefront flows over a shared store.
//!
//! These drive the catalog, cart and checkout together the way the pages do,
//! and check what other components observe through the store.

use std::sync::{Arc, Mutex};

use saree_commerce::catalog::{product_detail, products};
use saree_commerce::prelude::*;
use saree_store::{badge_text, keys, SharedStore};

#[test]
fn add_from_detail_page_updates_badge() {
    let store = SharedStore::in_memory();
    let counts = Arc::new(Mutex::new(Vec::new()));
    let seen = counts.clone();
    store.subscribe(move |event| {
        if event.key == keys::CART_COUNT {
            seen.lock().unwrap().push(event.value.clone());
        }
    });

    let detail = product_detail(&ProductId::new("2")).unwrap();
    let mut cart = Cart::load(&store).unwrap();
    cart.add_item(CartItem::from_detail(&detail, Some("free"), 2).unwrap())
        .unwrap();
    cart.persist(&store).unwrap();

    assert_eq!(store.cart_count(), 2);
    assert_eq!(badge_text(store.cart_count()).as_deref(), Some("2"));
    assert_eq!(*counts.lock().unwrap(), vec![Some("2".to_string())]);
}

#[test]
fn filtered_catalog_is_subset() {
    let all = products();
    let query = CatalogQuery::new()
        .with_search("saree")
        .with_filter(FilterGroup::Price, "5000-10000")
        .with_filter(FilterGroup::Occasion, "party")
        .with_sort(SortOption::PriceHighLow);
    let result = query.apply(&all);

    assert!(!result.is_empty());
    assert!(result.iter().all(|p| all.contains(p)));
    assert!(result
        .iter()
        .all(|p| p.price >= Money::new(5000) && p.price <= Money::new(10000)));
    assert_eq!(CatalogQuery::new().apply(&all), all);
}

#[tokio::test]
async fn checkout_worked_example() {
    let store = SharedStore::in_memory();
    let mut cart = Cart::new();
    cart.add_item(CartItem::new("1", "Banarasi Silk Saree - Royal Blue", Money::new(12999), 5))
        .unwrap();
    cart.add_item(CartItem::new("2", "Kanjivaram Silk Saree - Maroon", Money::new(8999), 5))
        .unwrap();
    cart.persist(&store).unwrap();

    let mut flow = CheckoutFlow::from_cart(&Cart::load(&store).unwrap());
    assert!(flow.advance().is_err());

    flow.set_shipping_address(ShippingAddress::new(
        "Priya Sharma",
        "+91 98765 43210",
        "123 MG Road",
        "Mumbai",
        "Maharashtra",
        "400001",
    ))
    .unwrap();
    flow.advance().unwrap();
    flow.set_delivery_option(DeliveryOption::Standard);
    flow.advance().unwrap();
    flow.set_payment_method(PaymentMethod::Upi {
        upi_id: "priya@okicici".to_string(),
    })
    .unwrap();
    flow.advance().unwrap();
    assert_eq!(flow.step(), CheckoutStep::Review);

    let totals = flow.totals().unwrap();
    assert_eq!(totals.subtotal, Money::new(21998));
    assert_eq!(totals.gst_amount, Money::new(3960));
    assert_eq!(totals.total, Money::new(25958));

    flow.set_terms_accepted(true);
    let order = flow.place_order(&NoDelay, &Latency::instant()).await.unwrap();
    assert_eq!(order.totals.total.display(), "₹25,958");
    assert_eq!(flow.step(), CheckoutStep::Success);
}

#[tokio::test]
async fn promo_survives_reload() {
    let store = SharedStore::in_memory();
    let mut cart = saree_commerce::cart::seeded_cart();
    cart.apply_promo(" first20 ", &NoDelay, &Latency::instant())
        .await
        .unwrap();
    cart.persist(&store).unwrap();

    let reloaded = Cart::load(&store).unwrap();
    let summary = reloaded.summary().unwrap();
    assert_eq!(summary.promo_code.as_deref(), Some("FIRST20"));
    assert_eq!(summary.discount, Money::new(3660));
    assert_eq!(summary.total, Money::new(18300 - 3660 + 3294));
}
