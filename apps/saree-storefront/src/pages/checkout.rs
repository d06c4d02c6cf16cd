//! Checkout wizard: guest gate, the four steps and the success screen.

use leptos::prelude::*;
use leptos::task::spawn_local;
use saree_commerce::checkout::{
    format_card_number, format_delivery_date, format_expiry, saved_addresses, AddressType,
    CardDetails, CheckoutFlow, CheckoutStep, DeliveryOption, GuestGate, OrderConfirmation,
    PaymentKind, PaymentMethod, ShippingAddress, INDIAN_STATES, NET_BANKING_BANKS, WALLETS,
};
use saree_commerce::nav::{checkout_breadcrumbs, Route};
use saree_commerce::{CommerceError, ValidationErrors};

use super::field_error;
use crate::app::Breadcrumb;
use crate::state::use_app_state;

/// Checkout page
#[component]
pub fn CheckoutPage() -> impl IntoView {
    let state = use_app_state();
    let gate = RwSignal::new(GuestGate::for_store(&state.store));

    view! {
        <Breadcrumb items=checkout_breadcrumbs()/>
        {move || {
            if gate.get().is_open() {
                view! { <Wizard/> }.into_any()
            } else {
                view! { <GuestPrompt gate=gate/> }.into_any()
            }
        }}
    }
}

#[component]
fn GuestPrompt(gate: RwSignal<GuestGate>) -> impl IntoView {
    view! {
        <div class="guest-prompt">
            <h2>"Sign in for a faster checkout"</h2>
            <p>"Use your saved addresses and track your orders."</p>
            <a href=gate.get_untracked().sign_in_url() class="btn primary">"Sign In"</a>
            <button class="btn" on:click=move |_| gate.update(GuestGate::continue_as_guest)>
                "Continue as Guest"
            </button>
        </div>
    }
}

/// Apply `change`, then move to the next step. Field errors land in `errors`,
/// anything else in `notice`.
fn submit_step(
    flow: RwSignal<CheckoutFlow>,
    errors: RwSignal<ValidationErrors>,
    notice: RwSignal<Option<String>>,
    change: impl FnOnce(&mut CheckoutFlow) -> Result<(), CommerceError>,
) {
    let mut outcome = Ok(CheckoutStep::Shipping);
    flow.update(|flow| outcome = change(flow).and_then(|()| flow.advance()));
    match outcome {
        Ok(_) => {
            errors.set(ValidationErrors::new());
            notice.set(None);
        }
        Err(err) => match err.field_errors() {
            Some(fields) => errors.set(fields.clone()),
            None => notice.set(Some(err.to_string())),
        },
    }
}

#[component]
fn Wizard() -> impl IntoView {
    let state = use_app_state();
    let flow = RwSignal::new(CheckoutFlow::from_cart(&state.cart.get_untracked()));
    let step = Memo::new(move |_| flow.with(CheckoutFlow::step));

    view! {
        <StepHeader flow=flow/>
        <div class="checkout">
            <section>
                {move || match step.get() {
                    CheckoutStep::Shipping => view! { <ShippingStep flow=flow/> }.into_any(),
                    CheckoutStep::Delivery => view! { <DeliveryStep flow=flow/> }.into_any(),
                    CheckoutStep::Payment => view! { <PaymentStep flow=flow/> }.into_any(),
                    CheckoutStep::Review => view! { <ReviewStep flow=flow/> }.into_any(),
                    CheckoutStep::Success => match flow.with_untracked(|f| f.confirmation().cloned()) {
                        Some(order) => view! { <OrderSuccess order=order/> }.into_any(),
                        None => ().into_any(),
                    },
                }}
            </section>
            {move || (step.get() != CheckoutStep::Success).then(|| view! {
                <aside><OrderSummary flow=flow/></aside>
            })}
        </div>
    }
}

#[component]
fn StepHeader(flow: RwSignal<CheckoutFlow>) -> impl IntoView {
    view! {
        <ol class="steps">
            {CheckoutStep::VISIBLE
                .into_iter()
                .map(|step| {
                    let number = step.number();
                    view! {
                        <li
                            class:active=move || flow.with(|f| f.step() == step)
                            class:done={move || flow.with(|f| f.step().number() > number)}
                        >
                            <span class="num">{number.to_string()}</span>
                            {step.display_name()}
                        </li>
                    }
                })
                .collect::<Vec<_>>()}
        </ol>
        <div class="progress">
            <div style=move || format!("width: {}%;", flow.with(CheckoutFlow::progress_percent))></div>
        </div>
    }
}

#[component]
fn StepActions(
    flow: RwSignal<CheckoutFlow>,
    #[prop(into)] on_continue: Callback<()>,
) -> impl IntoView {
    let first = flow.with_untracked(|f| f.step() == CheckoutStep::Shipping);
    view! {
        <div class="actions">
            {(!first).then(|| view! {
                <button class="btn" on:click=move |_| flow.update(|f| {
                    f.go_back();
                })>"Back"</button>
            })}
            <button class="btn primary" on:click=move |_| on_continue.run(())>"Continue"</button>
        </div>
    }
}

// ============================================================================
// Shipping
// ============================================================================

fn address_field(
    draft: RwSignal<ShippingAddress>,
    errors: RwSignal<ValidationErrors>,
    label: &'static str,
    field: &'static str,
    get: fn(&ShippingAddress) -> String,
    set: fn(&mut ShippingAddress, String),
) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type="text"
                prop:value=move || draft.with(get)
                on:input=move |ev| draft.update(|a| set(a, event_target_value(&ev)))
            />
            {field_error(errors, field)}
        </label>
    }
}

#[component]
fn ShippingStep(flow: RwSignal<CheckoutFlow>) -> impl IntoView {
    let saved = StoredValue::new(saved_addresses());
    let errors = RwSignal::new(ValidationErrors::new());
    let notice = RwSignal::new(None::<String>);

    // `None` means the new-address form.
    let current = flow.with_untracked(|f| f.data().shipping_address.clone());
    let choice = RwSignal::new(match &current {
        Some(address) if address.id.is_some() => {
            saved.with_value(|s| s.iter().position(|a| a.id == address.id))
        }
        Some(_) => None,
        None => saved.with_value(|s| s.iter().position(|a| a.is_default)),
    });
    let draft = RwSignal::new(current.filter(|a| a.id.is_none()).unwrap_or_default());

    let on_continue = move |()| {
        let address = match choice.get_untracked() {
            Some(index) => saved.with_value(|s| s[index].clone()),
            None => draft.get_untracked(),
        };
        submit_step(flow, errors, notice, |f| f.set_shipping_address(address));
    };

    view! {
        <h2>"Shipping Address"</h2>
        {saved
            .get_value()
            .into_iter()
            .enumerate()
            .map(|(index, address)| view! {
                <label class="option">
                    <input
                        type="radio"
                        name="address"
                        prop:checked=move || choice.get() == Some(index)
                        on:change=move |_| choice.set(Some(index))
                    />
                    <strong>{address.full_name.clone()}</strong>
                    " " <span class="tag">{address.address_type.as_str()}</span>
                    {address.is_default.then(|| view! { <span class="tag">"Default"</span> })}
                    <p>{address.one_line()}</p>
                    <p class="muted">{address.phone_number.clone()}</p>
                </label>
            })
            .collect::<Vec<_>>()}
        <label class="option">
            <input
                type="radio"
                name="address"
                prop:checked=move || choice.get().is_none()
                on:change=move |_| choice.set(None)
            />
            "Add a new address"
        </label>

        {move || choice.get().is_none().then(|| view! {
            <div class="form">
                {address_field(draft, errors, "Full Name", "fullName", |a| a.full_name.clone(), |a, v| a.full_name = v)}
                {address_field(draft, errors, "Phone Number", "phoneNumber", |a| a.phone_number.clone(), |a, v| a.phone_number = v)}
                {address_field(draft, errors, "Address Line 1", "addressLine1", |a| a.address_line1.clone(), |a, v| a.address_line1 = v)}
                {address_field(
                    draft,
                    errors,
                    "Address Line 2 (optional)",
                    "addressLine2",
                    |a| a.address_line2.clone().unwrap_or_default(),
                    |a, v| a.address_line2 = Some(v).filter(|v| !v.trim().is_empty()),
                )}
                {address_field(draft, errors, "City", "city", |a| a.city.clone(), |a, v| a.city = v)}
                <label>
                    "State"
                    <select on:change=move |ev| draft.update(|a| a.state = event_target_value(&ev))>
                        <option value="" selected=move || draft.with(|a| a.state.is_empty())>"Select state"</option>
                        {INDIAN_STATES
                            .into_iter()
                            .map(|name| view! {
                                <option value=name selected=move || draft.with(|a| a.state == name)>{name}</option>
                            })
                            .collect::<Vec<_>>()}
                    </select>
                    {field_error(errors, "state")}
                </label>
                {address_field(draft, errors, "PIN Code", "pinCode", |a| a.pin_code.clone(), |a, v| a.pin_code = v)}
                <label>
                    "Address Type"
                    <select on:change=move |ev| {
                        let kind = match event_target_value(&ev).as_str() {
                            "office" => AddressType::Office,
                            "other" => AddressType::Other,
                            _ => AddressType::Home,
                        };
                        draft.update(|a| a.address_type = kind);
                    }>
                        {[AddressType::Home, AddressType::Office, AddressType::Other]
                            .into_iter()
                            .map(|kind| view! {
                                <option
                                    value=kind.as_str()
                                    selected=move || draft.with(|a| a.address_type == kind)
                                >
                                    {kind.as_str()}
                                </option>
                            })
                            .collect::<Vec<_>>()}
                    </select>
                </label>
            </div>
        })}
        {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
        <StepActions flow=flow on_continue=on_continue/>
    }
}

// ============================================================================
// Delivery
// ============================================================================

#[component]
fn DeliveryStep(flow: RwSignal<CheckoutFlow>) -> impl IntoView {
    let errors = RwSignal::new(ValidationErrors::new());
    let notice = RwSignal::new(None::<String>);
    let today = chrono::Local::now().date_naive();

    if flow.with_untracked(|f| f.data().delivery_option.is_none()) {
        flow.update(|f| f.set_delivery_option(DeliveryOption::Standard));
    }

    let on_continue = move |()| submit_step(flow, errors, notice, |_| Ok(()));

    view! {
        <h2>"Delivery Options"</h2>
        {DeliveryOption::ALL
            .into_iter()
            .map(|option| view! {
                <label class="option">
                    <input
                        type="radio"
                        name="delivery"
                        prop:checked=move || flow.with(|f| f.data().delivery_option == Some(option))
                        on:change=move |_| flow.update(|f| f.set_delivery_option(option))
                    />
                    <strong>{option.display_name()}</strong>
                    " " <span class="price">{option.price().display_or_free()}</span>
                    <p>{option.description()}</p>
                    <p class="muted">
                        "Estimated delivery: " {format_delivery_date(option.estimated_delivery(today))}
                    </p>
                </label>
            })
            .collect::<Vec<_>>()}
        {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
        <StepActions flow=flow on_continue=on_continue/>
    }
}

// ============================================================================
// Payment
// ============================================================================

#[component]
fn PaymentStep(flow: RwSignal<CheckoutFlow>) -> impl IntoView {
    let errors = RwSignal::new(ValidationErrors::new());
    let notice = RwSignal::new(None::<String>);

    let current = flow.with_untracked(|f| f.data().payment_method.clone());
    let kind = RwSignal::new(current.as_ref().map_or(PaymentKind::Card, PaymentMethod::kind));
    let card = RwSignal::new(match &current {
        Some(PaymentMethod::Card(card)) => card.clone(),
        _ => CardDetails::default(),
    });
    let upi_id = RwSignal::new(match &current {
        Some(PaymentMethod::Upi { upi_id }) => upi_id.clone(),
        _ => String::new(),
    });
    let bank = RwSignal::new(match &current {
        Some(PaymentMethod::NetBanking { bank }) => bank.clone(),
        _ => None,
    });
    let wallet = RwSignal::new(match &current {
        Some(PaymentMethod::Wallet { provider }) => provider.clone(),
        _ => None,
    });

    let on_continue = move |()| {
        let method = match kind.get_untracked() {
            PaymentKind::Card => PaymentMethod::Card(card.get_untracked()),
            PaymentKind::Upi => PaymentMethod::Upi {
                upi_id: upi_id.get_untracked(),
            },
            PaymentKind::NetBanking => PaymentMethod::NetBanking {
                bank: bank.get_untracked(),
            },
            PaymentKind::Wallet => PaymentMethod::Wallet {
                provider: wallet.get_untracked(),
            },
            PaymentKind::Cod => PaymentMethod::Cod,
        };
        submit_step(flow, errors, notice, |f| f.set_payment_method(method));
    };

    let pick = |signal: RwSignal<Option<String>>, label: &'static str, choices: &'static [&'static str]| {
        view! {
            <label>
                {label}
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    signal.set(Some(value).filter(|v| !v.is_empty()));
                }>
                    <option value="">"Choose..."</option>
                    {choices
                        .iter()
                        .map(|choice| view! {
                            <option
                                value=*choice
                                selected=move || signal.with(|s| s.as_deref() == Some(*choice))
                            >
                                {*choice}
                            </option>
                        })
                        .collect::<Vec<_>>()}
                </select>
            </label>
        }
    };

    view! {
        <h2>"Payment Method"</h2>
        {PaymentKind::ALL
            .into_iter()
            .map(|option| view! {
                <label class="option">
                    <input
                        type="radio"
                        name="payment"
                        prop:checked=move || kind.get() == option
                        on:change=move |_| {
                            kind.set(option);
                            errors.set(ValidationErrors::new());
                        }
                    />
                    <strong>{option.display_name()}</strong>
                    {option.is_popular().then(|| view! { <span class="tag">"Popular"</span> })}
                    <p class="muted">{option.description()}</p>
                </label>
            })
            .collect::<Vec<_>>()}

        <div class="form">
            {move || match kind.get() {
                PaymentKind::Card => view! {
                    <label>
                        "Card Number"
                        <input
                            type="text"
                            inputmode="numeric"
                            placeholder="1234 5678 9012 3456"
                            prop:value=move || card.with(|c| c.card_number.clone())
                            on:input=move |ev| card.update(|c| c.card_number = format_card_number(&event_target_value(&ev)))
                        />
                        {field_error(errors, "cardNumber")}
                    </label>
                    <label>
                        "Expiry (MM/YY)"
                        <input
                            type="text"
                            placeholder="MM/YY"
                            prop:value=move || card.with(|c| c.expiry_date.clone())
                            on:input=move |ev| card.update(|c| c.expiry_date = format_expiry(&event_target_value(&ev)))
                        />
                        {field_error(errors, "expiryDate")}
                    </label>
                    <label>
                        "CVV"
                        <input
                            type="password"
                            maxlength="4"
                            prop:value=move || card.with(|c| c.cvv.clone())
                            on:input=move |ev| card.update(|c| c.cvv = event_target_value(&ev))
                        />
                        {field_error(errors, "cvv")}
                    </label>
                    <label>
                        "Cardholder Name"
                        <input
                            type="text"
                            prop:value=move || card.with(|c| c.cardholder_name.clone())
                            on:input=move |ev| card.update(|c| c.cardholder_name = event_target_value(&ev))
                        />
                        {field_error(errors, "cardholderName")}
                    </label>
                }
                    .into_any(),
                PaymentKind::Upi => view! {
                    <label>
                        "UPI ID"
                        <input
                            type="text"
                            placeholder="yourname@upi"
                            prop:value=move || upi_id.get()
                            on:input=move |ev| upi_id.set(event_target_value(&ev))
                        />
                        {field_error(errors, "upiId")}
                    </label>
                }
                    .into_any(),
                PaymentKind::NetBanking => view! {
                    {pick(bank, "Select Bank", &NET_BANKING_BANKS)}
                    {field_error(errors, "bank")}
                }
                    .into_any(),
                PaymentKind::Wallet => view! {
                    {pick(wallet, "Select Wallet", &WALLETS)}
                    {field_error(errors, "wallet")}
                }
                    .into_any(),
                PaymentKind::Cod => view! {
                    <p class="notice">"Cash on delivery charges of ₹50 apply."</p>
                }
                    .into_any(),
            }}
        </div>
        {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
        <StepActions flow=flow on_continue=on_continue/>
    }
}

// ============================================================================
// Review
// ============================================================================

#[component]
fn ReviewStep(flow: RwSignal<CheckoutFlow>) -> impl IntoView {
    let state = use_app_state();
    let pending = RwSignal::new(false);
    let notice = RwSignal::new(None::<String>);

    let data = flow.with_untracked(|f| f.data().clone());
    let address = data
        .shipping_address
        .map(|a| format!("{}, {}", a.full_name, a.one_line()))
        .unwrap_or_default();
    let delivery = data
        .delivery_option
        .map(|d| format!("{} ({} days)", d.display_name(), d.estimated_days()))
        .unwrap_or_default();
    let payment = data
        .payment_method
        .map(|p| p.summary())
        .unwrap_or_default();

    let place_order = move |_: leptos::ev::MouseEvent| {
        let state = state.clone();
        let mut placing = flow.get_untracked();
        pending.set(true);
        notice.set(None);
        spawn_local(async move {
            match placing.place_order(&state.timer, &state.latency).await {
                Ok(_) => {
                    let emptied = state.update_cart(|cart| {
                        cart.clear();
                        Ok(())
                    });
                    if let Err(err) = emptied {
                        leptos::logging::warn!("failed to clear cart: {}", err);
                    }
                    flow.set(placing);
                }
                Err(err) => notice.set(Some(err.to_string())),
            }
            pending.set(false);
        });
    };

    view! {
        <h2>"Review Your Order"</h2>
        <dl class="review">
            <dt>"Shipping to"</dt><dd>{address}</dd>
            <dt>"Delivery"</dt><dd>{delivery}</dd>
            <dt>"Payment"</dt><dd>{payment}</dd>
        </dl>
        <label class="terms">
            <input
                type="checkbox"
                prop:checked=move || flow.with(CheckoutFlow::terms_accepted)
                on:change=move |ev| flow.update(|f| f.set_terms_accepted(event_target_checked(&ev)))
            />
            "I agree to the Terms and Conditions and Privacy Policy"
        </label>
        {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
        <div class="actions">
            <button class="btn" disabled=move || pending.get() on:click=move |_| flow.update(|f| {
                f.go_back();
            })>"Back"</button>
            <button
                class="btn primary"
                disabled={move || pending.get() || !flow.with(CheckoutFlow::terms_accepted)}
                on:click=place_order
            >
                {move || if pending.get() { "Processing your order..." } else { "Place Order" }}
            </button>
        </div>
    }
}

// ============================================================================
// Summary and success
// ============================================================================

#[component]
fn OrderSummary(flow: RwSignal<CheckoutFlow>) -> impl IntoView {
    let items = flow.with_untracked(|f| f.items().to_vec());

    view! {
        <section class="summary">
            <h3>"Order Summary"</h3>
            {items
                .into_iter()
                .map(|item| view! {
                    <div class="summary-line">
                        <img src=item.image.clone() alt=item.name.clone()/>
                        <span>{item.name.clone()} " × " {item.quantity.to_string()}</span>
                        <span>{item.line_total().map(|m| m.display()).unwrap_or_default()}</span>
                    </div>
                })
                .collect::<Vec<_>>()}
            {move || match flow.with(CheckoutFlow::totals) {
                Ok(totals) => view! {
                    <table>
                        <tr><td>"Subtotal"</td><td>{totals.subtotal.display()}</td></tr>
                        <tr><td>"Delivery"</td><td>{totals.delivery_charges.display_or_free()}</td></tr>
                        {(!totals.cod_charges.is_zero()).then(|| view! {
                            <tr><td>"COD Charges"</td><td>{totals.cod_charges.display()}</td></tr>
                        })}
                        <tr><td>"GST (18%)"</td><td>{totals.gst_amount.display()}</td></tr>
                        <tr class="total"><td>"Total"</td><td>{totals.total.display()}</td></tr>
                    </table>
                }
                    .into_any(),
                Err(err) => view! { <p class="field-error">{err.to_string()}</p> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn OrderSuccess(order: OrderConfirmation) -> impl IntoView {
    view! {
        <div class="success">
            <h2>"Order Placed Successfully!"</h2>
            <p>"Thank you for shopping with R.G Kasat Saree Mall."</p>
            <dl>
                <dt>"Order ID"</dt><dd>{order.order_id.to_string()}</dd>
                <dt>"Items"</dt><dd>{order.item_count().to_string()}</dd>
                <dt>"Total Paid"</dt><dd>{order.totals.total.display()}</dd>
                <dt>"Payment"</dt><dd>{order.payment_method.summary()}</dd>
                <dt>"Delivering to"</dt><dd>{order.shipping_address.one_line()}</dd>
                <dt>"Estimated Delivery"</dt><dd>{order.estimated_delivery_label()}</dd>
            </dl>
            <a href=Route::Home.path() class="btn primary">"Continue Shopping"</a>
        </div>
    }
}
