//! Sign in, registration with OTP, password reset and social login.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use saree_auth::credentials::{DEMO_EMAIL, DEMO_OTP, DEMO_PASSWORD, DEMO_PHONE};
use saree_auth::otp::sanitize_otp_input;
use saree_auth::{
    authenticated_redirect, password_strength, AuthError, LoginForm, OtpChallenge, RegisterForm,
    SocialProvider,
};
use saree_commerce::nav::Route;
use saree_commerce::ValidationErrors;

use super::field_error;
use crate::app::Breadcrumb;
use crate::state::use_app_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Login,
    Register,
}

/// Route an auth failure to the field messages or the banner.
fn report(err: AuthError, errors: RwSignal<ValidationErrors>, notice: RwSignal<Option<String>>) {
    match err.field_errors() {
        Some(fields) => errors.set(fields.clone()),
        None => notice.set(Some(err.to_string())),
    }
}

/// Account page. Signed-in visitors are sent on to `?redirect=`.
#[component]
pub fn AuthPage() -> impl IntoView {
    let state = use_app_state();
    let params = use_query_map();
    let navigate = use_navigate();
    let tab = RwSignal::new(Tab::Login);
    let challenge = RwSignal::new(None::<OtpChallenge>);
    let forgot = RwSignal::new(false);

    let session = state.session;
    let store = state.store.clone();
    Effect::new(move |_| {
        session.track();
        let redirect = params.with_untracked(|p| p.get("redirect"));
        if let Some(target) = authenticated_redirect(&store, redirect.as_deref()) {
            navigate(&target, Default::default());
        }
    });

    view! {
        <Breadcrumb/>
        <div class="auth">
            <div class="tabs">
                <button class:active=move || tab.get() == Tab::Login on:click=move |_| tab.set(Tab::Login)>
                    "Sign In"
                </button>
                <button class:active=move || tab.get() == Tab::Register on:click=move |_| tab.set(Tab::Register)>
                    "Create Account"
                </button>
            </div>
            {move || match tab.get() {
                Tab::Login => view! { <LoginPanel forgot=forgot/> }.into_any(),
                Tab::Register => view! { <RegisterPanel challenge=challenge/> }.into_any(),
            }}
            <SocialLogin/>
            <section class="guest">
                <h3>"Continue as Guest"</h3>
                <p>"You can checkout without creating an account"</p>
                <a href=Route::CheckoutProcess.path() class="btn">"Continue to Checkout"</a>
            </section>
        </div>
        {move || challenge.with(Option::is_some).then(|| view! { <OtpModal challenge=challenge/> })}
        {move || forgot.get().then(|| view! { <ForgotPassword open=forgot/> })}
    }
}

// ============================================================================
// Sign in
// ============================================================================

#[component]
fn LoginPanel(forgot: RwSignal<bool>) -> impl IntoView {
    let state = use_app_state();
    let form = RwSignal::new(LoginForm::default());
    let errors = RwSignal::new(ValidationErrors::new());
    let notice = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let auth = state.auth();
        let timer = state.timer;
        let submitted = form.get_untracked();
        errors.set(ValidationErrors::new());
        notice.set(None);
        pending.set(true);
        spawn_local(async move {
            if let Err(err) = auth.login(&submitted, &timer).await {
                report(err, errors, notice);
            }
            pending.set(false);
        });
    };

    view! {
        <div class="demo">
            <p>"Demo account"</p>
            <p class="muted">{format!("Email: {} or phone: {}", DEMO_EMAIL, DEMO_PHONE)}</p>
            <p class="muted">{format!("Password: {}", DEMO_PASSWORD)}</p>
        </div>
        <form class="form" on:submit=on_submit>
            <label>
                "Email or Phone"
                <input
                    type="text"
                    prop:value=move || form.with(|f| f.email_or_phone.clone())
                    on:input=move |ev| form.update(|f| f.email_or_phone = event_target_value(&ev))
                />
                {field_error(errors, "emailOrPhone")}
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    prop:value=move || form.with(|f| f.password.clone())
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />
                {field_error(errors, "password")}
            </label>
            <label class="inline">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.remember_me)
                    on:change=move |ev| form.update(|f| f.remember_me = event_target_checked(&ev))
                />
                "Remember me"
            </label>
            <button type="button" class="link" on:click=move |_| forgot.set(true)>"Forgot password?"</button>
            {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
            <button type="submit" class="btn primary" disabled=move || pending.get()>
                {move || if pending.get() { "Signing in..." } else { "Sign In" }}
            </button>
        </form>
    }
}

// ============================================================================
// Registration
// ============================================================================

fn register_field(
    form: RwSignal<RegisterForm>,
    errors: RwSignal<ValidationErrors>,
    label: &'static str,
    kind: &'static str,
    field: &'static str,
    get: fn(&RegisterForm) -> String,
    set: fn(&mut RegisterForm, String),
) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type=kind
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
            {field_error(errors, field)}
        </label>
    }
}

#[component]
fn RegisterPanel(challenge: RwSignal<Option<OtpChallenge>>) -> impl IntoView {
    let state = use_app_state();
    let form = RwSignal::new(RegisterForm::default());
    let errors = RwSignal::new(ValidationErrors::new());
    let notice = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let auth = state.auth();
        let timer = state.timer;
        let submitted = form.get_untracked();
        errors.set(ValidationErrors::new());
        notice.set(None);
        pending.set(true);
        spawn_local(async move {
            match auth.register(&submitted, &timer).await {
                Ok(started) => challenge.set(Some(started)),
                Err(err) => report(err, errors, notice),
            }
            pending.set(false);
        });
    };

    let strength = move || {
        form.with(|f| password_strength(&f.password)).map(|level| {
            view! {
                <p class=format!("strength {}", level.label().to_lowercase())>
                    "Password strength: " {level.label()}
                </p>
            }
        })
    };

    view! {
        <form class="form" on:submit=on_submit>
            {register_field(form, errors, "Full Name", "text", "fullName", |f| f.full_name.clone(), |f, v| f.full_name = v)}
            {register_field(form, errors, "Email", "email", "email", |f| f.email.clone(), |f, v| f.email = v)}
            {register_field(form, errors, "Phone Number", "tel", "phone", |f| f.phone.clone(), |f, v| f.phone = v)}
            {register_field(form, errors, "Password", "password", "password", |f| f.password.clone(), |f, v| f.password = v)}
            {strength}
            {register_field(
                form,
                errors,
                "Confirm Password",
                "password",
                "confirmPassword",
                |f| f.confirm_password.clone(),
                |f, v| f.confirm_password = v,
            )}
            <label class="inline">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.accept_terms)
                    on:change=move |ev| form.update(|f| f.accept_terms = event_target_checked(&ev))
                />
                "I agree to the Terms and Conditions"
            </label>
            {field_error(errors, "acceptTerms")}
            <label class="inline">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.subscribe_newsletter)
                    on:change=move |ev| form.update(|f| f.subscribe_newsletter = event_target_checked(&ev))
                />
                "Send me offers and new arrivals"
            </label>
            {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
            <button type="submit" class="btn primary" disabled=move || pending.get()>
                {move || if pending.get() { "Creating account..." } else { "Create Account" }}
            </button>
        </form>
    }
}

// ============================================================================
// OTP
// ============================================================================

#[component]
fn OtpModal(challenge: RwSignal<Option<OtpChallenge>>) -> impl IntoView {
    let state = use_app_state();
    let code = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let info = RwSignal::new(None::<&'static str>);
    let pending = RwSignal::new(false);

    match set_interval_with_handle(
        move || {
            challenge.update(|c| {
                if let Some(c) = c {
                    c.tick();
                }
            })
        },
        Duration::from_secs(1),
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(err) => leptos::logging::warn!("OTP countdown unavailable: {:?}", err),
    }

    let verify = {
        let state = state.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let Some(current) = challenge.get_untracked() else {
                return;
            };
            let auth = state.auth();
            let timer = state.timer;
            let entered = code.get_untracked();
            notice.set(None);
            pending.set(true);
            spawn_local(async move {
                match auth.verify_otp(&current, &entered, &timer).await {
                    Ok(_) => challenge.set(None),
                    Err(err) => notice.set(Some(err.to_string())),
                }
                pending.set(false);
            });
        }
    };

    let resend = move |_: leptos::ev::MouseEvent| {
        let Some(mut current) = challenge.get_untracked() else {
            return;
        };
        let auth = state.auth();
        let timer = state.timer;
        spawn_local(async move {
            match auth.resend_otp(&mut current, &timer).await {
                Ok(message) => {
                    challenge.set(Some(current));
                    code.set(String::new());
                    info.set(Some(message));
                }
                Err(err) => notice.set(Some(err.to_string())),
            }
        });
    };

    let phone = move || challenge.with(|c| c.as_ref().map(|c| c.phone().to_string()).unwrap_or_default());
    let can_resend = move || challenge.with(|c| c.as_ref().is_some_and(OtpChallenge::can_resend));

    view! {
        <div class="modal">
            <form class="form" on:submit=verify>
                <h3>"Verify Your Phone"</h3>
                <p>"Enter the 6-digit code sent to +91 " {phone}</p>
                <p class="muted">{format!("Demo OTP: {}", DEMO_OTP)}</p>
                <input
                    type="text"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    prop:value=move || code.get()
                    on:input=move |ev| code.set(sanitize_otp_input(&event_target_value(&ev)))
                />
                {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
                {move || info.get().map(|text| view! { <p class="notice">{text}</p> })}
                <button type="submit" class="btn primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Verifying..." } else { "Verify" }}
                </button>
                {move || {
                    if can_resend() {
                        view! {
                            <button type="button" class="link" on:click=resend.clone()>"Resend OTP"</button>
                        }
                            .into_any()
                    } else {
                        let label = challenge.with(|c| c.as_ref().map(OtpChallenge::countdown_label));
                        view! {
                            <p class="muted">"Resend OTP in " {label.unwrap_or_default()}</p>
                        }
                            .into_any()
                    }
                }}
                <button type="button" class="link" on:click=move |_| challenge.set(None)>"Cancel"</button>
            </form>
        </div>
    }
}

// ============================================================================
// Password reset and social sign in
// ============================================================================

#[component]
fn ForgotPassword(open: RwSignal<bool>) -> impl IntoView {
    let state = use_app_state();
    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let notice = RwSignal::new(None::<String>);
    let sent = RwSignal::new(None::<&'static str>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let auth = state.auth();
        let timer = state.timer;
        let address = email.get_untracked();
        errors.set(ValidationErrors::new());
        pending.set(true);
        spawn_local(async move {
            match auth.forgot_password(&address, &timer).await {
                Ok(message) => sent.set(Some(message)),
                Err(err) => report(err, errors, notice),
            }
            pending.set(false);
        });
    };

    view! {
        <div class="modal">
            <form class="form" on:submit=on_submit>
                <h3>"Reset Password"</h3>
                {move || match sent.get() {
                    Some(message) => view! { <p class="notice">{message}</p> }.into_any(),
                    None => view! {
                        <p>"Enter your email and we'll send you a reset link."</p>
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        {field_error(errors, "email")}
                        {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
                        <button type="submit" class="btn primary" disabled=move || pending.get()>
                            {move || if pending.get() { "Sending..." } else { "Send Reset Link" }}
                        </button>
                    }
                        .into_any(),
                }}
                <button type="button" class="link" on:click=move |_| open.set(false)>"Back to Sign In"</button>
            </form>
        </div>
    }
}

#[component]
fn SocialLogin() -> impl IntoView {
    let state = use_app_state();
    let pending = RwSignal::new(None::<SocialProvider>);
    let notice = RwSignal::new(None::<String>);

    view! {
        <section class="social">
            <p class="muted">"Or continue with"</p>
            {SocialProvider::ALL
                .into_iter()
                .map(|provider| {
                    let state = state.clone();
                    let on_click = move |_: leptos::ev::MouseEvent| {
                        let auth = state.auth();
                        let timer = state.timer;
                        pending.set(Some(provider));
                        spawn_local(async move {
                            if let Err(err) = auth.social_login(provider, &timer).await {
                                notice.set(Some(err.to_string()));
                            }
                            pending.set(None);
                        });
                    };
                    view! {
                        <button class="btn" disabled=move || pending.get().is_some() on:click=on_click>
                            {move || {
                                if pending.get() == Some(provider) {
                                    "Connecting...".to_string()
                                } else {
                                    provider.display_name().to_string()
                                }
                            }}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
            {move || notice.get().map(|text| view! { <p class="field-error">{text}</p> })}
        </section>
    }
}
