//! Mock sign-in, registration and sign-out.

use anyhow::{anyhow, bail, Result};
use saree_auth::{password_strength, LoginForm, OtpChallenge, RegisterForm, Session, SocialProvider};

use super::{AuthArgs, AuthCommand};
use crate::context::Context;

/// Store key holding the OTP challenge between `register` and `verify`.
const PENDING_OTP_KEY: &str = "pendingOtp";

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    let auth = ctx.auth();

    match args.command {
        AuthCommand::Login {
            identifier,
            password,
        } => {
            let form = LoginForm::new(identifier, password);
            let spinner = ctx.output.spinner("Signing in...");
            let result = auth.login(&form, &ctx.timer).await;
            spinner.finish_and_clear();
            let session = result?;
            report_session(ctx, &session, "Welcome back");
        }
        AuthCommand::Register {
            name,
            email,
            phone,
            password,
            confirm_password,
            accept_terms,
            newsletter,
        } => {
            let form = RegisterForm {
                full_name: name,
                email,
                phone,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
                accept_terms,
                subscribe_newsletter: newsletter,
            };
            if let Some(strength) = password_strength(&form.password) {
                ctx.output
                    .kv("Password strength", strength.label());
            }
            let spinner = ctx.output.spinner("Creating your account...");
            let result = auth.register(&form, &ctx.timer).await;
            spinner.finish_and_clear();
            let challenge = result?;
            ctx.store.set(PENDING_OTP_KEY, &challenge)?;
            ctx.output.success(&format!(
                "OTP sent to +91 {}. Run `saree auth verify <code>`",
                challenge.phone()
            ));
            if ctx.output.is_json() {
                ctx.output.json(&challenge);
            }
        }
        AuthCommand::Verify { code } => {
            let challenge: OtpChallenge = ctx
                .store
                .get(PENDING_OTP_KEY)?
                .ok_or_else(|| anyhow!("No pending verification. Run `saree auth register` first"))?;
            let spinner = ctx.output.spinner("Verifying OTP...");
            let result = auth.verify_otp(&challenge, &code, &ctx.timer).await;
            spinner.finish_and_clear();
            let session = result?;
            ctx.store.remove_item(PENDING_OTP_KEY)?;
            report_session(ctx, &session, "Account verified. Welcome");
        }
        AuthCommand::Social { provider } => {
            let provider: SocialProvider = provider.parse().map_err(|e: String| anyhow!(e))?;
            let spinner = ctx
                .output
                .spinner(&format!("Connecting to {}...", provider));
            let result = auth.social_login(provider, &ctx.timer).await;
            spinner.finish_and_clear();
            let session = result?;
            report_session(ctx, &session, "Welcome");
        }
        AuthCommand::Forgot { email } => {
            let spinner = ctx.output.spinner("Sending reset link...");
            let result = auth.forgot_password(&email, &ctx.timer).await;
            spinner.finish_and_clear();
            ctx.output.success(result?);
        }
        AuthCommand::Strength { password } => {
            let Some(strength) = password_strength(&password) else {
                bail!("Password is required");
            };
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "score": saree_auth::password::password_score(&password),
                    "strength": strength,
                }));
            } else {
                ctx.output.kv("Strength", strength.label());
            }
        }
        AuthCommand::Logout => {
            auth.logout()?;
            ctx.output.success("Signed out");
        }
        AuthCommand::Status => match auth.current_session() {
            Some(session) => {
                if ctx.output.is_json() {
                    ctx.output.json(&session);
                } else {
                    ctx.output.kv("Signed in as", &session.name);
                    ctx.output.kv("Email", &session.email);
                }
            }
            None => {
                if ctx.output.is_json() {
                    ctx.output.json(&serde_json::Value::Null);
                } else {
                    ctx.output.info("Not signed in");
                }
            }
        },
    }

    Ok(())
}

fn report_session(ctx: &Context, session: &Session, greeting: &str) {
    if ctx.output.is_json() {
        ctx.output.json(session);
        return;
    }
    ctx.output
        .success(&format!("{}, {}!", greeting, session.name));
    ctx.output.kv("Email", &session.email);
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn auth(ctx: &Context, command: AuthCommand) -> Result<()> {
        run(AuthArgs { command }, ctx).await
    }

    #[tokio::test]
    async fn test_register_then_verify() {
        let ctx = Context::for_tests();
        auth(
            &ctx,
            AuthCommand::Register {
                name: "Meera Iyer".into(),
                email: "meera@mail.com".into(),
                phone: "9123456789".into(),
                password: "Silk@2024".into(),
                confirm_password: None,
                accept_terms: true,
                newsletter: false,
            },
        )
        .await
        .unwrap();
        assert!(ctx.store.get_item(PENDING_OTP_KEY).unwrap().is_some());
        assert!(!ctx.store.is_authenticated());

        assert!(auth(&ctx, AuthCommand::Verify { code: "000000".into() }).await.is_err());
        auth(&ctx, AuthCommand::Verify { code: "123456".into() }).await.unwrap();

        assert!(ctx.store.is_authenticated());
        assert_eq!(ctx.store.user_name().as_deref(), Some("New Customer"));
        assert!(ctx.store.get_item(PENDING_OTP_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_verify_without_register() {
        let ctx = Context::for_tests();
        let err = auth(&ctx, AuthCommand::Verify { code: "123456".into() })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No pending verification"));
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let ctx = Context::for_tests();
        assert!(auth(
            &ctx,
            AuthCommand::Login { identifier: "9876543210".into(), password: "wrong-pass".into() },
        )
        .await
        .is_err());

        auth(
            &ctx,
            AuthCommand::Login { identifier: "9876543210".into(), password: "password123".into() },
        )
        .await
        .unwrap();
        assert_eq!(ctx.store.user_email().as_deref(), Some("9876543210@phone.com"));

        auth(&ctx, AuthCommand::Logout).await.unwrap();
        assert!(!ctx.store.is_authenticated());
    }
}
