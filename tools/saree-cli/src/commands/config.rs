//! Configuration management.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init { force } => init(force, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("File", &path.display().to_string()),
        None => ctx.output.kv("File", "(defaults)"),
    }
    ctx.output.kv("Store", &ctx.config.store.path);

    let latency = &ctx.config.latency;
    ctx.output.header("Latency (ms)");
    for (name, ms) in [
        ("catalog_load", latency.catalog_load),
        ("cart_load", latency.cart_load),
        ("product_load", latency.product_load),
        ("promo_check", latency.promo_check),
        ("order_placement", latency.order_placement),
        ("login", latency.login),
        ("register", latency.register),
        ("otp_verify", latency.otp_verify),
        ("otp_resend", latency.otp_resend),
        ("social_login", latency.social_login),
        ("password_reset", latency.password_reset),
        ("newsletter", latency.newsletter),
        ("load_more", latency.load_more),
        ("checkout_redirect", latency.checkout_redirect),
    ] {
        ctx.output.kv(name, &ms.to_string());
    }

    if !ctx.config.environments.is_empty() {
        ctx.output.header("Environments");
        let mut names: Vec<_> = ctx.config.environments.keys().collect();
        names.sort();
        for name in names {
            ctx.output.list_item(name);
        }
    }
    Ok(())
}

fn init(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("saree.toml");
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    ctx.output
        .success(&format!("Wrote {}", path.display()));
    Ok(())
}
