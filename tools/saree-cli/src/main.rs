//! Saree CLI - Drive the Saree Mall storefront from the terminal.
//!
//! Commands:
//! - `saree catalog` - Search, filter and sort the catalog
//! - `saree product` - Show a product's detail page
//! - `saree cart` - Manage the persisted cart
//! - `saree checkout` - Run the checkout wizard end to end
//! - `saree auth` - Sign in, register and sign out
//! - `saree validate` - Check a PIN, phone, UPI id or email
//! - `saree config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    AuthArgs, CartArgs, CatalogArgs, CheckoutArgs, ConfigArgs, ProductArgs, ValidateArgs,
};

/// Saree CLI - Browse, shop and check out at R.G Kasat Saree Mall
#[derive(Parser)]
#[command(name = "saree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Apply the overrides of a named environment from the config
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching a search and filters
    Catalog(CatalogArgs),

    /// Show product details
    Product(ProductArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Place an order for the current cart
    Checkout(CheckoutArgs),

    /// Sign in, register or sign out
    Auth(AuthArgs),

    /// Validate a form value
    Validate(ValidateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool, json: bool) {
    // RUST_LOG wins; otherwise warnings, or debug with --verbose
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output.clone())
    {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Auth(args) => commands::auth::run(args, &ctx).await,
        Commands::Validate(args) => commands::validate::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
