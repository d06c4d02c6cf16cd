//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod product;
pub mod validate;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Match product name or category.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category filter (repeatable).
    #[arg(long)]
    pub category: Vec<String>,

    /// Price range filter such as `5000-10000` or `50000+` (repeatable).
    #[arg(long)]
    pub price: Vec<String>,

    /// Fabric filter (repeatable).
    #[arg(long)]
    pub fabric: Vec<String>,

    /// Color filter (repeatable).
    #[arg(long)]
    pub color: Vec<String>,

    /// Occasion filter (repeatable).
    #[arg(long)]
    pub occasion: Vec<String>,

    /// Sort order.
    #[arg(long, default_value = "relevance")]
    pub sort: String,

    /// List the filter groups and their options instead.
    #[arg(long)]
    pub options: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,

    /// Also list related products.
    #[arg(long)]
    pub related: bool,

    /// Show customer reviews.
    #[arg(long)]
    pub reviews: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines, saved items and the order summary.
    Show,
    /// Add a product from its detail page.
    Add {
        /// Product id.
        id: String,
        /// Size label or value.
        #[arg(short, long)]
        size: Option<String>,
        /// Quantity.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Increase a line's quantity by one.
    Inc {
        /// Product id.
        id: String,
    },
    /// Decrease a line's quantity by one.
    Dec {
        /// Product id.
        id: String,
    },
    /// Set a line's quantity.
    Set {
        /// Product id.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Product id.
        id: String,
    },
    /// Save a line for later.
    Save {
        /// Product id.
        id: String,
    },
    /// Move a saved item back to the cart.
    Restore {
        /// Product id.
        id: String,
    },
    /// Apply a promo code, or remove the applied one.
    Promo {
        /// Promo code.
        code: Option<String>,
        /// Remove the applied code.
        #[arg(long, conflicts_with = "code")]
        remove: bool,
    },
    /// Empty the cart.
    Clear,
    /// Load the demo cart.
    Seed,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PaymentArg {
    Card,
    Upi,
    Netbanking,
    Wallet,
    Cod,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Saved address number (1-based).
    #[arg(long, default_value = "1", conflicts_with = "name")]
    pub address: usize,

    /// Full name for a new address.
    #[arg(long, requires_all = ["phone", "line1", "city", "state", "pin"])]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub line1: Option<String>,

    #[arg(long)]
    pub line2: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub pin: Option<String>,

    /// Delivery speed: standard, express or premium.
    #[arg(long, default_value = "standard")]
    pub delivery: String,

    /// Payment method.
    #[arg(long, value_enum, default_value = "cod")]
    pub payment: PaymentArg,

    #[arg(long)]
    pub upi_id: Option<String>,

    #[arg(long)]
    pub bank: Option<String>,

    #[arg(long)]
    pub wallet: Option<String>,

    #[arg(long)]
    pub card_number: Option<String>,

    /// Card expiry, MM/YY.
    #[arg(long)]
    pub expiry: Option<String>,

    #[arg(long)]
    pub cvv: Option<String>,

    #[arg(long)]
    pub cardholder: Option<String>,

    /// Accept the terms and conditions.
    #[arg(long)]
    pub accept_terms: bool,

    /// Continue without signing in.
    #[arg(long)]
    pub guest: bool,
}

/// Arguments for the auth command.
#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in with email or phone.
    Login {
        /// Email address or 10-digit phone number.
        identifier: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account. Sends an OTP to the phone.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        /// Defaults to the password.
        #[arg(long)]
        confirm_password: Option<String>,
        #[arg(long)]
        accept_terms: bool,
        #[arg(long)]
        newsletter: bool,
    },
    /// Verify the OTP sent at registration.
    Verify {
        /// Six-digit code.
        code: String,
    },
    /// Sign in through Google or Facebook.
    Social {
        provider: String,
    },
    /// Request a password reset link.
    Forgot {
        email: String,
    },
    /// Check how strong a password is.
    Strength {
        password: String,
    },
    /// Sign out.
    Logout,
    /// Show who is signed in.
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValidateKind {
    Pin,
    Phone,
    Upi,
    Email,
}

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// What to check.
    #[arg(value_enum)]
    pub kind: ValidateKind,

    /// Value to check.
    pub value: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default saree.toml.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
