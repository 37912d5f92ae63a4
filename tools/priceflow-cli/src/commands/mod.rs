//! CLI command implementations.

pub mod buy;
pub mod config;
pub mod discounts;
pub mod login;
pub mod products;
pub mod wishlist;

use clap::{Args, Subcommand};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted when missing).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Account password (prompted when missing).
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the discounts command.
#[derive(Args)]
pub struct DiscountsArgs {
    /// Show every active discount, not just the featured ones.
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List wishlist entries.
    List,
    /// Add a product, or remove it if already there.
    Toggle {
        /// Product ID.
        product_id: String,
    },
}

/// Arguments for the buy command.
#[derive(Args)]
pub struct BuyArgs {
    /// Product ID.
    pub product_id: String,

    /// Submit the order draft instead of only showing it.
    #[arg(long)]
    pub place_order: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
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
    /// Create a priceflow.toml in the current directory.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
