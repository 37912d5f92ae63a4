//! PriceFlow CLI - a command line storefront.
//!
//! Commands:
//! - `priceflow login` - Sign in and store the session token
//! - `priceflow logout` - Sign out
//! - `priceflow products` - List products with their display prices
//! - `priceflow discounts` - Show the featured discounts
//! - `priceflow wishlist` - List or toggle wishlist entries
//! - `priceflow buy` - Quick buy a single product
//! - `priceflow config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use priceflow_data::SessionEvent;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing_subscriber::{fmt, EnvFilter};

use commands::{BuyArgs, ConfigArgs, DiscountsArgs, LoginArgs, WishlistArgs};

/// PriceFlow CLI - browse products, manage your wishlist and quick buy
#[derive(Parser)]
#[command(name = "priceflow")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the storefront
    Login(LoginArgs),

    /// Sign out
    Logout,

    /// List products
    Products,

    /// Show active discounts
    Discounts(DiscountsArgs),

    /// Manage your wishlist
    Wishlist(WishlistArgs),

    /// Buy a single product now
    Buy(BuyArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Subscribe before any request so no 401 is missed
    let mut events = ctx.client.subscribe();

    let result = match cli.command {
        Commands::Login(args) => commands::login::login(args, &ctx).await,
        Commands::Logout => commands::login::logout(&ctx).await,
        Commands::Products => commands::products::run(&ctx).await,
        Commands::Discounts(args) => commands::discounts::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Buy(args) => commands::buy::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    for event in drain_events(&mut events) {
        ctx.output.session_event(&event);
    }

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Collect every session event still buffered, skipping over any the
/// receiver fell behind on.
fn drain_events(events: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut drained = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => drained.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "session events dropped");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return drained,
        }
    }
}
