//! Product listing.

use anyhow::Result;
use console::style;

use crate::context::Context;
use crate::output::{price_cell, stock_badge};

/// Run the products command.
pub async fn run(ctx: &Context) -> Result<()> {
    let storefront = ctx.loaded_storefront().await?;
    if let Err(e) = storefront.sync_wishlist(ctx.session().auth_status()).await {
        ctx.output.warn(&format!("Could not load wishlist: {}", e));
    }

    let cards = storefront.listing();
    if ctx.output.is_json() {
        ctx.output.json(&cards);
        return Ok(());
    }

    ctx.output.header("Products");
    if cards.is_empty() {
        ctx.output.info("No products available");
        return Ok(());
    }

    for card in &cards {
        let heart = if card.wishlisted { "♥" } else { "♡" };
        println!();
        println!(
            "  {} {}  {}",
            style(heart).magenta(),
            style(&card.name).bold(),
            style(card.id.as_str()).dim()
        );
        ctx.output.kv("Price", &price_cell(card));
        if let Some(code) = &card.price.discount_code {
            ctx.output.kv("Discount", code);
        }
        ctx.output.kv("Rating", &format!("{:.1}", card.rating));
        ctx.output.kv("Stock", &stock_badge(card));
        if let Some(warranty) = &card.warranty_label {
            ctx.output.kv("Warranty", warranty);
        }
        if let Some(returns) = &card.return_label {
            ctx.output.kv("Returns", returns);
        }
        let buy = if card.buy.disabled {
            style(card.buy.label.as_str()).dim().to_string()
        } else {
            style(card.buy.label.as_str()).cyan().to_string()
        };
        ctx.output.kv("Action", &buy);
    }

    let total = storefront.products().len();
    if total > cards.len() {
        println!();
        ctx.output.info(&format!("Showing {} of {} products", cards.len(), total));
    }
    Ok(())
}
