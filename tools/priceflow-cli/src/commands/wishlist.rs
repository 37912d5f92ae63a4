//! Wishlist commands.

use anyhow::{Context as _, Result};
use priceflow_commerce::wishlist::{WishlistChange, WishlistToggle};
use priceflow_commerce::ProductId;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(WishlistCommand::List) {
        WishlistCommand::List => list(ctx).await,
        WishlistCommand::Toggle { product_id } => toggle(ProductId::new(product_id), ctx).await,
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let auth = ctx.session().auth_status();
    if !auth.is_authenticated() {
        ctx.output.warn(priceflow_commerce::wishlist::LOGIN_TO_WISHLIST);
        return Ok(());
    }

    let storefront = ctx.loaded_storefront().await?;
    storefront
        .sync_wishlist(auth)
        .await
        .context("Failed to load wishlist")?;
    let items = storefront.wishlist().items();

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("Wishlist");
    if items.is_empty() {
        ctx.output.info("Your wishlist is empty");
        return Ok(());
    }
    for id in &items {
        match storefront.product(id) {
            Some(product) => ctx.output.list_item(&format!("{} ({})", product.name, id)),
            None => ctx.output.list_item(id.as_str()),
        }
    }
    Ok(())
}

async fn toggle(product_id: ProductId, ctx: &Context) -> Result<()> {
    let auth = ctx.session().auth_status();
    let storefront = ctx.storefront();
    if auth.is_authenticated() {
        storefront
            .sync_wishlist(auth)
            .await
            .context("Failed to load wishlist")?;
    }

    let outcome = storefront
        .toggle_wishlist(&product_id, auth)
        .await
        .context("Failed to update wishlist")?;

    match outcome {
        WishlistToggle::Rejected { prompt } => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "rejected": prompt }));
            } else {
                ctx.output.warn(prompt);
            }
        }
        WishlistToggle::Changed(change) => {
            if ctx.output.is_json() {
                ctx.output.json(&change);
            } else {
                match change {
                    WishlistChange::Add(id) => ctx.output.success(&format!("Added {} to wishlist", id)),
                    WishlistChange::Remove(id) => {
                        ctx.output.success(&format!("Removed {} from wishlist", id))
                    }
                }
            }
        }
    }
    Ok(())
}
