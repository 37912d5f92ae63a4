//! Quick buy.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use priceflow_commerce::navigation::Navigation;
use priceflow_commerce::ProductId;

use super::BuyArgs;
use crate::context::Context;

/// Run the buy command.
pub async fn run(args: BuyArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.loaded_storefront().await?;
    let auth = ctx.session().auth_status();
    let product_id = ProductId::new(args.product_id);

    let navigation = storefront.buy_now(&product_id, auth)?;

    let handoff = match &navigation {
        Navigation::Login { notice } => {
            if ctx.output.is_json() {
                ctx.output.json(&navigation);
            } else {
                ctx.output.warn(notice);
                ctx.output.info(&format!(
                    "Continue at {} (run `priceflow login`)",
                    navigation.path()
                ));
            }
            return Ok(());
        }
        Navigation::Checkout(handoff) => handoff,
    };

    if ctx.output.is_json() && !args.place_order {
        ctx.output.json(&navigation);
        return Ok(());
    }

    let intent = &handoff.intent;
    let draft = &handoff.order_draft;
    ctx.output.header("Checkout");
    ctx.output.kv("Product", &format!("{} ({})", intent.product_name(), intent.product_id()));
    ctx.output.kv("Price", &intent.unit_price().to_string());
    ctx.output.kv("Quantity", &intent.quantity().to_string());
    ctx.output.kv("Payment", draft.payment_method.display_name());
    ctx.output.kv("Ship to", &draft.shipping_address.one_line());
    ctx.output.kv("Total", &draft.subtotal().to_string());

    if !args.place_order {
        ctx.output.info(&format!(
            "Handed to {}. Re-run with --place-order to submit.",
            navigation.path()
        ));
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = storefront.place_order(handoff, auth).await;
    spinner.finish_and_clear();
    let receipt = result.context("Failed to place order")?;

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
    } else {
        ctx.output.success(&format!("Order {} placed", receipt.id));
        if !receipt.status.is_empty() {
            ctx.output.kv("Status", &receipt.status);
        }
    }
    Ok(())
}
