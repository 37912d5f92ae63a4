//! Active discounts.

use anyhow::Result;
use priceflow_commerce::discount::FeaturedDiscount;

use super::DiscountsArgs;
use crate::context::Context;

/// Run the discounts command.
pub async fn run(args: DiscountsArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.loaded_storefront().await?;

    let discounts: Vec<FeaturedDiscount> = if args.all {
        storefront.discounts().iter().map(FeaturedDiscount::from).collect()
    } else {
        storefront.featured_discounts()
    };

    if ctx.output.is_json() {
        ctx.output.json(&discounts);
        return Ok(());
    }

    ctx.output.header(if args.all { "Active Discounts" } else { "Featured Discounts" });
    if discounts.is_empty() {
        ctx.output.info("No active discounts");
        return Ok(());
    }

    let widths = [12, 10, 12];
    ctx.output.table_row(&["CODE", "OFF", "VALID UNTIL"], &widths);
    for discount in &discounts {
        let until = discount.valid_until.as_deref().unwrap_or("-");
        ctx.output
            .table_row(&[discount.code.as_str(), discount.headline.as_str(), until], &widths);
        if !discount.description.is_empty() {
            ctx.output.list_item(&discount.description);
        }
    }
    Ok(())
}
