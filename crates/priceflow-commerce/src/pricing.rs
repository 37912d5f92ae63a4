//! Discount resolution and display pricing.
//!
//! Everything here is a pure function of its inputs. The first discount in
//! the active collection that lists a product wins; the collection is never
//! re-sorted or ranked.

use crate::catalog::Product;
use crate::discount::Discount;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Find the discount that applies to a product.
pub fn resolve_discount<'a>(product_id: &ProductId, discounts: &'a [Discount]) -> Option<&'a Discount> {
    discounts.iter().find(|d| d.applies_to(product_id))
}

/// Price shown to the visitor for a listed price and an optional discount.
///
/// With a discount the result is rounded to the nearest whole currency unit.
/// Without one the listed price comes back unchanged.
pub fn display_price(listed: Money, discount: Option<&Discount>) -> Money {
    match discount {
        Some(discount) => listed.percent_off_rounded(discount.percent()),
        None => listed,
    }
}

/// Resolved pricing for one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Listed price before discounts.
    pub listed: Money,
    /// Code of the resolved discount.
    pub discount_code: Option<String>,
    /// Percentage taken off.
    pub discount_percent: Option<f64>,
    /// Final display price.
    pub display: Money,
}

impl PriceQuote {
    /// Check if a discount was applied.
    pub fn is_discounted(&self) -> bool {
        self.discount_code.is_some()
    }

    /// Amount saved against the listed price.
    pub fn savings(&self) -> Money {
        self.listed.saturating_sub(self.display)
    }
}

/// Resolve the discount for a product and price it.
pub fn quote(product: &Product, discounts: &[Discount]) -> PriceQuote {
    let discount = resolve_discount(&product.id, discounts);
    let listed = product.listed_price();
    PriceQuote {
        listed,
        discount_code: discount.map(|d| d.code.clone()),
        discount_percent: discount.map(Discount::percent),
        display: display_price(listed, discount),
    }
}
