//! Purchase intents.

use crate::catalog::Product;
use crate::checkout::{OrderDraft, OrderItem};
use crate::discount::Discount;
use crate::ids::ProductId;
use crate::money::Money;
use crate::pricing;
use serde::Serialize;

/// The minimal priced line item quick buy hands to checkout.
///
/// The only way to build one is from a product and the active discounts,
/// so the unit price is always what the resolver says it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseIntent {
    product_id: ProductId,
    product_name: String,
    #[serde(rename = "price")]
    unit_price: Money,
    quantity: u32,
}

impl PurchaseIntent {
    /// Quantity of every quick buy.
    pub const QUANTITY: u32 = 1;

    /// Price a product against the active discounts.
    pub fn for_product(product: &Product, discounts: &[Discount]) -> Self {
        let quote = pricing::quote(product, discounts);
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: quote.display,
            quantity: Self::QUANTITY,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The order line carrying the same price.
    pub fn order_item(&self) -> OrderItem {
        OrderItem {
            product: self.product_id.clone(),
            quantity: self.quantity,
            price: self.unit_price,
        }
    }
}

/// Navigation state for the checkout entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutHandoff {
    /// The priced line item.
    #[serde(rename = "quickBuyProduct")]
    pub intent: PurchaseIntent,
    /// Draft for checkout to complete and submit.
    pub order_draft: OrderDraft,
}

impl CheckoutHandoff {
    pub fn new(intent: PurchaseIntent) -> Self {
        let order_draft = OrderDraft::single(intent.order_item());
        Self {
            intent,
            order_draft,
        }
    }
}
