//! Order draft types.
//!
//! The draft is what the checkout flow eventually submits to the orders
//! endpoint. Quick buy only pre-populates it; nothing here validates the
//! addresses.

use crate::checkout::Address;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payment method for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    Card,
    Upi,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "Cash on Delivery",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        }
    }
}

/// A line in an order draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product being ordered.
    pub product: ProductId,
    pub quantity: u32,
    /// Unit price.
    pub price: Money,
}

impl OrderItem {
    /// Line total.
    pub fn total(&self) -> Money {
        self.price.multiply(i64::from(self.quantity))
    }
}

/// An order waiting to be completed and submitted by checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub payment_method: PaymentMethod,
}

impl OrderDraft {
    /// A single-line draft with placeholder addresses, paid on delivery.
    pub fn single(item: OrderItem) -> Self {
        Self {
            items: vec![item],
            shipping_address: Address::placeholder(),
            billing_address: Address::placeholder(),
            payment_method: PaymentMethod::default(),
        }
    }

    /// Sum of the line totals.
    pub fn subtotal(&self) -> Money {
        let currency = self
            .items
            .first()
            .map(|item| item.price.currency)
            .unwrap_or_default();
        let amount = self
            .items
            .iter()
            .fold(0_i64, |sum, item| sum.saturating_add(item.total().amount_minor));
        Money::new(amount, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_single_draft_defaults() {
        let draft = OrderDraft::single(OrderItem {
            product: ProductId::new("p1"),
            quantity: 1,
            price: Money::from_whole(800, Currency::INR),
        });

        assert_eq!(draft.payment_method, PaymentMethod::Cod);
        assert!(draft.shipping_address.is_placeholder());
        assert!(draft.billing_address.is_placeholder());
        assert_eq!(draft.subtotal(), Money::from_whole(800, Currency::INR));
    }

    #[test]
    fn test_draft_wire_shape() {
        let draft = OrderDraft::single(OrderItem {
            product: ProductId::new("p1"),
            quantity: 1,
            price: Money::from_whole(800, Currency::INR),
        });

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["paymentMethod"], "cod");
        assert_eq!(json["items"][0]["product"], "p1");
        assert_eq!(json["items"][0]["price"], 800);
        assert_eq!(json["shippingAddress"]["country"], "India");
    }
}
