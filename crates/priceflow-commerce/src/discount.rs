//! Discount and coupon types.

use crate::ids::{DiscountId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many discounts the featured strip shows.
pub const FEATURED_DISCOUNTS: usize = 4;

/// A promotional discount as served by the active-discounts endpoint.
///
/// Expiry is enforced by whoever builds the active collection; nothing here
/// looks at `valid_until` when pricing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: DiscountId,
    /// Discount code (e.g., "SAVE20").
    pub code: String,
    /// Percentage off (0.0 - 100.0).
    pub value: f64,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// End of validity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Products this discount applies to. Absent means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicable_products: Option<Vec<ProductId>>,
}

impl Discount {
    /// Create a new percentage discount with no applicable products.
    pub fn percentage(id: impl Into<DiscountId>, code: impl Into<String>, percent: f64) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            value: percent,
            description: String::new(),
            valid_until: None,
            applicable_products: None,
        }
    }

    /// Restrict the discount to the given products.
    pub fn for_products<I, P>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProductId>,
    {
        self.applicable_products = Some(products.into_iter().map(Into::into).collect());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the end of validity.
    pub fn valid_until(mut self, at: DateTime<Utc>) -> Self {
        self.valid_until = Some(at);
        self
    }

    /// Check if this discount lists the product.
    pub fn applies_to(&self, product_id: &ProductId) -> bool {
        self.applicable_products
            .as_deref()
            .is_some_and(|products| products.contains(product_id))
    }

    /// Percentage clamped into 0..=100.
    pub fn percent(&self) -> f64 {
        if self.value.is_nan() {
            0.0
        } else {
            self.value.clamp(0.0, 100.0)
        }
    }

    /// Check if the discount ran out before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.is_some_and(|until| now > until)
    }
}

/// A discount as rendered in the featured strip.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedDiscount {
    pub code: String,
    /// e.g. "20% OFF".
    pub headline: String,
    pub description: String,
    /// Calendar date the discount runs until.
    pub valid_until: Option<String>,
}

impl From<&Discount> for FeaturedDiscount {
    fn from(discount: &Discount) -> Self {
        Self {
            code: discount.code.clone(),
            headline: format!("{}% OFF", discount.value),
            description: discount.description.clone(),
            valid_until: discount
                .valid_until
                .map(|until| until.format("%Y-%m-%d").to_string()),
        }
    }
}

/// The first few active discounts, in collection order.
pub fn featured(discounts: &[Discount]) -> Vec<FeaturedDiscount> {
    discounts
        .iter()
        .take(FEATURED_DISCOUNTS)
        .map(FeaturedDiscount::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_discount_from_backend_json() {
        let discount: Discount = serde_json::from_str(
            r#"{
                "_id": "d1",
                "code": "SAVE20",
                "value": 20,
                "description": "Festive sale",
                "validUntil": "2026-12-31T23:59:59Z",
                "applicableProducts": ["p1", "p2"]
            }"#,
        )
        .unwrap();

        assert_eq!(discount.code, "SAVE20");
        assert!(discount.applies_to(&ProductId::new("p2")));
        assert!(!discount.applies_to(&ProductId::new("p3")));
        assert!(discount.valid_until.is_some());
    }

    #[test]
    fn test_missing_or_empty_products_match_nothing() {
        let absent = Discount::percentage("d1", "ALL", 10.0);
        assert!(!absent.applies_to(&ProductId::new("p1")));

        let empty = Discount::percentage("d2", "NONE", 10.0).for_products(Vec::<ProductId>::new());
        assert!(!empty.applies_to(&ProductId::new("p1")));
    }

    #[test]
    fn test_percent_is_clamped() {
        assert_eq!(Discount::percentage("d", "X", 120.0).percent(), 100.0);
        assert_eq!(Discount::percentage("d", "X", -5.0).percent(), 0.0);
        assert_eq!(Discount::percentage("d", "X", 35.0).percent(), 35.0);
    }

    #[test]
    fn test_expiry_check() {
        let until = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        let discount = Discount::percentage("d", "JAN", 10.0).valid_until(until);

        assert!(!discount.is_expired_at(Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap()));
        assert!(discount.is_expired_at(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_featured_takes_first_four_in_order() {
        let discounts: Vec<Discount> = (1..=6)
            .map(|i| Discount::percentage(format!("d{i}"), format!("CODE{i}"), (i * 5) as f64))
            .collect();

        let strip = featured(&discounts);
        assert_eq!(strip.len(), 4);
        assert_eq!(strip[0].code, "CODE1");
        assert_eq!(strip[0].headline, "5% OFF");
        assert_eq!(strip[3].code, "CODE4");
    }
}
