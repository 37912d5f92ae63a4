//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Owned by the backend; the client only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: String,
    /// Listed pricing.
    pub pricing: Pricing,
    /// Stock levels.
    pub stock: Stock,
    /// Aggregated ratings.
    #[serde(default)]
    pub ratings: Ratings,
    /// Warranty, if the product carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<Warranty>,
    /// Return policy, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_policy: Option<ReturnPolicy>,
    /// Images in display order.
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Create a product with the given listed price and stock.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        selling_price: Money,
        available: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            sku: String::new(),
            pricing: Pricing { selling_price },
            stock: Stock { available },
            ratings: Ratings::default(),
            warranty: None,
            return_policy: None,
            images: Vec::new(),
        }
    }

    /// The listed (undiscounted) price.
    pub fn listed_price(&self) -> Money {
        self.pricing.selling_price
    }

    /// Check if any units are available.
    pub fn is_in_stock(&self) -> bool {
        self.stock.available > 0
    }

    /// Stock line for a product card.
    pub fn stock_label(&self) -> String {
        if self.is_in_stock() {
            format!("In Stock ({})", self.stock.available)
        } else {
            "Out of Stock".to_string()
        }
    }

    /// Warranty line, e.g. "2 years warranty".
    pub fn warranty_label(&self) -> Option<String> {
        self.warranty
            .as_ref()
            .map(|w| format!("{} {} warranty", w.period, w.unit))
    }

    /// Return line, only for returnable products.
    pub fn return_label(&self) -> Option<String> {
        self.return_policy
            .as_ref()
            .filter(|p| p.returnable)
            .map(|p| format!("{} days return", p.return_days))
    }
}

/// Listed pricing for a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    /// Price before any discount.
    pub selling_price: Money,
}

/// Stock levels for a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Stock {
    /// Units available for purchase.
    pub available: u32,
}

/// Aggregated customer ratings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Ratings {
    #[serde(default)]
    pub average: f64,
}

/// Warranty terms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warranty {
    pub period: u32,
    /// e.g. "months", "years".
    pub unit: String,
}

/// Return policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPolicy {
    #[serde(default)]
    pub returnable: bool,
    #[serde(default)]
    pub return_days: u32,
}

/// An image descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    /// Image URL. Uploaded images arrive as `secure_url`.
    #[serde(alias = "secure_url")]
    pub url: String,
    /// Alt text.
    #[serde(default)]
    pub alt: String,
}
