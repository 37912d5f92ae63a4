//! Storefront domain types and logic for PriceFlow.
//!
//! This crate holds everything the storefront needs that does not talk to
//! the network itself:
//!
//! - **Catalog**: products as the backend serves them
//! - **Pricing**: resolving the active discount for a product and the price
//!   shown to the visitor
//! - **Wishlist**: the membership set and its guarded toggle
//! - **Checkout**: the quick buy initiator, purchase intents and order drafts
//! - **Storefront**: the store collaborator contract and the snapshot facade
//!
//! # Example
//!
//! ```rust
//! use priceflow_commerce::prelude::*;
//!
//! let product: Product = serde_json::from_str(
//!     r#"{"_id": "p1", "name": "Kettle", "pricing": {"sellingPrice": 1000},
//!         "stock": {"available": 5}}"#,
//! ).unwrap();
//! let discounts: Vec<Discount> = serde_json::from_str(
//!     r#"[{"_id": "d1", "code": "SAVE20", "value": 20, "applicableProducts": ["p1"]}]"#,
//! ).unwrap();
//!
//! let quote = priceflow_commerce::pricing::quote(&product, &discounts);
//! assert_eq!(quote.discount_code.as_deref(), Some("SAVE20"));
//! assert_eq!(quote.display.to_decimal(), 800.0);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod checkout;
pub mod discount;
pub mod navigation;
pub mod pricing;
pub mod storefront;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Whether the current visitor holds a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStatus {
    /// A credential is present.
    Authenticated,
    /// No credential.
    Anonymous,
}

impl AuthStatus {
    pub fn from_signed_in(signed_in: bool) -> Self {
        if signed_in {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::AuthStatus;

    // Catalog
    pub use crate::catalog::{Pricing, Product, ProductImage, Ratings, ReturnPolicy, Stock, Warranty};

    // Pricing
    pub use crate::discount::{Discount, FeaturedDiscount};
    pub use crate::pricing::PriceQuote;

    // Wishlist
    pub use crate::wishlist::{Wishlist, WishlistChange, WishlistToggle};

    // Checkout
    pub use crate::checkout::{
        Address, BuyControl, BuyLabel, CheckoutHandoff, OrderDraft, OrderItem, PaymentMethod,
        PurchaseIntent, QuickBuy, QuickBuyState,
    };
    pub use crate::navigation::Navigation;

    // Storefront
    pub use crate::storefront::{OrderReceipt, ProductCard, Storefront, StorefrontStore};
}
