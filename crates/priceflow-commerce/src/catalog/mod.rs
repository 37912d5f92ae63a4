//! Catalog module.
//!
//! Products exactly as the storefront backend serves them.

mod product;

pub use product::{Pricing, Product, ProductImage, Ratings, ReturnPolicy, Stock, Warranty};
