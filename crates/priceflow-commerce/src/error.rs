//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// A guarded action was attempted without a session.
    #[error("Authentication required: {0}")]
    AuthenticationRequired(String),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A buy action fired for a product with nothing available.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// A quick buy for this product is already being handed off.
    #[error("Purchase already in progress for {0}")]
    PurchaseInFlight(String),

    /// The store collaborator failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CommerceError {
    /// Check if this error means the visitor has to sign in first.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, CommerceError::AuthenticationRequired(_))
    }

    /// Check if this error is a refused precondition rather than a failure.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CommerceError::OutOfStock(_) | CommerceError::PurchaseInFlight(_)
        )
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
