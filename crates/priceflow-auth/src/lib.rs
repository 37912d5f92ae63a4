//! Client-side authentication state for PriceFlow.
//!
//! The bearer credential lives in a small persisted key-value store under the
//! `token` key. [`Session`] is the only way the rest of the workspace reads or
//! writes it.
//!
//! # Example
//!
//! ```rust
//! use priceflow_auth::{MemoryStore, Session};
//!
//! let session = Session::new(MemoryStore::new());
//! assert!(!session.is_authenticated());
//!
//! session.login("abc123").unwrap();
//! assert_eq!(session.bearer().as_deref(), Some("Bearer abc123"));
//!
//! session.logout().unwrap();
//! assert!(session.credential().unwrap().is_none());
//! ```

mod credential;
mod error;
mod session;
mod store;

pub use credential::Credential;
pub use error::AuthError;
pub use session::{Session, TOKEN_KEY};
pub use store::{FileStore, MemoryStore, PersistentStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AuthError, Credential, FileStore, MemoryStore, PersistentStore, Session};
}
