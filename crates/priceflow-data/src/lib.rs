//! HTTP plumbing for PriceFlow.
//!
//! [`ApiClient`] is the request pipeline every backend call goes through. It
//! attaches the stored bearer credential, and when the backend answers 401 it
//! clears that credential and broadcasts [`SessionEvent::LoginRequired`].
//! [`HttpStorefront`] implements the storefront store contract on top of it.
//!
//! # Example
//!
//! ```rust,no_run
//! use priceflow_auth::{FileStore, Session};
//! use priceflow_commerce::storefront::Storefront;
//! use priceflow_data::{ApiClient, ApiConfig, HttpStorefront};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(FileStore::open("state.json"));
//! let client = ApiClient::new(ApiConfig::from_env()?, session)?;
//! let mut events = client.subscribe();
//!
//! let storefront = Storefront::new(HttpStorefront::new(client));
//! storefront.refresh().await?;
//! for card in storefront.listing() {
//!     println!("{} {}", card.name, card.display_price());
//! }
//!
//! while let Ok(event) = events.try_recv() {
//!     println!("navigate to {}", event.redirect_to());
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod event;
mod request;
mod response;
mod storefront;
mod transport;

#[cfg(test)]
mod testing;

pub use auth::{LOGIN_ENDPOINT, LOGOUT_ENDPOINT};
pub use client::{ApiClient, ClientRequestBuilder};
pub use config::{ApiConfig, BACKEND_URL_ENV, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use event::SessionEvent;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use storefront::HttpStorefront;
pub use transport::{ReqwestTransport, Transport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiConfig, FetchError, HttpStorefront, SessionEvent};
}
