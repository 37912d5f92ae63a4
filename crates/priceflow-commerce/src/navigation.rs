//! Navigation produced by storefront actions.
//!
//! Actions never touch the environment themselves. They return one of these
//! and the presentation shell performs it.

use crate::checkout::CheckoutHandoff;
use serde::Serialize;

/// Path of the login entry point.
pub const LOGIN_PATH: &str = "/login";

/// Path of the checkout entry point.
pub const CHECKOUT_PATH: &str = "/checkout";

/// A navigation the shell has to carry out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "to", rename_all = "camelCase")]
pub enum Navigation {
    /// Go to login, showing `notice` first.
    Login { notice: String },
    /// Go to checkout with the hand-off as navigation state.
    Checkout(Box<CheckoutHandoff>),
}

impl Navigation {
    /// Target path.
    pub fn path(&self) -> &'static str {
        match self {
            Navigation::Login { .. } => LOGIN_PATH,
            Navigation::Checkout(_) => CHECKOUT_PATH,
        }
    }

    /// Check if this sends the visitor to login.
    pub fn is_login(&self) -> bool {
        matches!(self, Navigation::Login { .. })
    }

    /// The checkout hand-off, if this is a checkout navigation.
    pub fn checkout(&self) -> Option<&CheckoutHandoff> {
        match self {
            Navigation::Checkout(handoff) => Some(handoff),
            Navigation::Login { .. } => None,
        }
    }
}
