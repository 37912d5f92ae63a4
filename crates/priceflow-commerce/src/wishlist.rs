//! Wishlist membership.
//!
//! The local set is the only thing the product cards read. It changes on a
//! toggle or when the backend's view is synced in.

use crate::ids::ProductId;
use crate::AuthStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Prompt shown when an anonymous visitor taps the wishlist control.
pub const LOGIN_TO_WISHLIST: &str = "Please login to add items to wishlist";

/// Change to dispatch to the store after a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "productId", rename_all = "camelCase")]
pub enum WishlistChange {
    Add(ProductId),
    Remove(ProductId),
}

impl WishlistChange {
    pub fn product_id(&self) -> &ProductId {
        match self {
            WishlistChange::Add(id) | WishlistChange::Remove(id) => id,
        }
    }
}

/// Outcome of a toggle.
///
/// Carries no navigation: the wishlist control never acts as a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistToggle {
    /// Membership flipped locally; the change still has to reach the store.
    Changed(WishlistChange),
    /// Anonymous visitor; nothing changed.
    Rejected { prompt: &'static str },
}

/// Entry in a wishlist payload. The backend returns either bare ids or
/// populated product documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WishlistEntry {
    Id(ProductId),
    Populated {
        #[serde(rename = "_id")]
        id: ProductId,
    },
}

impl WishlistEntry {
    pub fn into_id(self) -> ProductId {
        match self {
            WishlistEntry::Id(id) | WishlistEntry::Populated { id } => id,
        }
    }
}

/// The visitor's wishlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    items: HashSet<ProductId>,
}

impl Wishlist {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a product is on the wishlist.
    pub fn is_member(&self, product_id: &ProductId) -> bool {
        self.items.contains(product_id)
    }

    /// Flip membership for an authenticated visitor.
    pub fn toggle(&mut self, product_id: &ProductId, auth: AuthStatus) -> WishlistToggle {
        if !auth.is_authenticated() {
            return WishlistToggle::Rejected {
                prompt: LOGIN_TO_WISHLIST,
            };
        }

        let change = if self.items.remove(product_id) {
            WishlistChange::Remove(product_id.clone())
        } else {
            self.items.insert(product_id.clone());
            WishlistChange::Add(product_id.clone())
        };
        WishlistToggle::Changed(change)
    }

    /// Undo a local change the store refused.
    pub fn revert(&mut self, change: &WishlistChange) {
        match change {
            WishlistChange::Add(id) => {
                self.items.remove(id);
            }
            WishlistChange::Remove(id) => {
                self.items.insert(id.clone());
            }
        }
    }

    /// Replace the set with the backend's view.
    pub fn sync(&mut self, items: impl IntoIterator<Item = ProductId>) {
        self.items = items.into_iter().collect();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Members in a stable order.
    pub fn items(&self) -> Vec<ProductId> {
        let mut items: Vec<ProductId> = self.items.iter().cloned().collect();
        items.sort();
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut wishlist = Wishlist::new();
        let id = ProductId::new("p1");

        assert_eq!(
            wishlist.toggle(&id, AuthStatus::Authenticated),
            WishlistToggle::Changed(WishlistChange::Add(id.clone()))
        );
        assert!(wishlist.is_member(&id));

        assert_eq!(
            wishlist.toggle(&id, AuthStatus::Authenticated),
            WishlistToggle::Changed(WishlistChange::Remove(id.clone()))
        );
        assert!(!wishlist.is_member(&id));
    }

    #[test]
    fn test_double_toggle_restores_original_set() {
        let mut wishlist = Wishlist::new();
        wishlist.sync([ProductId::new("p1"), ProductId::new("p2")]);
        let original = wishlist.clone();

        for id in ["p1", "p3"] {
            let id = ProductId::new(id);
            wishlist.toggle(&id, AuthStatus::Authenticated);
            wishlist.toggle(&id, AuthStatus::Authenticated);
            assert_eq!(wishlist, original);
        }
    }

    #[test]
    fn test_anonymous_toggle_is_rejected_without_change() {
        let mut wishlist = Wishlist::new();
        wishlist.sync([ProductId::new("p1")]);

        let outcome = wishlist.toggle(&ProductId::new("p2"), AuthStatus::Anonymous);
        assert_eq!(
            outcome,
            WishlistToggle::Rejected {
                prompt: LOGIN_TO_WISHLIST
            }
        );
        assert_eq!(wishlist.items(), vec![ProductId::new("p1")]);
    }

    #[test]
    fn test_revert_undoes_change() {
        let mut wishlist = Wishlist::new();
        let id = ProductId::new("p1");

        if let WishlistToggle::Changed(change) = wishlist.toggle(&id, AuthStatus::Authenticated) {
            wishlist.revert(&change);
        }
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_entries_accept_ids_and_documents() {
        let entries: Vec<WishlistEntry> =
            serde_json::from_str(r#"["p1", {"_id": "p2", "name": "Mug"}]"#).unwrap();
        let ids: Vec<ProductId> = entries.into_iter().map(WishlistEntry::into_id).collect();
        assert_eq!(ids, vec![ProductId::new("p1"), ProductId::new("p2")]);
    }
}
