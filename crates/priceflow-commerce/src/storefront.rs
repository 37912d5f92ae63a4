//! The storefront facade.
//!
//! [`StorefrontStore`] is the contract for whatever owns products, discounts,
//! wishlists and orders. [`Storefront`] keeps read-only snapshots of the
//! catalog and active discounts, the visitor's wishlist and the quick buy
//! initiator, and wires them to the store.

use crate::catalog::Product;
use crate::checkout::{BuyControl, CheckoutHandoff, OrderDraft, QuickBuy};
use crate::discount::{self, Discount, FeaturedDiscount};
use crate::ids::ProductId;
use crate::money::Money;
use crate::navigation::Navigation;
use crate::pricing::{self, PriceQuote};
use crate::wishlist::{Wishlist, WishlistChange, WishlistToggle};
use crate::{AuthStatus, CommerceError};
use arc_swap::ArcSwap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Number of product cards on the storefront listing.
pub const LISTING_SIZE: usize = 8;

/// Backend record of a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub status: String,
}

/// Store collaborator.
#[async_trait]
pub trait StorefrontStore: Send + Sync {
    /// The catalog.
    async fn products(&self) -> Result<Vec<Product>, CommerceError>;

    /// Active discounts, in the order the backend returns them.
    async fn active_discounts(&self) -> Result<Vec<Discount>, CommerceError>;

    /// The signed-in visitor's wishlist.
    async fn wishlist(&self) -> Result<Vec<ProductId>, CommerceError>;

    async fn add_to_wishlist(&self, product_id: &ProductId) -> Result<(), CommerceError>;

    async fn remove_from_wishlist(&self, product_id: &ProductId) -> Result<(), CommerceError>;

    /// Submit an order draft.
    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderReceipt, CommerceError>;

    /// Send a local wishlist change to the store.
    async fn dispatch(&self, change: &WishlistChange) -> Result<(), CommerceError> {
        match change {
            WishlistChange::Add(id) => self.add_to_wishlist(id).await,
            WishlistChange::Remove(id) => self.remove_from_wishlist(id).await,
        }
    }
}

/// A product as the listing renders it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub price: PriceQuote,
    pub in_stock: bool,
    pub stock_label: String,
    /// Average rating, 0 when unrated.
    pub rating: f64,
    pub warranty_label: Option<String>,
    pub return_label: Option<String>,
    pub image: Option<String>,
    pub wishlisted: bool,
    pub buy: BuyControl,
}

impl ProductCard {
    /// Price shown on the card.
    pub fn display_price(&self) -> Money {
        self.price.display
    }

    /// Listed price, struck through when discounted.
    pub fn strikethrough(&self) -> Option<Money> {
        self.price.is_discounted().then_some(self.price.listed)
    }
}

/// Snapshot-backed storefront over a store collaborator.
pub struct Storefront<S> {
    store: S,
    products: ArcSwap<Vec<Product>>,
    discounts: ArcSwap<Vec<Discount>>,
    wishlist: Mutex<Wishlist>,
    quick_buy: Mutex<QuickBuy>,
}

impl<S: StorefrontStore> Storefront<S> {
    /// Create a storefront with empty snapshots.
    pub fn new(store: S) -> Self {
        Self {
            store,
            products: ArcSwap::from_pointee(Vec::new()),
            discounts: ArcSwap::from_pointee(Vec::new()),
            wishlist: Mutex::new(Wishlist::new()),
            quick_buy: Mutex::new(QuickBuy::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reload products and active discounts concurrently.
    ///
    /// Each snapshot is replaced only when its own fetch succeeds. The first
    /// failure is returned.
    pub async fn refresh(&self) -> Result<(), CommerceError> {
        let (products, discounts) =
            futures::join!(self.store.products(), self.store.active_discounts());

        let mut first_error = None;
        match products {
            Ok(products) => {
                tracing::debug!(count = products.len(), "product snapshot replaced");
                self.products.store(Arc::new(products));
            }
            Err(e) => {
                tracing::warn!(error = %e, "product refresh failed");
                first_error.get_or_insert(e);
            }
        }
        match discounts {
            Ok(discounts) => {
                tracing::debug!(count = discounts.len(), "discount snapshot replaced");
                self.discounts.store(Arc::new(discounts));
            }
            Err(e) => {
                tracing::warn!(error = %e, "discount refresh failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Pull the visitor's wishlist from the store. Anonymous visitors get an
    /// empty wishlist without a request.
    pub async fn sync_wishlist(&self, auth: AuthStatus) -> Result<usize, CommerceError> {
        let items = if auth.is_authenticated() {
            self.store.wishlist().await?
        } else {
            Vec::new()
        };

        let mut wishlist = lock(&self.wishlist);
        wishlist.sync(items);
        Ok(wishlist.len())
    }

    pub fn products(&self) -> Arc<Vec<Product>> {
        self.products.load_full()
    }

    pub fn discounts(&self) -> Arc<Vec<Discount>> {
        self.discounts.load_full()
    }

    pub fn product(&self, product_id: &ProductId) -> Option<Product> {
        self.products
            .load()
            .iter()
            .find(|p| &p.id == product_id)
            .cloned()
    }

    /// Price a product against the current discount snapshot.
    pub fn quote(&self, product_id: &ProductId) -> Option<PriceQuote> {
        let discounts = self.discounts.load();
        self.products
            .load()
            .iter()
            .find(|p| &p.id == product_id)
            .map(|p| pricing::quote(p, &discounts))
    }

    /// Cards for the first few products.
    pub fn listing(&self) -> Vec<ProductCard> {
        let products = self.products.load();
        let discounts = self.discounts.load();
        let wishlist = lock(&self.wishlist);
        let quick_buy = lock(&self.quick_buy);

        products
            .iter()
            .take(LISTING_SIZE)
            .map(|product| ProductCard {
                id: product.id.clone(),
                name: product.name.clone(),
                price: pricing::quote(product, &discounts),
                in_stock: product.is_in_stock(),
                stock_label: product.stock_label(),
                rating: product.ratings.average,
                warranty_label: product.warranty_label(),
                return_label: product.return_label(),
                image: product.images.first().map(|i| i.url.clone()),
                wishlisted: wishlist.is_member(&product.id),
                buy: quick_buy.control(product),
            })
            .collect()
    }

    /// The featured discounts strip.
    pub fn featured_discounts(&self) -> Vec<FeaturedDiscount> {
        discount::featured(&self.discounts.load())
    }

    pub fn wishlist(&self) -> Wishlist {
        lock(&self.wishlist).clone()
    }

    pub fn is_wishlisted(&self, product_id: &ProductId) -> bool {
        lock(&self.wishlist).is_member(product_id)
    }

    /// Toggle wishlist membership and send the change to the store.
    ///
    /// The local set flips before the store call and flips back if the store
    /// refuses.
    pub async fn toggle_wishlist(
        &self,
        product_id: &ProductId,
        auth: AuthStatus,
    ) -> Result<WishlistToggle, CommerceError> {
        let outcome = lock(&self.wishlist).toggle(product_id, auth);

        if let WishlistToggle::Changed(change) = &outcome {
            if let Err(e) = self.store.dispatch(change).await {
                tracing::warn!(product_id = %product_id, error = %e, "wishlist update rejected, reverting");
                lock(&self.wishlist).revert(change);
                return Err(e);
            }
        }

        Ok(outcome)
    }

    /// Run the quick buy for a product in the current snapshot.
    pub fn buy_now(
        &self,
        product_id: &ProductId,
        auth: AuthStatus,
    ) -> Result<Navigation, CommerceError> {
        let product = self
            .product(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        let discounts = self.discounts.load();

        lock(&self.quick_buy).initiate(&product, &discounts, auth)
    }

    /// The visitor left the storefront.
    pub fn navigate_away(&self) {
        lock(&self.quick_buy).navigate_away();
    }

    /// Submit the draft from a checkout hand-off.
    pub async fn place_order(
        &self,
        handoff: &CheckoutHandoff,
        auth: AuthStatus,
    ) -> Result<OrderReceipt, CommerceError> {
        if !auth.is_authenticated() {
            return Err(CommerceError::AuthenticationRequired(
                "placing an order".to_string(),
            ));
        }

        let receipt = self.store.create_order(&handoff.order_draft).await?;
        tracing::info!(order_id = %receipt.id, total = %handoff.order_draft.subtotal(), "order placed");
        self.navigate_away();
        Ok(receipt)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
