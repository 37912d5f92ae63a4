//! Quick buy state machine.

use crate::catalog::Product;
use crate::checkout::{CheckoutHandoff, PurchaseIntent};
use crate::discount::Discount;
use crate::ids::ProductId;
use crate::navigation::Navigation;
use crate::{AuthStatus, CommerceError};
use serde::{Deserialize, Serialize, Serializer};

/// Notice shown before redirecting an anonymous buyer to login.
pub const LOGIN_TO_CHECKOUT: &str = "Please login to checkout";

/// States of the quick buy initiator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuickBuyState {
    /// Waiting for a buy action.
    Idle,
    /// Checking the session.
    Guarding,
    /// Building the intent and order draft.
    Constructing,
    /// Handed to checkout. Terminal.
    Handoff,
    /// Sent to login instead. Terminal.
    LoginRedirect,
}

impl QuickBuyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuickBuyState::Idle => "idle",
            QuickBuyState::Guarding => "guarding",
            QuickBuyState::Constructing => "constructing",
            QuickBuyState::Handoff => "handoff",
            QuickBuyState::LoginRedirect => "login_redirect",
        }
    }

    /// Check if the initiator is done with the current buy action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QuickBuyState::Handoff | QuickBuyState::LoginRedirect)
    }

    /// Check if `next` may follow this state.
    pub fn can_transition_to(&self, next: QuickBuyState) -> bool {
        match next {
            QuickBuyState::Idle => true,
            QuickBuyState::Guarding => *self == QuickBuyState::Idle || self.is_terminal(),
            QuickBuyState::Constructing | QuickBuyState::LoginRedirect => {
                *self == QuickBuyState::Guarding
            }
            QuickBuyState::Handoff => *self == QuickBuyState::Constructing,
        }
    }
}

/// Label on a product's buy control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuyLabel {
    BuyNow,
    Processing,
    OutOfStock,
}

impl BuyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuyLabel::BuyNow => "Buy Now",
            BuyLabel::Processing => "Processing...",
            BuyLabel::OutOfStock => "Out of Stock",
        }
    }
}

impl Serialize for BuyLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Render state of a product's buy control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuyControl {
    pub disabled: bool,
    pub label: BuyLabel,
}

impl BuyControl {
    /// Stock half of the disabled predicate.
    pub fn out_of_stock(product: &Product) -> bool {
        product.stock.available == 0
    }
}

/// The quick buy initiator.
///
/// Tracks which product is in flight so its control can render busy and so
/// a second buy of the same product cannot build a duplicate intent.
#[derive(Debug, Clone)]
pub struct QuickBuy {
    state: QuickBuyState,
    in_flight: Option<ProductId>,
}

impl Default for QuickBuy {
    fn default() -> Self {
        Self::new()
    }
}

impl QuickBuy {
    pub fn new() -> Self {
        Self {
            state: QuickBuyState::Idle,
            in_flight: None,
        }
    }

    pub fn state(&self) -> QuickBuyState {
        self.state
    }

    pub fn in_flight(&self) -> Option<&ProductId> {
        self.in_flight.as_ref()
    }

    pub fn is_in_flight(&self, product_id: &ProductId) -> bool {
        self.in_flight.as_ref() == Some(product_id)
    }

    /// Render state of the buy control for a product.
    pub fn control(&self, product: &Product) -> BuyControl {
        let busy = self.is_in_flight(&product.id);
        let out_of_stock = BuyControl::out_of_stock(product);
        let label = if busy {
            BuyLabel::Processing
        } else if out_of_stock {
            BuyLabel::OutOfStock
        } else {
            BuyLabel::BuyNow
        };
        BuyControl {
            disabled: out_of_stock || busy,
            label,
        }
    }

    /// Run a buy action for `product`.
    ///
    /// Out-of-stock and already-in-flight products are refused before the
    /// session is looked at. An anonymous visitor gets a login navigation, no
    /// intent is built and the in-flight marker is left alone.
    pub fn initiate(
        &mut self,
        product: &Product,
        discounts: &[Discount],
        auth: AuthStatus,
    ) -> Result<Navigation, CommerceError> {
        if BuyControl::out_of_stock(product) {
            return Err(CommerceError::OutOfStock(product.id.to_string()));
        }
        if self.is_in_flight(&product.id) {
            return Err(CommerceError::PurchaseInFlight(product.id.to_string()));
        }

        self.advance(QuickBuyState::Guarding);
        if !auth.is_authenticated() {
            self.advance(QuickBuyState::LoginRedirect);
            tracing::debug!(product_id = %product.id, "quick buy needs a session");
            return Ok(Navigation::Login {
                notice: LOGIN_TO_CHECKOUT.to_string(),
            });
        }

        self.advance(QuickBuyState::Constructing);
        let handoff = CheckoutHandoff::new(PurchaseIntent::for_product(product, discounts));

        self.in_flight = Some(product.id.clone());
        self.advance(QuickBuyState::Handoff);
        tracing::debug!(
            product_id = %product.id,
            price = %handoff.intent.unit_price(),
            "quick buy handed to checkout"
        );

        Ok(Navigation::Checkout(Box::new(handoff)))
    }

    /// The visitor left the page; nothing is in flight any more.
    pub fn navigate_away(&mut self) {
        self.in_flight = None;
        self.advance(QuickBuyState::Idle);
    }

    fn advance(&mut self, next: QuickBuyState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid quick buy transition {} -> {}",
            self.state.as_str(),
            next.as_str()
        );
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn kettle(available: u32) -> Product {
        Product::new("p1", "Kettle", Money::from_whole(1000, Currency::INR), available)
    }

    fn save20() -> Vec<Discount> {
        vec![Discount::percentage("d1", "SAVE20", 20.0).for_products(["p1"])]
    }

    #[test]
    fn test_authenticated_quick_buy_hands_off_discounted_intent() {
        let mut quick_buy = QuickBuy::new();
        let nav = quick_buy
            .initiate(&kettle(5), &save20(), AuthStatus::Authenticated)
            .unwrap();

        assert_eq!(nav.path(), "/checkout");
        let handoff = nav.checkout().unwrap();
        assert_eq!(handoff.intent.product_id().as_str(), "p1");
        assert_eq!(handoff.intent.unit_price(), Money::from_whole(800, Currency::INR));
        assert_eq!(handoff.intent.quantity(), 1);
        assert_eq!(quick_buy.state(), QuickBuyState::Handoff);
        assert!(quick_buy.is_in_flight(&ProductId::new("p1")));
    }

    #[test]
    fn test_anonymous_quick_buy_redirects_to_login() {
        let mut quick_buy = QuickBuy::new();
        let nav = quick_buy
            .initiate(&kettle(5), &save20(), AuthStatus::Anonymous)
            .unwrap();

        assert_eq!(
            nav,
            Navigation::Login {
                notice: LOGIN_TO_CHECKOUT.to_string()
            }
        );
        assert!(nav.checkout().is_none());
        assert_eq!(quick_buy.state(), QuickBuyState::LoginRedirect);
        assert!(quick_buy.in_flight().is_none());
    }

    #[test]
    fn test_zero_stock_refused_before_guard() {
        for auth in [AuthStatus::Authenticated, AuthStatus::Anonymous] {
            let mut quick_buy = QuickBuy::new();
            let err = quick_buy.initiate(&kettle(0), &save20(), auth).unwrap_err();

            assert!(matches!(err, CommerceError::OutOfStock(_)));
            assert_eq!(quick_buy.state(), QuickBuyState::Idle);
        }
    }

    #[test]
    fn test_disabled_predicate_is_zero_stock() {
        assert!(BuyControl::out_of_stock(&kettle(0)));
        assert!(!BuyControl::out_of_stock(&kettle(1)));

        let quick_buy = QuickBuy::new();
        assert_eq!(
            quick_buy.control(&kettle(0)),
            BuyControl {
                disabled: true,
                label: BuyLabel::OutOfStock
            }
        );
        assert_eq!(
            quick_buy.control(&kettle(3)),
            BuyControl {
                disabled: false,
                label: BuyLabel::BuyNow
            }
        );
    }

    #[test]
    fn test_in_flight_product_is_busy_and_refused() {
        let mut quick_buy = QuickBuy::new();
        quick_buy
            .initiate(&kettle(5), &[], AuthStatus::Authenticated)
            .unwrap();

        let control = quick_buy.control(&kettle(5));
        assert!(control.disabled);
        assert_eq!(control.label.as_str(), "Processing...");

        let err = quick_buy
            .initiate(&kettle(5), &[], AuthStatus::Authenticated)
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_other_product_replaces_in_flight_marker() {
        let mut quick_buy = QuickBuy::new();
        quick_buy
            .initiate(&kettle(5), &[], AuthStatus::Authenticated)
            .unwrap();

        let mug = Product::new("p2", "Mug", Money::from_whole(250, Currency::INR), 3);
        quick_buy.initiate(&mug, &[], AuthStatus::Authenticated).unwrap();

        assert!(quick_buy.is_in_flight(&ProductId::new("p2")));
        assert!(!quick_buy.control(&kettle(5)).disabled);
    }

    #[test]
    fn test_anonymous_buy_keeps_existing_marker() {
        let mut quick_buy = QuickBuy::new();
        quick_buy
            .initiate(&kettle(5), &[], AuthStatus::Authenticated)
            .unwrap();

        let mug = Product::new("p2", "Mug", Money::from_whole(250, Currency::INR), 3);
        let nav = quick_buy.initiate(&mug, &[], AuthStatus::Anonymous).unwrap();

        assert!(nav.is_login());
        assert_eq!(quick_buy.in_flight(), Some(&ProductId::new("p1")));
        assert!(quick_buy.control(&kettle(5)).disabled);
    }

    #[test]
    fn test_navigate_away_clears_marker() {
        let mut quick_buy = QuickBuy::new();
        quick_buy
            .initiate(&kettle(5), &[], AuthStatus::Authenticated)
            .unwrap();

        quick_buy.navigate_away();
        assert!(quick_buy.in_flight().is_none());
        assert_eq!(quick_buy.state(), QuickBuyState::Idle);
        assert!(quick_buy
            .initiate(&kettle(5), &[], AuthStatus::Authenticated)
            .is_ok());
    }

    #[test]
    fn test_transitions() {
        assert!(QuickBuyState::Idle.can_transition_to(QuickBuyState::Guarding));
        assert!(QuickBuyState::Handoff.can_transition_to(QuickBuyState::Guarding));
        assert!(!QuickBuyState::Idle.can_transition_to(QuickBuyState::Constructing));
        assert!(!QuickBuyState::Guarding.can_transition_to(QuickBuyState::Handoff));
    }
}
