//! Checkout module.
//!
//! Quick buy skips the cart: it turns a single product into a priced
//! purchase intent plus an order draft and hands both to checkout.

mod address;
mod intent;
mod order;
mod quick_buy;

pub use address::{Address, DEFAULT_COUNTRY};
pub use intent::{CheckoutHandoff, PurchaseIntent};
pub use order::{OrderDraft, OrderItem, PaymentMethod};
pub use quick_buy::{BuyControl, BuyLabel, QuickBuy, QuickBuyState, LOGIN_TO_CHECKOUT};
