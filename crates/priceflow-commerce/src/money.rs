//! Money type for representing monetary values.
//!
//! Amounts are held in the smallest unit of the currency (paise for INR) so
//! sums and comparisons stay exact. The storefront backend sends and expects
//! plain decimal numbers with an implicit currency, which is what the serde
//! impls below read and write.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Minor units per whole unit.
    pub fn scale(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use priceflow_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::INR);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.scale() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Like [`Money::from_decimal`], but `None` when the amount is not finite
    /// or does not fit in minor units.
    pub fn checked_from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        let minor = (amount * currency.scale() as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if !minor.is_finite() || minor >= i64::MAX as f64 || minor < i64::MIN as f64 {
            return None;
        }
        Some(Self::new(minor as i64, currency))
    }

    /// Create a Money value from whole currency units.
    ///
    /// Saturates at the bounds of `i64` minor units.
    pub fn from_whole(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(currency.scale()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Check if the amount has no fractional part.
    pub fn is_whole(&self) -> bool {
        self.amount_minor % self.currency.scale() == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.scale() as f64
    }

    /// Take `percent` off and round to the nearest whole currency unit.
    ///
    /// `percent` is clamped to 0..=100, so the result never goes below zero
    /// or above a non-negative starting amount.
    pub fn percent_off_rounded(&self, percent: f64) -> Money {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        let whole = (self.to_decimal() * (1.0 - percent / 100.0)).round() as i64;
        Money::from_whole(whole, self.currency)
    }

    /// Format as a display string (e.g., "₹800" or "₹49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol.
    pub fn display_amount(&self) -> String {
        if self.is_whole() {
            format!("{}", self.amount_minor / self.currency.scale())
        } else {
            let places = self.currency.decimal_places() as usize;
            format!("{:.places$}", self.to_decimal())
        }
    }

    /// Multiply by a quantity, saturating on overflow.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_minor.saturating_mul(factor), self.currency)
    }

    /// Subtract another amount, saturating on overflow.
    pub fn saturating_sub(&self, other: Money) -> Money {
        Money::new(self.amount_minor.saturating_sub(other.amount_minor), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.amount_minor / self.currency.scale())
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("price must be a finite number"));
        }
        Money::checked_from_decimal(amount, Currency::default()).ok_or_else(|| {
            serde::de::Error::custom(format!("price {} is out of range", amount))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::INR);
        assert_eq!(m.amount_minor, 4999);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_whole(800, Currency::INR).display(), "\u{20b9}800");
        assert_eq!(Money::new(4999, Currency::INR).display(), "\u{20b9}49.99");
        assert_eq!(Money::new(1050, Currency::USD).display(), "$10.50");
    }

    #[test]
    fn test_percent_off_rounds_to_whole_units() {
        let price = Money::from_whole(1000, Currency::INR);
        assert_eq!(price.percent_off_rounded(20.0), Money::from_whole(800, Currency::INR));

        // 999 * 0.85 = 849.15
        let price = Money::from_whole(999, Currency::INR);
        assert_eq!(price.percent_off_rounded(15.0), Money::from_whole(849, Currency::INR));

        // 99 * 0.5 = 49.5 rounds up
        let price = Money::from_whole(99, Currency::INR);
        assert_eq!(price.percent_off_rounded(50.0), Money::from_whole(50, Currency::INR));
    }

    #[test]
    fn test_percent_off_clamps_out_of_range_values() {
        let price = Money::from_whole(500, Currency::INR);
        assert!(price.percent_off_rounded(150.0).is_zero());
        assert_eq!(price.percent_off_rounded(-10.0), price);
        assert_eq!(price.percent_off_rounded(f64::NAN), price);
    }

    #[test]
    fn test_money_serde_uses_plain_numbers() {
        let m: Money = serde_json::from_str("1000").unwrap();
        assert_eq!(m, Money::from_whole(1000, Currency::INR));
        assert_eq!(serde_json::to_string(&m).unwrap(), "1000");

        let m: Money = serde_json::from_str("249.5").unwrap();
        assert_eq!(m.amount_minor, 24950);
        assert_eq!(serde_json::to_string(&m).unwrap(), "249.5");
    }

    #[test]
    fn test_out_of_range_prices_are_rejected() {
        assert!(serde_json::from_str::<Money>("1e17").is_err());
        assert!(serde_json::from_str::<Money>("-1e17").is_err());
        assert!(serde_json::from_str::<Money>("1e15").is_ok());
        assert_eq!(Money::checked_from_decimal(f64::INFINITY, Currency::INR), None);
    }

    #[test]
    fn test_large_amounts_saturate() {
        let huge = Money::from_whole(i64::MAX / 10, Currency::INR);
        assert_eq!(huge.amount_minor, i64::MAX);
        assert_eq!(huge.multiply(3).amount_minor, i64::MAX);
        assert_eq!(huge.percent_off_rounded(0.0).amount_minor, i64::MAX);
        assert_eq!(
            Money::new(i64::MIN, Currency::INR).saturating_sub(Money::new(1, Currency::INR)),
            Money::new(i64::MIN, Currency::INR)
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
