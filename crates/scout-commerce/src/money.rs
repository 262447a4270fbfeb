//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation so that a backend price like
//! `999` or `12.5` always renders with the currency's exact number of
//! decimal places.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the backend reports numeric prices in.
///
/// Other currencies (`price_gbp`) arrive pre-formatted and are shown as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::EUR => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use scout_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(999.0, Currency::EUR);
    /// assert_eq!(price.amount_cents, 99900);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "€999.00").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "999.00").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::EUR);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::EUR);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_decimal(999.0, Currency::EUR).display(), "\u{20ac}999.00");
        assert_eq!(Money::from_decimal(12.5, Currency::EUR).display(), "\u{20ac}12.50");
    }

    #[test]
    fn test_money_display_rounds_to_cents() {
        let m = Money::from_decimal(19.999, Currency::EUR);
        assert_eq!(m.to_string(), "\u{20ac}20.00");
        assert!(Money::from_decimal(0.001, Currency::EUR).is_zero());
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::default().to_string(), "EUR");
    }
}
