//! Merchant offers for a product.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An offer's price. Some sources send a number, others a formatted string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OfferPrice {
    /// Numeric amount.
    Amount(f64),
    /// Display string as sent by the merchant ("£1,099.00").
    Label(String),
}

impl fmt::Display for OfferPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferPrice::Amount(amount) => write!(f, "{:.2}", amount),
            OfferPrice::Label(label) => write!(f, "{}", label),
        }
    }
}

/// A single merchant offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Offer {
    /// Merchant name.
    #[serde(default)]
    pub merchant: String,
    /// Price at this merchant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<OfferPrice>,
    /// Link to the merchant's product page.
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl Offer {
    /// Price label, or "-" when the merchant did not report one.
    pub fn price_label(&self) -> String {
        self.price
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string())
    }
}
