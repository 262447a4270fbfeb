//! Product catalog module.
//!
//! Contains types for products, their prices, and merchant offers.

mod offer;
mod product;

pub use offer::{Offer, OfferPrice};
pub use product::{FeaturePreview, Product, ProductPrice};
