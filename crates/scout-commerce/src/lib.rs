//! Domain types for the product search client.
//!
//! This crate holds the data shapes exchanged with the search backend and the
//! pure logic that sits on top of them:
//!
//! - **Catalog**: Products, prices, offers
//! - **Search**: Query validation, search requests, locale inference
//! - **Admin**: Payloads for the backend's operator endpoints
//!
//! # Example
//!
//! ```rust
//! use scout_commerce::prelude::*;
//!
//! let query = Query::parse("  телефон ").unwrap();
//! let request = SearchRequest::detect(&query);
//! assert_eq!(request.locale().language(), "ru");
//! assert_eq!(request.locale().region(), "RU");
//! ```

pub mod admin;
pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{FeaturePreview, Offer, OfferPrice, Product, ProductPrice};

    // Search
    pub use crate::search::{Locale, LocaleStrategy, Query, SearchRequest};

    // Admin
    pub use crate::admin::{ApiKeys, ParserJob, SearchStatistics, StatusMessage};
}
