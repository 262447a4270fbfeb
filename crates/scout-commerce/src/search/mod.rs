//! Search module.
//!
//! Contains query validation, the search request body, and locale inference.

mod locale;
mod request;

pub use locale::{detect_language, region_for, Locale, LocaleStrategy};
pub use request::{Query, SearchRequest};
