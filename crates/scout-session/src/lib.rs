//! Client-side sessions for the product search backend.
//!
//! [`SearchSession`] drives the search page, [`ProductView`] the detail
//! page, and [`AdminClient`] the operator endpoints. All of them go through
//! [`scout_data::FetchClient`]; the two sessions only through the
//! [`SearchBackend`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use scout_data::FetchClient;
//! use scout_session::prelude::*;
//!
//! let client = FetchClient::new().with_base_url("http://localhost:8081/api");
//! let session = SearchSession::new(HttpBackend::new(client), Locale::default());
//!
//! match session.submit("iPhone 15 Pro Max").await {
//!     SubmitOutcome::Settled { count } => println!("{count} products"),
//!     other => println!("{other:?}"),
//! }
//! for product in &session.state().results {
//!     println!("{} {}", product.title, product.display_price().unwrap_or_default());
//! }
//! ```

mod admin;
mod backend;
mod gesture;
mod product_view;
mod session;

#[cfg(test)]
mod testing;

pub use admin::AdminClient;
pub use backend::{BackendResult, HttpBackend, SearchBackend};
pub use gesture::{NavigationIntent, Swipe, SWIPE_VELOCITY_THRESHOLD};
pub use product_view::{ProductView, ProductViewState, ViewOutcome};
pub use session::{IgnoreReason, SearchSession, SessionPhase, SessionState, SubmitOutcome};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AdminClient, HttpBackend, IgnoreReason, NavigationIntent, ProductView, SearchBackend,
        SearchSession, SessionPhase, SessionState, SubmitOutcome, Swipe, ViewOutcome,
    };
    pub use scout_commerce::search::{Locale, LocaleStrategy};
}
