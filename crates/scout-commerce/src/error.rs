//! Commerce error types.

use thiserror::Error;

/// Errors raised while building or validating domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// The query was empty after trimming.
    #[error("Search query is empty")]
    EmptyQuery,

    /// A product identifier was empty.
    #[error("Product id is empty")]
    EmptyProductId,

    /// A Google Shopping product identifier was empty.
    #[error("Google product id is empty")]
    EmptyGoogleProductId,

    /// A parser job was missing a required field.
    #[error("Parser job is missing {0}")]
    IncompleteParserJob(&'static str),
}
