//! Newtype IDs for type-safe identifiers.
//!
//! Identifiers are owned by the backend and opaque to the client; the
//! newtypes only keep a product id from being passed where a Google
//! Shopping id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CommerceError;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident, $empty:ident) => {
        /// An opaque backend identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create an ID from user input, rejecting blank values.
            pub fn parse(id: &str) -> Result<Self, CommerceError> {
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(CommerceError::$empty);
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the backend sent an empty identifier.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId, EmptyProductId);
define_id!(GoogleProductId, EmptyGoogleProductId);
