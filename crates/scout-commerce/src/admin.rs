//! Payloads for the backend's operator endpoints.

use serde::{Deserialize, Serialize};

use crate::CommerceError;

/// Request to start a parser run over a catalog page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParserJob {
    pub url: String,
    #[serde(default)]
    pub category: String,
}

impl ParserJob {
    /// Create a job, requiring a source URL.
    pub fn new(url: impl Into<String>, category: impl Into<String>) -> Result<Self, CommerceError> {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return Err(CommerceError::IncompleteParserJob("url"));
        }
        Ok(Self {
            url,
            category: category.into().trim().to_string(),
        })
    }
}

/// `{ "status": ... }` body returned by parser and key endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StatusMessage {
    #[serde(default)]
    pub status: String,
}

/// Upstream API keys. Reads return masked values ("...abcd").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApiKeys {
    #[serde(default)]
    pub gemini_api_keys: String,
    #[serde(default)]
    pub serpapi_api_keys: String,
}

/// Aggregate counters over the backend's search log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub unique_queries: u64,
    #[serde(default)]
    pub most_popular_query: String,
}
