//! Search queries and the request body sent to the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Locale;
use crate::CommerceError;

/// A trimmed, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Validate raw user input.
    pub fn parse(raw: &str) -> Result<Self, CommerceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CommerceError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of `POST /search`: `{ "query", "lang", "region" }`.
///
/// Built fresh for each submission and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    query: String,
    #[serde(flatten)]
    locale: Locale,
}

impl SearchRequest {
    /// Create a request with an explicit locale.
    pub fn new(query: &Query, locale: Locale) -> Self {
        Self {
            query: query.as_str().to_string(),
            locale,
        }
    }

    /// Create a request whose locale is inferred from the query text.
    pub fn detect(query: &Query) -> Self {
        Self::new(query, Locale::detect(query.as_str()))
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_trims() {
        let q = Query::parse("  iPhone 15 Pro Max \n").unwrap();
        assert_eq!(q.as_str(), "iPhone 15 Pro Max");
    }

    #[test]
    fn test_query_rejects_blank() {
        assert_eq!(Query::parse(""), Err(CommerceError::EmptyQuery));
        assert_eq!(Query::parse("   "), Err(CommerceError::EmptyQuery));
        assert_eq!(Query::parse("\t\n"), Err(CommerceError::EmptyQuery));
    }

    #[test]
    fn test_request_wire_format() {
        let q = Query::parse("телефон").unwrap();
        let request = SearchRequest::detect(&q);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"query": "телефон", "lang": "ru", "region": "RU"})
        );
    }

    #[test]
    fn test_request_explicit_locale() {
        let q = Query::parse("laptop").unwrap();
        let request = SearchRequest::new(&q, Locale::new("de", "AT"));
        assert_eq!(request.query(), "laptop");
        assert_eq!(request.locale().tag(), "de-AT");
    }

    #[test]
    fn test_request_deserializes() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"query": "手机", "lang": "zh", "region": "CN"}"#).unwrap();
        assert_eq!(request.locale(), &Locale::new("zh", "CN"));
    }
}
