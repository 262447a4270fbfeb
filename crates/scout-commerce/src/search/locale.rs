//! Language and region inference for search requests.
//!
//! The locale only parameterizes the request sent to the backend. It is never
//! shown to the user and never checked against what the backend supports.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Query;

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_REGION: &str = "US";

/// Script predicates in priority order. The first one that matches any
/// character of the text decides the language.
const SCRIPT_RULES: &[(fn(char) -> bool, &str)] = &[
    (is_cyrillic, "ru"),
    (is_cjk, "zh"),
    (is_arabic, "ar"),
];

const REGIONS: &[(&str, &str)] = &[
    ("en", "US"),
    ("ru", "RU"),
    ("zh", "CN"),
    ("ar", "AE"),
    ("es", "ES"),
    ("fr", "FR"),
    ("de", "DE"),
    ("it", "IT"),
    ("ja", "JP"),
    ("ko", "KR"),
];

fn is_cyrillic(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Guess the language of free text from the scripts it uses.
///
/// Total over all input: text with none of the known scripts (including the
/// empty string) is English.
pub fn detect_language(text: &str) -> &'static str {
    SCRIPT_RULES
        .iter()
        .find(|(matches, _)| text.chars().any(matches))
        .map(|(_, language)| *language)
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Region used for a language. Unknown languages map to `US`.
pub fn region_for(language: &str) -> &'static str {
    REGIONS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, region)| *region)
        .unwrap_or(DEFAULT_REGION)
}

/// A `(language, region)` pair such as `ru`/`RU`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    #[serde(rename = "lang")]
    language: String,
    region: String,
}

impl Locale {
    /// Create a locale from explicit codes.
    pub fn new(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            region: region.into(),
        }
    }

    /// Infer the locale from the scripts used in `text`.
    pub fn detect(text: &str) -> Self {
        Self::for_language(detect_language(text))
    }

    /// A locale for `language` with its default region.
    pub fn for_language(language: &str) -> Self {
        Self::new(language, region_for(language))
    }

    /// Split an environment language tag like `en-GB`.
    ///
    /// Missing tags and empty parts fall back to `en` and `US`; a tag
    /// without a hyphen keeps its language and gets region `US`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let tag = tag.map(str::trim).unwrap_or_default();
        let mut parts = tag.split('-');
        let language = parts
            .next()
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE);
        let region = parts
            .next()
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REGION);
        Self::new(language, region)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Format back into a `language-REGION` tag.
    pub fn tag(&self) -> String {
        format!("{}-{}", self.language, self.region)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, DEFAULT_REGION)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Where a session takes the locale for each search from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocaleStrategy {
    /// Infer from the script of every query.
    #[default]
    Detect,
    /// Always use the environment locale the session was created with.
    Ambient,
}

impl LocaleStrategy {
    /// Pick the locale for `query`.
    pub fn resolve(&self, ambient: &Locale, query: &Query) -> Locale {
        match self {
            LocaleStrategy::Detect => Locale::detect(query.as_str()),
            LocaleStrategy::Ambient => ambient.clone(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocaleStrategy::Detect => "detect",
            LocaleStrategy::Ambient => "ambient",
        }
    }
}
