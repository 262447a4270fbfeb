//! CLI configuration.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use scout_commerce::search::LocaleStrategy;
use serde::{Deserialize, Serialize};

/// Backend the CLI talks to when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["scout.toml", ".scout.toml", "scout.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Locale selection for searches.
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Named overrides of `[api]`, picked with `--env`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environments: BTreeMap<String, ApiConfig>,
}

impl ScoutConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Config with the named environment's `[api]` applied.
    pub fn for_environment(&self, env: &str) -> Result<ScoutConfig> {
        let api = self.environments.get(env).with_context(|| {
            let known: Vec<_> = self.environments.keys().map(String::as_str).collect();
            if known.is_empty() {
                format!("Unknown environment '{}': no environments configured", env)
            } else {
                format!("Unknown environment '{}' (known: {})", env, known.join(", "))
            }
        })?;

        let mut config = self.clone();
        config.api = api.clone();
        Ok(config)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. No timeout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Headers sent with every request.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            headers: BTreeMap::new(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Locale settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// `detect` infers the locale from each query, `ambient` always uses
    /// the environment's.
    #[serde(default)]
    pub strategy: LocaleStrategy,

    /// Fixed ambient locale tag such as `de-DE`. Read from `LC_ALL`/`LANG`
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Generate a default scout.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Product search client configuration

[api]
base_url = "{base_url}"
# timeout_secs = 30

# [api.headers]
# x-client = "scout"

[locale]
# detect: infer language from the query's script
# ambient: always use the tag below, or LC_ALL/LANG
strategy = "detect"
# tag = "en-US"

# [environments.staging]
# base_url = "https://staging.example.com/api"
# timeout_secs = 10
"#,
        base_url = DEFAULT_BASE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: ScoutConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, ScoutConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.locale.strategy, LocaleStrategy::Detect);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ScoutConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), None);
    }

    #[test]
    fn test_full_toml() {
        let config: ScoutConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://search.local/api"
            timeout_secs = 5

            [api.headers]
            x-client = "scout"

            [locale]
            strategy = "ambient"
            tag = "de-DE"

            [environments.staging]
            base_url = "https://staging.example.com/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.api.headers["x-client"], "scout");
        assert_eq!(config.locale.strategy, LocaleStrategy::Ambient);
        assert_eq!(config.locale.tag.as_deref(), Some("de-DE"));

        let staging = config.for_environment("staging").unwrap();
        assert_eq!(staging.api.base_url, "https://staging.example.com/api");
        assert_eq!(staging.api.timeout(), None);
        assert_eq!(staging.locale, config.locale);
    }

    #[test]
    fn test_unknown_environment() {
        let err = ScoutConfig::default().for_environment("prod").unwrap_err();
        assert!(err.to_string().contains("no environments configured"));
    }

    #[test]
    fn test_json_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout.json");

        let mut config = ScoutConfig::default();
        config.api.timeout_secs = Some(12);
        config.save(&path).unwrap();

        assert_eq!(ScoutConfig::load(&path).unwrap(), config);
    }
}
