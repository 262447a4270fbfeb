//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use scout_commerce::search::Locale;
use scout_data::FetchClient;
use scout_session::{AdminClient, HttpBackend, SearchSession};

use crate::config::{ScoutConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment applied.
    pub config: ScoutConfig,
    /// Where the config came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or by discovery.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_path(&cwd, path);
                (ScoutConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (ScoutConfig::load(&path)?, Some(path)),
                None => (ScoutConfig::default(), None),
            },
        };

        let config = match env {
            Some(env) => config.for_environment(env)?,
            None => config,
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// HTTP client for the configured backend.
    pub fn client(&self) -> FetchClient {
        let api = &self.config.api;
        let mut client = FetchClient::new().with_base_url(api.base_url.clone());
        for (key, value) in &api.headers {
            client = client.with_default_header(key.clone(), value.clone());
        }
        if let Some(timeout) = api.timeout() {
            client = client.with_timeout(timeout);
        }
        client
    }

    pub fn backend(&self) -> Arc<HttpBackend> {
        Arc::new(HttpBackend::new(self.client()))
    }

    pub fn admin(&self) -> AdminClient {
        AdminClient::new(self.client())
    }

    /// The locale used when the strategy is `ambient`.
    pub fn ambient_locale(&self) -> Locale {
        let tag = self
            .config
            .locale
            .tag
            .clone()
            .or_else(|| ambient_tag(|key| std::env::var(key).ok()));
        Locale::from_tag(tag.as_deref())
    }

    /// A search session configured from the locale settings.
    pub fn search_session(&self) -> SearchSession<HttpBackend> {
        SearchSession::new(HttpBackend::new(self.client()), self.ambient_locale())
            .with_locale_strategy(self.config.locale.strategy)
    }
}

/// Walk up from `start` looking for a config file.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let path = current.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a path relative to the working directory.
pub fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Language tag from POSIX locale variables, e.g. `ru_RU.UTF-8` -> `ru-RU`.
///
/// `C` and `POSIX` carry no language and count as unset.
pub fn ambient_tag(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["LC_ALL", "LANG"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find_map(|value| normalize_posix_locale(&value))
}

fn normalize_posix_locale(value: &str) -> Option<String> {
    let base = value.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    // === Ambient locale ===

    #[test]
    fn test_posix_locale_is_normalized() {
        assert_eq!(ambient_tag(env(&[("LANG", "ru_RU.UTF-8")])).as_deref(), Some("ru-RU"));
        assert_eq!(ambient_tag(env(&[("LANG", "de_DE@euro")])).as_deref(), Some("de-DE"));
        assert_eq!(ambient_tag(env(&[("LANG", "fr")])).as_deref(), Some("fr"));
    }

    #[test]
    fn test_lc_all_wins_over_lang() {
        let vars = [("LC_ALL", "en_GB.UTF-8"), ("LANG", "ru_RU.UTF-8")];
        assert_eq!(ambient_tag(env(&vars)).as_deref(), Some("en-GB"));
    }

    #[test]
    fn test_c_locale_falls_through() {
        let vars = [("LC_ALL", "C"), ("LANG", "ja_JP.UTF-8")];
        assert_eq!(ambient_tag(env(&vars)).as_deref(), Some("ja-JP"));

        assert_eq!(ambient_tag(env(&[("LANG", "POSIX")])), None);
        assert_eq!(ambient_tag(env(&[("LANG", "C.UTF-8")])), None);
        assert_eq!(ambient_tag(env(&[])), None);
    }

    #[test]
    fn test_tag_without_region_gets_default_region() {
        let locale = Locale::from_tag(ambient_tag(env(&[("LANG", "fr")])).as_deref());
        assert_eq!(locale, Locale::new("fr", "US"));
    }

    // === Config discovery ===

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".scout.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.path().join(".scout.toml")));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("project");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("scout.toml"), "").unwrap();
        std::fs::write(nested.join("scout.json"), "{}").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join("scout.json")));
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(cwd, "scout.toml"), PathBuf::from("/work/scout.toml"));
        assert_eq!(resolve_path(cwd, "/etc/scout.toml"), PathBuf::from("/etc/scout.toml"));
    }
}
