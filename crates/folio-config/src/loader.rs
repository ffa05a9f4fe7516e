//! Layered configuration loading.

use crate::env::EnvConfig;
use crate::error::{ConfigError, Result};
use crate::types::{FolioConfig, PartialConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Where a configuration layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults.
    Default,
    /// JSON config file.
    File,
    /// `FOLIO_*` environment variables.
    Environment,
    /// Command-line flags.
    Cli,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "defaults"),
            Self::File => write!(f, "config file"),
            Self::Environment => write!(f, "environment"),
            Self::Cli => write!(f, "command line"),
        }
    }
}

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--api-url`.
    pub api_url: Option<String>,
    /// `--session`.
    pub session_id: Option<String>,
    /// `--initial-count`.
    pub initial_count: Option<i64>,
    /// `--page-limit`.
    pub page_limit: Option<u32>,
}

impl CliOverrides {
    fn to_partial(&self) -> PartialConfig {
        PartialConfig {
            api_url: self.api_url.clone(),
            session_id: self.session_id.clone(),
            initial_count: self.initial_count,
            page_limit: self.page_limit,
            ..PartialConfig::default()
        }
    }
}

/// Resolves [`FolioConfig`] from defaults, a config file, the environment
/// and command-line overrides, in that order.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader reading the default config file location, if it exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader reading an explicit config file, which must exist.
    #[must_use]
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Default config file location (`<config dir>/folio/config.json`).
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "folio").map(|d| d.config_dir().join("config.json"))
    }

    /// Resolve against the process environment.
    ///
    /// # Errors
    /// Returns error if any layer is unreadable or holds an invalid value.
    pub fn resolve(&self, cli: &CliOverrides) -> Result<FolioConfig> {
        self.resolve_with(EnvConfig::from_env()?, cli)
    }

    /// Resolve with an already-read environment layer.
    ///
    /// # Errors
    /// Returns error if any layer is unreadable or holds an invalid value.
    pub fn resolve_with(&self, env: PartialConfig, cli: &CliOverrides) -> Result<FolioConfig> {
        let mut config = FolioConfig::default();

        if let Some(file) = self.read_file()? {
            apply(&mut config, &file, ConfigSource::File)?;
        }
        apply(&mut config, &env, ConfigSource::Environment)?;
        apply(&mut config, &cli.to_partial(), ConfigSource::Cli)?;

        debug!(
            api = %config.api_base(),
            session = %config.session_id,
            initial_count = config.initial_count,
            page_limit = config.page_limit,
            "resolved configuration"
        );
        Ok(config)
    }

    fn read_file(&self) -> Result<Option<PartialConfig>> {
        let (path, required) = match &self.config_path {
            Some(path) => (path.clone(), true),
            None => match Self::default_config_path() {
                Some(path) => (path, false),
                None => return Ok(None),
            },
        };

        if !required && !path.exists() {
            return Ok(None);
        }
        read_partial(&path).map(Some)
    }
}

fn read_partial(path: &Path) -> Result<PartialConfig> {
    let data = std::fs::read(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    sonic_rs::from_slice(&data).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn apply(config: &mut FolioConfig, layer: &PartialConfig, source: ConfigSource) -> Result<()> {
    if let Some(raw) = &layer.api_url {
        config.api_url = Url::parse(raw)
            .map_err(|e| ConfigError::invalid(format!("api-url ({source})"), raw, e.to_string()))?;
    }
    if let Some(prefix) = &layer.api_prefix {
        config.api_prefix.clone_from(prefix);
    }
    if let Some(secs) = layer.timeout_secs {
        if secs == 0 {
            return Err(ConfigError::invalid(
                format!("timeout-secs ({source})"),
                "0",
                "timeout must be positive",
            ));
        }
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(count) = layer.initial_count {
        config.initial_count = usize::try_from(count.max(0)).unwrap_or(usize::MAX);
    }
    if let Some(limit) = layer.page_limit {
        config.page_limit = positive(limit, "page-limit", source)?;
    }
    if let Some(cap) = layer.featured_cap {
        config.featured_cap = positive(cap, "featured-cap", source)?;
    }
    if let Some(policy) = layer.fill_policy {
        config.fill_policy = policy;
    }
    if let Some(margin) = layer.scroll_margin {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ConfigError::invalid(
                format!("scroll-margin ({source})"),
                margin.to_string(),
                "margin must be a non-negative number",
            ));
        }
        config.scroll_margin = margin;
    }
    if let Some(secs) = layer.profile_ttl_secs {
        config.profile_ttl = Duration::from_secs(secs);
    }
    if let Some(dir) = &layer.session_dir {
        config.session_dir.clone_from(dir);
    }
    if let Some(id) = &layer.session_id {
        if id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(ConfigError::invalid(
                format!("session ({source})"),
                id,
                "session id must be a plain name",
            ));
        }
        config.session_id.clone_from(id);
    }
    Ok(())
}

fn positive(value: u32, key: &str, source: ConfigSource) -> Result<u32> {
    if value == 0 {
        Err(ConfigError::invalid(
            format!("{key} ({source})"),
            "0",
            "must be at least 1",
        ))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FillPolicy;

    #[test]
    fn file_then_env_then_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"api-url": "https://file.example.com", "page-limit": 20, "fill-policy": "fixed"}"#,
        )
        .unwrap();

        let env = PartialConfig {
            page_limit: Some(8),
            ..PartialConfig::default()
        };
        let cli = CliOverrides {
            api_url: Some("https://cli.example.com".into()),
            ..CliOverrides::default()
        };

        let config = ConfigLoader::with_file(&path).resolve_with(env, &cli).unwrap();
        assert_eq!(config.api_url.as_str(), "https://cli.example.com/");
        assert_eq!(config.page_limit, 8);
        assert_eq!(config.fill_policy, FillPolicy::Fixed);
        assert_eq!(config.initial_count, 15);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::with_file(dir.path().join("absent.json"));
        let err = loader
            .resolve_with(PartialConfig::default(), &CliOverrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"pagelimit": 3}"#).unwrap();
        let err = ConfigLoader::with_file(&path)
            .resolve_with(PartialConfig::default(), &CliOverrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn negative_initial_count_clamps_to_zero() {
        let cli = CliOverrides {
            initial_count: Some(-5),
            ..CliOverrides::default()
        };
        let config = ConfigLoader::default()
            .resolve_with(PartialConfig::default(), &cli)
            .unwrap();
        assert_eq!(config.initial_count, 0);
    }

    #[test]
    fn zero_page_limit_is_rejected() {
        let env = PartialConfig {
            page_limit: Some(0),
            ..PartialConfig::default()
        };
        assert!(
            ConfigLoader::default()
                .resolve_with(env, &CliOverrides::default())
                .is_err()
        );
    }

    #[test]
    fn session_id_must_be_plain() {
        let cli = CliOverrides {
            session_id: Some("../escape".into()),
            ..CliOverrides::default()
        };
        assert!(
            ConfigLoader::default()
                .resolve_with(PartialConfig::default(), &cli)
                .is_err()
        );
    }
}
