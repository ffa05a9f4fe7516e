//! Resolved configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Default catalog service location.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";
/// Path prefix of the public API.
pub const DEFAULT_API_PREFIX: &str = "/api/v1/public";
/// Initial number of projects shown before scrolling.
pub const DEFAULT_INITIAL_COUNT: usize = 15;
/// Page size for incremental loads.
pub const DEFAULT_PAGE_LIMIT: u32 = 12;
/// Page size used to capture every featured project in one request.
pub const DEFAULT_FEATURED_CAP: u32 = 100;
/// Distance from the list end, in logical pixels, that triggers the next page.
pub const DEFAULT_SCROLL_MARGIN: f64 = 800.0;

/// How the initial non-featured fill request is sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillPolicy {
    /// Request exactly the number of items still missing.
    #[default]
    Dynamic,
    /// Request a full page and keep only the missing items.
    Fixed,
}

impl FromStr for FillPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamic" => Ok(Self::Dynamic),
            "fixed" => Ok(Self::Fixed),
            other => Err(format!("expected 'dynamic' or 'fixed', got '{other}'")),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FolioConfig {
    /// Catalog service origin.
    pub api_url: Url,
    /// Path prefix of the public API.
    pub api_prefix: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Target size of the initial list.
    pub initial_count: usize,
    /// Page size for incremental loads.
    pub page_limit: u32,
    /// Page size of the featured query.
    pub featured_cap: u32,
    /// Initial fill sizing.
    pub fill_policy: FillPolicy,
    /// Scroll proximity margin in logical pixels.
    pub scroll_margin: f64,
    /// How long a fetched profile stays fresh.
    pub profile_ttl: Duration,
    /// Directory holding per-session stores.
    pub session_dir: PathBuf,
    /// Active browsing session.
    pub session_id: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: Duration::from_secs(10),
            initial_count: DEFAULT_INITIAL_COUNT,
            page_limit: DEFAULT_PAGE_LIMIT,
            featured_cap: DEFAULT_FEATURED_CAP,
            fill_policy: FillPolicy::Dynamic,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
            profile_ttl: Duration::from_secs(300),
            session_dir: default_session_dir(),
            session_id: "default".to_string(),
        }
    }
}

impl FolioConfig {
    /// Base URL every endpoint path is appended to, without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> String {
        let origin = self.api_url.as_str().trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            origin.to_string()
        } else {
            format!("{origin}/{prefix}")
        }
    }

    /// Directory of the active session's store.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.session_dir.join(&self.session_id)
    }
}

fn default_session_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "folio").map_or_else(
        || std::env::temp_dir().join("folio").join("sessions"),
        |dirs| dirs.cache_dir().join("sessions"),
    )
}

/// Partial configuration as read from a config file or the environment.
///
/// Every field is optional; present fields override the layer below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialConfig {
    /// Catalog service origin.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Path prefix.
    #[serde(default)]
    pub api_prefix: Option<String>,
    /// Timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Initial list size; negative values clamp to 0.
    #[serde(default)]
    pub initial_count: Option<i64>,
    /// Incremental page size.
    #[serde(default)]
    pub page_limit: Option<u32>,
    /// Featured query page size.
    #[serde(default)]
    pub featured_cap: Option<u32>,
    /// Fill policy.
    #[serde(default)]
    pub fill_policy: Option<FillPolicy>,
    /// Scroll margin in logical pixels.
    #[serde(default)]
    pub scroll_margin: Option<f64>,
    /// Profile freshness in seconds.
    #[serde(default)]
    pub profile_ttl_secs: Option<u64>,
    /// Session store directory.
    #[serde(default)]
    pub session_dir: Option<PathBuf>,
    /// Session identifier.
    #[serde(default)]
    pub session_id: Option<String>,
}
