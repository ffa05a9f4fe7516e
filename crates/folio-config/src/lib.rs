//! Layered configuration for the Folio portfolio client.
//!
//! Sources are merged in priority order:
//!
//! 1. Built-in defaults
//! 2. Config file (`<config dir>/folio/config.json`, or `--config`)
//! 3. Environment variables (`FOLIO_*`)
//! 4. Command-line overrides
//!
//! # Quick Start
//!
//! ```no_run
//! use folio_config::{CliOverrides, ConfigLoader};
//!
//! let config = ConfigLoader::new()
//!     .resolve(&CliOverrides::default())
//!     .expect("failed to resolve config");
//!
//! println!("API: {}", config.api_base());
//! println!("Initial count: {}", config.initial_count);
//! ```
//!
//! # Environment Variables
//!
//! - `FOLIO_API_URL` - Catalog service origin
//! - `FOLIO_API_PREFIX` - Path prefix of the public API
//! - `FOLIO_TIMEOUT_SECS` - Request timeout
//! - `FOLIO_INITIAL_COUNT` - Projects shown before scrolling (negative clamps to 0)
//! - `FOLIO_PAGE_LIMIT` - Page size for incremental loads
//! - `FOLIO_FEATURED_CAP` - Page size of the featured query
//! - `FOLIO_FILL_POLICY` - `dynamic` or `fixed`
//! - `FOLIO_SCROLL_MARGIN` - Proximity margin in logical pixels
//! - `FOLIO_PROFILE_TTL_SECS` - Profile freshness
//! - `FOLIO_SESSION_DIR`, `FOLIO_SESSION` - Session store location

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod env;
pub mod error;
pub mod loader;
pub mod types;

pub use env::{EnvConfig, FolioEnvVar};
pub use error::{ConfigError, Result};
pub use loader::{CliOverrides, ConfigLoader, ConfigSource};
pub use types::{
    DEFAULT_API_PREFIX, DEFAULT_API_URL, DEFAULT_FEATURED_CAP, DEFAULT_INITIAL_COUNT,
    DEFAULT_PAGE_LIMIT, DEFAULT_SCROLL_MARGIN, FillPolicy, FolioConfig, PartialConfig,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.initial_count, 15);
        assert_eq!(config.page_limit, 12);
        assert_eq!(config.featured_cap, 100);
        assert_eq!(config.fill_policy, FillPolicy::Dynamic);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.profile_ttl, Duration::from_secs(300));
        assert!((config.scroll_margin - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn api_base_joins_prefix() {
        let config = FolioConfig::default();
        assert_eq!(config.api_base(), "http://localhost:3001/api/v1/public");

        let bare = FolioConfig {
            api_prefix: "/".into(),
            ..FolioConfig::default()
        };
        assert_eq!(bare.api_base(), "http://localhost:3001");
    }

    #[test]
    fn session_path_is_scoped() {
        let config = FolioConfig {
            session_id: "tab-7".into(),
            ..FolioConfig::default()
        };
        assert!(config.session_path().ends_with("sessions/tab-7"));
    }

    #[test]
    fn env_var_names() {
        assert_eq!(FolioEnvVar::ApiUrl.as_str(), "FOLIO_API_URL");
        assert_eq!(FolioEnvVar::Session.as_str(), "FOLIO_SESSION");
    }
}
