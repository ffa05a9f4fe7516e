//! Environment variable support.

use crate::error::{ConfigError, Result};
use crate::types::{FillPolicy, PartialConfig};
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variables recognised by Folio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolioEnvVar {
    /// Catalog service origin.
    ApiUrl,
    /// API path prefix.
    ApiPrefix,
    /// Request timeout in seconds.
    TimeoutSecs,
    /// Initial list size.
    InitialCount,
    /// Incremental page size.
    PageLimit,
    /// Featured query page size.
    FeaturedCap,
    /// `dynamic` or `fixed`.
    FillPolicy,
    /// Scroll proximity margin.
    ScrollMargin,
    /// Profile freshness in seconds.
    ProfileTtlSecs,
    /// Session store directory.
    SessionDir,
    /// Session identifier.
    Session,
}

impl FolioEnvVar {
    /// Every variable, in documentation order.
    pub const ALL: [Self; 11] = [
        Self::ApiUrl,
        Self::ApiPrefix,
        Self::TimeoutSecs,
        Self::InitialCount,
        Self::PageLimit,
        Self::FeaturedCap,
        Self::FillPolicy,
        Self::ScrollMargin,
        Self::ProfileTtlSecs,
        Self::SessionDir,
        Self::Session,
    ];

    /// Variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiUrl => "FOLIO_API_URL",
            Self::ApiPrefix => "FOLIO_API_PREFIX",
            Self::TimeoutSecs => "FOLIO_TIMEOUT_SECS",
            Self::InitialCount => "FOLIO_INITIAL_COUNT",
            Self::PageLimit => "FOLIO_PAGE_LIMIT",
            Self::FeaturedCap => "FOLIO_FEATURED_CAP",
            Self::FillPolicy => "FOLIO_FILL_POLICY",
            Self::ScrollMargin => "FOLIO_SCROLL_MARGIN",
            Self::ProfileTtlSecs => "FOLIO_PROFILE_TTL_SECS",
            Self::SessionDir => "FOLIO_SESSION_DIR",
            Self::Session => "FOLIO_SESSION",
        }
    }
}

/// Configuration layer read from the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig;

impl EnvConfig {
    /// Read from the process environment.
    ///
    /// # Errors
    /// Returns error if a variable holds an unparsable value.
    pub fn from_env() -> Result<PartialConfig> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup, so callers can supply a fixed map.
    ///
    /// # Errors
    /// Returns error if a variable holds an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<PartialConfig> {
        let get = |var: FolioEnvVar| {
            lookup(var.as_str())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(PartialConfig {
            api_url: get(FolioEnvVar::ApiUrl),
            api_prefix: get(FolioEnvVar::ApiPrefix),
            timeout_secs: parse(FolioEnvVar::TimeoutSecs, get(FolioEnvVar::TimeoutSecs))?,
            initial_count: parse(FolioEnvVar::InitialCount, get(FolioEnvVar::InitialCount))?,
            page_limit: parse(FolioEnvVar::PageLimit, get(FolioEnvVar::PageLimit))?,
            featured_cap: parse(FolioEnvVar::FeaturedCap, get(FolioEnvVar::FeaturedCap))?,
            fill_policy: parse::<FillPolicy>(FolioEnvVar::FillPolicy, get(FolioEnvVar::FillPolicy))?,
            scroll_margin: parse(FolioEnvVar::ScrollMargin, get(FolioEnvVar::ScrollMargin))?,
            profile_ttl_secs: parse(
                FolioEnvVar::ProfileTtlSecs,
                get(FolioEnvVar::ProfileTtlSecs),
            )?,
            session_dir: get(FolioEnvVar::SessionDir).map(PathBuf::from),
            session_id: get(FolioEnvVar::Session),
        })
    }
}

fn parse<T>(var: FolioEnvVar, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|e| ConfigError::invalid(var.as_str(), &value, e.to_string()))
    })
    .transpose()
}
