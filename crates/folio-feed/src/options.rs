//! Feed sizing options.

use folio_config::{
    DEFAULT_FEATURED_CAP, DEFAULT_INITIAL_COUNT, DEFAULT_PAGE_LIMIT, FillPolicy, FolioConfig,
};

/// How many projects the feed loads and in which page sizes.
///
/// Page sizes are always at least 1; build values through
/// [`from_config`](Self::from_config) and the `with_*` setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    initial_count: usize,
    page_limit: u32,
    featured_cap: u32,
    fill_policy: FillPolicy,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            initial_count: DEFAULT_INITIAL_COUNT,
            page_limit: DEFAULT_PAGE_LIMIT,
            featured_cap: DEFAULT_FEATURED_CAP,
            fill_policy: FillPolicy::Dynamic,
        }
    }
}

impl FeedOptions {
    /// Options from resolved configuration.
    #[must_use]
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            initial_count: config.initial_count,
            page_limit: config.page_limit.max(1),
            featured_cap: config.featured_cap.max(1),
            fill_policy: config.fill_policy,
        }
    }

    /// Projects shown before the first scroll-triggered page.
    #[must_use]
    pub const fn initial_count(&self) -> usize {
        self.initial_count
    }

    /// Page size of incremental loads.
    #[must_use]
    pub const fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Page size of the featured query.
    #[must_use]
    pub const fn featured_cap(&self) -> u32 {
        self.featured_cap
    }

    /// Sizing of the initial non-featured fill.
    #[must_use]
    pub const fn fill_policy(&self) -> FillPolicy {
        self.fill_policy
    }

    /// Set the initial count. Negative values clamp to 0.
    #[must_use]
    pub fn with_initial_count(mut self, count: i64) -> Self {
        self.initial_count = usize::try_from(count.max(0)).unwrap_or(usize::MAX);
        self
    }

    /// Set the incremental page size (at least 1).
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    /// Set the featured page size (at least 1).
    #[must_use]
    pub fn with_featured_cap(mut self, cap: u32) -> Self {
        self.featured_cap = cap.max(1);
        self
    }

    /// Set the fill policy.
    #[must_use]
    pub const fn with_fill_policy(mut self, policy: FillPolicy) -> Self {
        self.fill_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_initial_count_clamps() {
        let options = FeedOptions::default().with_initial_count(-4);
        assert_eq!(options.initial_count, 0);
    }

    #[test]
    fn from_config_copies_sizes() {
        let config = FolioConfig {
            initial_count: 9,
            page_limit: 4,
            fill_policy: FillPolicy::Fixed,
            ..FolioConfig::default()
        };
        let options = FeedOptions::from_config(&config);
        assert_eq!(options.initial_count, 9);
        assert_eq!(options.page_limit, 4);
        assert_eq!(options.featured_cap, 100);
        assert_eq!(options.fill_policy, FillPolicy::Fixed);
    }

    #[test]
    fn page_sizes_never_reach_zero() {
        let config = FolioConfig {
            page_limit: 0,
            featured_cap: 0,
            ..FolioConfig::default()
        };
        let options = FeedOptions::from_config(&config);
        assert_eq!(options.page_limit(), 1);
        assert_eq!(options.featured_cap(), 1);

        let options = FeedOptions::default()
            .with_page_limit(0)
            .with_featured_cap(0);
        assert_eq!(options.page_limit(), 1);
        assert_eq!(options.featured_cap(), 1);
    }
}
