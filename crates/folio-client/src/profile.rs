//! Time-bounded profile lookup.

use crate::api::CatalogApi;
use folio_core::User;
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, error};

const PROFILE_KEY: &str = "user-profile";

/// Serves the profile record, re-fetching at most once per TTL.
pub struct ProfileService<A> {
    api: A,
    cache: Cache<&'static str, User>,
}

impl<A> std::fmt::Debug for ProfileService<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileService")
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl<A: CatalogApi> ProfileService<A> {
    /// Wrap `api`, keeping a fetched profile for `ttl`.
    pub fn new(api: A, ttl: Duration) -> Self {
        Self {
            api,
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// Current profile, or `None` when it cannot be fetched.
    ///
    /// Failures are logged and not cached, so the next call tries again.
    pub async fn profile(&self) -> Option<User> {
        let result = self
            .cache
            .try_get_with(PROFILE_KEY, async {
                debug!("fetching profile");
                self.api.fetch_profile().await
            })
            .await;

        match result {
            Ok(user) => Some(user),
            Err(e) => {
                error!(error = %e, "failed to fetch user profile");
                None
            }
        }
    }

    /// Drop the cached profile.
    pub async fn invalidate(&self) {
        self.cache.invalidate(PROFILE_KEY).await;
    }
}
