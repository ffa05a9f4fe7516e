//! Profile record kept between runs.

use crate::store::SessionStore;
use chrono::{DateTime, Utc};
use folio_core::{Result, User, from_json, to_json};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Key the profile is stored under.
pub const PROFILE_KEY: &str = "user-profile";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProfile {
    fetched_at: DateTime<Utc>,
    user: User,
}

/// The `user-profile` blob, trusted for `ttl` after it was fetched.
#[derive(Debug)]
pub struct ProfileCache<S> {
    store: S,
    ttl: Duration,
}

impl<S: SessionStore> ProfileCache<S> {
    /// Wrap `store`, treating saved profiles as fresh for `ttl`.
    pub const fn new(store: S, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Saved profile, if it was fetched less than `ttl` ago.
    pub fn fresh(&self) -> Option<User> {
        self.fresh_at(Utc::now())
    }

    /// Save a freshly fetched profile.
    ///
    /// # Errors
    /// Returns error if the blob cannot be written.
    pub fn save(&self, user: &User) -> Result<()> {
        self.save_at(user, Utc::now())
    }

    fn fresh_at(&self, now: DateTime<Utc>) -> Option<User> {
        let raw = match self.store.get(PROFILE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read saved profile");
                return None;
            }
        };
        let stored = match from_json::<StoredProfile>(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "discarding corrupt saved profile");
                return None;
            }
        };

        let age = now.signed_duration_since(stored.fetched_at).to_std().ok()?;
        if age < self.ttl {
            debug!(age_secs = age.as_secs(), "using saved profile");
            Some(stored.user)
        } else {
            debug!(age_secs = age.as_secs(), "saved profile expired");
            None
        }
    }

    fn save_at(&self, user: &User, now: DateTime<Utc>) -> Result<()> {
        let blob = to_json(&StoredProfile {
            fetched_at: now,
            user: user.clone(),
        })?;
        self.store.set(PROFILE_KEY, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn user() -> User {
        User {
            id: "u1".into(),
            email: "ada@example.com".into(),
            name: "Ada".into(),
            title: "Engineer".into(),
            bio: String::new(),
            avatar: None,
            socials: Vec::new(),
            experiences: Vec::new(),
        }
    }

    #[test]
    fn saved_profile_is_fresh_within_ttl() {
        let cache = ProfileCache::new(MemoryStore::new(), Duration::from_secs(300));
        let fetched = Utc::now();
        cache.save_at(&user(), fetched).unwrap();

        let later = fetched + chrono::Duration::seconds(299);
        assert_eq!(cache.fresh_at(later), Some(user()));

        let expired = fetched + chrono::Duration::seconds(300);
        assert_eq!(cache.fresh_at(expired), None);
    }

    #[test]
    fn missing_or_corrupt_profile_is_not_fresh() {
        let store = MemoryStore::new();
        store.set(PROFILE_KEY, "{broken").unwrap();
        let cache = ProfileCache::new(store, Duration::from_secs(300));
        assert_eq!(cache.fresh(), None);

        let empty = ProfileCache::new(MemoryStore::new(), Duration::from_secs(300));
        assert_eq!(empty.fresh(), None);
    }

    #[test]
    fn profile_saved_in_the_future_is_ignored() {
        let cache = ProfileCache::new(MemoryStore::new(), Duration::from_secs(300));
        let now = Utc::now();
        cache.save_at(&user(), now + chrono::Duration::seconds(60)).unwrap();
        assert_eq!(cache.fresh_at(now), None);
    }
}
