//! Durable mirror of the project list.

use crate::store::SessionStore;
use folio_core::{Project, ProjectType, Result, append_unique, from_json, to_json};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Key the project list is stored under.
pub const CACHE_KEY: &str = "projects-cache";

/// Serialized list state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Projects in display order.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Number of leading featured projects.
    #[serde(default)]
    pub featured_count: usize,
    /// Non-featured items matching the filter.
    #[serde(default)]
    pub non_featured_total: u64,
    /// Last fetched non-featured page.
    #[serde(default)]
    pub non_featured_page: u32,
    /// Page size `non_featured_page` counts in; 0 when unknown.
    #[serde(default)]
    pub page_limit: u32,
    /// Active classification filter.
    #[serde(default)]
    pub selected_type: Option<ProjectType>,
    /// Last known scroll offset.
    #[serde(default)]
    pub scroll_position: f64,
}

impl Snapshot {
    /// Non-featured items currently in the list.
    #[must_use]
    pub fn non_featured_loaded(&self) -> usize {
        self.projects.len().saturating_sub(self.featured_count)
    }
}

/// The `projects-cache` blob and its in-memory copy.
///
/// Every mutation re-serializes the whole snapshot and replaces the stored
/// blob. The cache never triggers fetches.
#[derive(Debug)]
pub struct ProjectsCache<S> {
    store: S,
    mirror: Mutex<Snapshot>,
}

impl<S: SessionStore> ProjectsCache<S> {
    /// Wrap `store` with an empty mirror. Call [`load`](Self::load) to read
    /// what the session already holds.
    pub fn new(store: S) -> Self {
        Self {
            store,
            mirror: Mutex::new(Snapshot::default()),
        }
    }

    /// Backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored blob into the mirror.
    ///
    /// Returns `None` when nothing is stored. An unreadable or corrupt blob
    /// is logged and treated as absent.
    pub fn load(&self) -> Option<Snapshot> {
        let raw = match self.store.get(CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read projects cache");
                return None;
            }
        };

        match from_json::<Snapshot>(&raw) {
            Ok(snapshot) => {
                debug!(
                    projects = snapshot.projects.len(),
                    featured = snapshot.featured_count,
                    filter = ?snapshot.selected_type,
                    "loaded projects cache"
                );
                *self.mirror.lock() = snapshot.clone();
                Some(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "discarding corrupt projects cache");
                None
            }
        }
    }

    /// Copy of the current mirror.
    pub fn snapshot(&self) -> Snapshot {
        self.mirror.lock().clone()
    }

    /// Replace the stored list.
    ///
    /// # Errors
    /// Returns error if the blob cannot be written.
    pub fn replace_all(&self, projects: Vec<Project>) -> Result<()> {
        self.update(|s| s.projects = projects)
    }

    /// Append projects whose identifiers are not stored yet. Returns how many
    /// were added.
    ///
    /// # Errors
    /// Returns error if the blob cannot be written.
    pub fn append(&self, projects: Vec<Project>) -> Result<usize> {
        let mut added = 0;
        self.update(|s| added = append_unique(&mut s.projects, projects))?;
        Ok(added)
    }

    /// Record the featured count and non-featured total.
    ///
    /// # Errors
    /// Returns error if the blob cannot be written.
    pub fn set_counts(&self, featured_count: usize, non_featured_total: u64) -> Result<()> {
        self.update(|s| {
            s.featured_count = featured_count;
            s.non_featured_total = non_featured_total;
        })
    }

    /// Record the last fetched non-featured page and the page size it was
    /// fetched with.
    ///
    /// # Errors
    /// Returns error if the blob cannot be written.
    pub fn set_cursor(&self, page: u32, page_limit: u32) -> Result<()> {
        self.update(|s| {
            s.non_featured_page = page;
            s.page_limit = page_limit;
        })
    }

    /// Record the active filter.
    ///
    /// # Errors
    /// Returns error if the blob cannot be written.
    pub fn set_filter(&self, filter: Option<ProjectType>) -> Result<()> {
        self.update(|s| s.selected_type = filter)
    }

    /// Record the scroll offset.
    ///
    /// # Errors
    /// Returns error if the blob cannot be written.
    pub fn set_scroll_position(&self, offset: f64) -> Result<()> {
        self.update(|s| s.scroll_position = offset)
    }

    /// Replace the whole snapshot in one write.
    ///
    /// # Errors
    /// Returns error if the blob cannot be written.
    pub fn replace_snapshot(&self, snapshot: Snapshot) -> Result<()> {
        self.update(|s| *s = snapshot)
    }

    /// Remove the stored blob and reset the mirror.
    ///
    /// # Errors
    /// Returns error if the blob cannot be removed.
    pub fn clear(&self) -> Result<()> {
        let mut mirror = self.mirror.lock();
        *mirror = Snapshot::default();
        self.store.remove(CACHE_KEY)?;
        debug!("cleared projects cache");
        Ok(())
    }

    fn update(&self, mutate: impl FnOnce(&mut Snapshot)) -> Result<()> {
        let mut mirror = self.mirror.lock();
        mutate(&mut mirror);
        let blob = to_json(&*mirror)?;
        self.store.set(CACHE_KEY, &blob)
    }
}
