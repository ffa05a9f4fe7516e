//! List state and the views derived from it.

use folio_cache::Snapshot;
use folio_core::{Project, ProjectType};

/// Working state of the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    /// Projects in display order: featured first, then non-featured.
    pub projects: Vec<Project>,
    /// Number of leading featured projects.
    pub featured_count: usize,
    /// Last fetched non-featured page; 0 when none was fetched for display.
    pub cursor: u32,
    /// Page size `cursor` counts in.
    pub page_limit: u32,
    /// Non-featured projects matching the filter.
    pub non_featured_total: u64,
    /// Active classification filter.
    pub filter: Option<ProjectType>,
    /// Last known scroll offset.
    pub scroll_position: f64,
}

impl ListState {
    /// Empty state for `filter`.
    #[must_use]
    pub fn empty(filter: Option<ProjectType>) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Non-featured projects in the list.
    #[must_use]
    pub fn non_featured_loaded(&self) -> usize {
        self.projects.len().saturating_sub(self.featured_count)
    }

    /// Whether more non-featured projects remain on the server.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        (self.non_featured_loaded() as u64) < self.non_featured_total
    }

    /// Serializable copy.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            projects: self.projects.clone(),
            featured_count: self.featured_count,
            non_featured_total: self.non_featured_total,
            non_featured_page: self.cursor,
            page_limit: self.page_limit,
            selected_type: self.filter,
            scroll_position: self.scroll_position,
        }
    }
}

impl From<Snapshot> for ListState {
    fn from(snapshot: Snapshot) -> Self {
        let featured_count = snapshot.featured_count.min(snapshot.projects.len());
        Self {
            projects: snapshot.projects,
            featured_count,
            cursor: snapshot.non_featured_page,
            page_limit: snapshot.page_limit,
            non_featured_total: snapshot.non_featured_total,
            filter: snapshot.selected_type,
            scroll_position: snapshot.scroll_position,
        }
    }
}

/// Lifecycle of the initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Initial load in progress.
    Loading,
    /// List populated, possibly empty.
    Loaded,
    /// Initial load failed.
    Failed,
}

/// What a list view should render.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedView {
    /// Initial load pending.
    Loading,
    /// Initial load failed.
    Failed,
    /// No project matches the filter.
    Empty,
    /// Projects to show.
    Ready {
        /// Projects in display order.
        projects: Vec<Project>,
        /// Number of leading featured projects.
        featured_count: usize,
        /// Whether scrolling further can load more.
        has_next_page: bool,
        /// Whether a next-page fetch is outstanding.
        fetching_next: bool,
    },
}

/// Result of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Response applied; carries the number of projects added.
    Appended(usize),
    /// Another page fetch is outstanding.
    Busy,
    /// Every non-featured project is already loaded.
    Exhausted,
    /// Response arrived after the filter changed and was dropped.
    Stale,
    /// Fetch failed; state left unchanged.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_next_counts_only_non_featured() {
        let mut state = ListState::empty(None);
        state.projects = vec![
            Project::new("f", "F", ProjectType::Web).featured(true),
            Project::new("n", "N", ProjectType::Web),
        ];
        state.featured_count = 1;
        state.non_featured_total = 2;
        assert!(state.has_next_page());

        state.non_featured_total = 1;
        assert!(!state.has_next_page());
    }

    #[test]
    fn snapshot_conversion_clamps_featured_count() {
        let snapshot = Snapshot {
            projects: vec![Project::new("a", "A", ProjectType::App)],
            featured_count: 4,
            non_featured_total: 3,
            non_featured_page: 2,
            page_limit: 5,
            selected_type: Some(ProjectType::App),
            scroll_position: 12.0,
        };
        let state = ListState::from(snapshot);
        assert_eq!(state.featured_count, 1);
        assert_eq!(state.cursor, 2);
        assert_eq!(state.page_limit, 5);
        assert_eq!(state.to_snapshot().featured_count, 1);
    }
}
