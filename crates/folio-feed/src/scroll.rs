//! Proximity-triggered page loading.

use crate::engine::ProjectFeed;
use crate::state::LoadOutcome;
use folio_cache::SessionStore;
use folio_client::CatalogApi;
use folio_config::{DEFAULT_SCROLL_MARGIN, FolioConfig};

/// Scroll geometry along the main axis, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Offset of the visible window from the top of the list.
    pub scroll_offset: f64,
    /// Height of the visible window.
    pub viewport_extent: f64,
    /// Offset of the sentinel placed after the last rendered item.
    pub sentinel_offset: f64,
}

impl Viewport {
    /// Geometry from its three offsets.
    #[must_use]
    pub const fn new(scroll_offset: f64, viewport_extent: f64, sentinel_offset: f64) -> Self {
        Self {
            scroll_offset,
            viewport_extent,
            sentinel_offset,
        }
    }

    /// Distance from the bottom of the visible window to the sentinel.
    /// Negative once the sentinel is on screen.
    #[must_use]
    pub fn distance_to_sentinel(&self) -> f64 {
        self.sentinel_offset - (self.scroll_offset + self.viewport_extent)
    }
}

/// Fires the next page when the list end comes within `margin` of the
/// visible window.
///
/// The check is level-triggered: call [`on_scroll`](Self::on_scroll) on
/// every scroll or layout event. Repeated events during one crossing are
/// absorbed by the feed's in-flight guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLoader {
    margin: f64,
}

impl Default for ScrollLoader {
    fn default() -> Self {
        Self {
            margin: DEFAULT_SCROLL_MARGIN,
        }
    }
}

impl ScrollLoader {
    /// Loader with a proximity margin. Negative or non-finite margins become 0.
    #[must_use]
    pub fn new(margin: f64) -> Self {
        let margin = if margin.is_finite() { margin.max(0.0) } else { 0.0 };
        Self { margin }
    }

    /// Loader using the configured margin.
    #[must_use]
    pub fn from_config(config: &FolioConfig) -> Self {
        Self::new(config.scroll_margin)
    }

    /// Proximity margin.
    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    /// Whether the sentinel is within the margin of the visible window.
    #[must_use]
    pub fn is_near_end(&self, viewport: &Viewport) -> bool {
        viewport.distance_to_sentinel() <= self.margin
    }

    /// Record the scroll offset and, when near the end with more pages
    /// available and nothing in flight, load the next page.
    ///
    /// Returns `None` when no load was started.
    pub async fn on_scroll<A, S>(
        &self,
        feed: &ProjectFeed<A, S>,
        viewport: Viewport,
    ) -> Option<LoadOutcome>
    where
        A: CatalogApi,
        S: SessionStore,
    {
        feed.set_scroll_position(viewport.scroll_offset);

        if !self.is_near_end(&viewport) || !feed.has_next_page() || feed.is_fetching() {
            return None;
        }
        Some(feed.load_next_page().await)
    }
}
