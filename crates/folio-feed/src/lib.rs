//! Featured-first infinite-scroll project feed for Folio.
//!
//! [`ProjectFeed`] owns the list state: it loads every featured project
//! first, fills up to the initial count with non-featured ones, then pages
//! through the remainder on demand. Each mutation is mirrored into the
//! session cache so a returning view can [`restore`](ProjectFeed::restore)
//! without a network round trip. [`ScrollLoader`] turns viewport geometry
//! into next-page requests.
//!
//! ```no_run
//! use folio_cache::MemoryStore;
//! use folio_client::HttpCatalogClient;
//! use folio_config::FolioConfig;
//! use folio_feed::{FeedOptions, ProjectFeed, ScrollLoader, Viewport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FolioConfig::default();
//! let feed = ProjectFeed::new(
//!     HttpCatalogClient::new(&config)?,
//!     MemoryStore::new(),
//!     FeedOptions::from_config(&config),
//! );
//! if !feed.restore() {
//!     feed.load_initial(None).await;
//! }
//!
//! let loader = ScrollLoader::from_config(&config);
//! loader.on_scroll(&feed, Viewport::new(3200.0, 800.0, 4400.0)).await;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod engine;
mod options;
mod scroll;
mod state;
#[cfg(test)]
mod testing;

pub use engine::ProjectFeed;
pub use options::FeedOptions;
pub use scroll::{ScrollLoader, Viewport};
pub use state::{FeedView, ListState, LoadOutcome, LoadPhase};
