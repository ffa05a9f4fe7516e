//! Session-scoped persistence for Folio.
//!
//! A [`SessionStore`] holds string blobs for one browsing session; the
//! [`ProjectsCache`] keeps the project list, pagination counters, active
//! filter and scroll offset under the `projects-cache` key so a returning
//! view can restore without touching the network. [`ProfileCache`] keeps
//! the last fetched profile under `user-profile` so its freshness window
//! outlives a single process.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod profile;
mod projects;
mod store;

pub use profile::{PROFILE_KEY, ProfileCache};
pub use projects::{CACHE_KEY, ProjectsCache, Snapshot};
pub use store::{FileStore, MemoryStore, SessionStore};
