//! Core types and utilities for the Folio portfolio client.
//!
//! Holds the catalog data model shared by the HTTP client, the session
//! cache and the pagination engine, together with the crate-wide error
//! type and sonic-rs JSON helpers.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod json;
mod profile;
mod project;
pub mod text;

pub use error::{Error, Result};
pub use json::{from_json, to_json};
pub use profile::{Experience, Position, Social, SocialPlatform, User};
pub use project::{
    Label, Page, Project, ProjectId, ProjectQuery, ProjectType, Stack, Tag, append_unique,
    filter_label,
};
