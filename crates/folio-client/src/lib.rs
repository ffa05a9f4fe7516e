//! Catalog and profile API client for Folio.
//!
//! The [`CatalogApi`] trait is the seam the pagination engine consumes;
//! [`HttpCatalogClient`] implements it against the public JSON API:
//!
//! - `GET {base}/projects?isVisible=&isFeatured=&type=&page=&limit=` returns
//!   `{ success, data, page, limit, total }`
//! - `GET {base}/user/me` returns `{ success, data }`
//! - failures use `{ success: false, message }`
//!
//! Transport failures surface as [`ClientError::Network`], non-success
//! responses as [`ClientError::Server`]. Nothing here retries.
//!
//! ## Example
//!
//! ```no_run
//! use folio_client::{CatalogApi, HttpCatalogClient};
//! use folio_config::FolioConfig;
//! use folio_core::ProjectQuery;
//!
//! # async fn example() -> folio_client::Result<()> {
//! let client = HttpCatalogClient::new(&FolioConfig::default())?;
//! let query = ProjectQuery::visible(true, None).paged(1, 100);
//! let page = client.fetch_page(&query).await?;
//! println!("{} featured of {}", page.data.len(), page.total);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod error;
pub mod http;
pub mod profile;

pub use api::{ApiFuture, CatalogApi};
pub use error::{ClientError, Result};
pub use http::HttpCatalogClient;
pub use profile::ProfileService;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
