//! The catalog query seam consumed by the pagination engine.

use crate::error::Result;
use folio_core::{Page, Project, ProjectQuery, User};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`CatalogApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Remote project catalog and profile service.
///
/// Implementations surface both transport and server failures to the
/// caller and never retry.
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of projects matching `query`.
    ///
    /// # Errors
    /// Returns `Network` on transport failure and `Server` on a non-success response.
    fn fetch_page<'a>(&'a self, query: &'a ProjectQuery) -> ApiFuture<'a, Page<Project>>;

    /// Fetch the site owner's profile.
    ///
    /// # Errors
    /// Returns `Network` on transport failure and `Server` on a non-success response.
    fn fetch_profile(&self) -> ApiFuture<'_, User>;
}

impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    fn fetch_page<'a>(&'a self, query: &'a ProjectQuery) -> ApiFuture<'a, Page<Project>> {
        (**self).fetch_page(query)
    }

    fn fetch_profile(&self) -> ApiFuture<'_, User> {
        (**self).fetch_profile()
    }
}
