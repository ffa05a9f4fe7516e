//! Featured-first pagination and merge engine.

use crate::options::FeedOptions;
use crate::state::{FeedView, ListState, LoadOutcome, LoadPhase};
use folio_cache::{ProjectsCache, SessionStore};
use folio_client::CatalogApi;
use folio_config::FillPolicy;
use folio_core::{Project, ProjectQuery, ProjectType, append_unique, filter_label};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
struct Inner {
    list: ListState,
    phase: LoadPhase,
}

/// Generation and filter a page fetch was issued under.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    generation: u64,
    filter: Option<ProjectType>,
}

/// Complete pages of `page_limit` items covered by `loaded` items.
fn aligned_cursor(loaded: usize, page_limit: u32) -> u32 {
    let page_limit = usize::try_from(page_limit.max(1)).unwrap_or(usize::MAX);
    u32::try_from(loaded / page_limit).unwrap_or(u32::MAX)
}

/// Holds the in-flight flag; clears it on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct InitialLoad {
    projects: Vec<Project>,
    featured_count: usize,
    cursor: u32,
    non_featured_total: u64,
}

/// Project list that loads featured projects first and then pages through
/// the rest as the reader scrolls.
///
/// Every operation takes `&self`. Lock guards are never held across a
/// fetch, so a view can fire overlapping triggers against one feed; at most
/// one next-page fetch is outstanding at a time.
pub struct ProjectFeed<A, S> {
    api: A,
    cache: ProjectsCache<S>,
    options: FeedOptions,
    inner: Mutex<Inner>,
    in_flight: AtomicBool,
    generation: AtomicU64,
}

impl<A, S> std::fmt::Debug for ProjectFeed<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ProjectFeed")
            .field("options", &self.options)
            .field("phase", &inner.phase)
            .field("projects", &inner.list.projects.len())
            .field("featured_count", &inner.list.featured_count)
            .field("cursor", &inner.list.cursor)
            .field("non_featured_total", &inner.list.non_featured_total)
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish()
    }
}

impl<A: CatalogApi, S: SessionStore> ProjectFeed<A, S> {
    /// Create an idle feed over `api`, mirroring its state into `store`.
    pub fn new(api: A, store: S, options: FeedOptions) -> Self {
        Self {
            api,
            cache: ProjectsCache::new(store),
            options,
            inner: Mutex::new(Inner::default()),
            in_flight: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Sizing options.
    pub const fn options(&self) -> &FeedOptions {
        &self.options
    }

    /// Session cache mirroring the list.
    pub const fn cache(&self) -> &ProjectsCache<S> {
        &self.cache
    }

    /// Seed the list from the session cache without touching the network.
    ///
    /// Returns `false` when the session holds no usable list; the caller
    /// should then run [`load_initial`](Self::load_initial).
    pub fn restore(&self) -> bool {
        let Some(snapshot) = self.cache.load() else {
            return false;
        };
        if snapshot.projects.is_empty() {
            debug!("cached project list is empty, not restoring");
            return false;
        }

        let mut list = ListState::from(snapshot);
        let page_limit = self.options.page_limit();
        if list.page_limit != page_limit {
            // The stored cursor counts pages of another size.
            let aligned = aligned_cursor(list.non_featured_loaded(), page_limit);
            debug!(
                stored_limit = list.page_limit,
                page_limit,
                stored_cursor = list.cursor,
                aligned,
                "page size changed since the list was cached, realigning cursor"
            );
            list.cursor = aligned;
            list.page_limit = page_limit;
            persisted(self.cache.set_cursor(aligned, page_limit));
        }

        self.generation.fetch_add(1, Ordering::AcqRel);
        info!(
            projects = list.projects.len(),
            featured = list.featured_count,
            filter = filter_label(list.filter),
            scroll = list.scroll_position,
            "restored project list from session cache"
        );

        let mut inner = self.inner.lock();
        inner.list = list;
        inner.phase = LoadPhase::Loaded;
        true
    }

    /// Load featured projects, then enough non-featured ones to reach the
    /// initial count.
    ///
    /// On failure the list is left as it was and the phase becomes
    /// [`LoadPhase::Failed`].
    pub async fn load_initial(&self, filter: Option<ProjectType>) -> LoadOutcome {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.inner.lock().phase = LoadPhase::Loading;

        let result = self.fetch_initial(filter).await;

        let mut inner = self.inner.lock();
        if self.generation.load(Ordering::Acquire) != generation {
            debug!(
                filter = filter_label(filter),
                "discarding initial load superseded by a newer one"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(initial) => {
                let count = initial.projects.len();
                inner.list = ListState {
                    projects: initial.projects,
                    featured_count: initial.featured_count,
                    cursor: initial.cursor,
                    non_featured_total: initial.non_featured_total,
                    page_limit: self.options.page_limit(),
                    filter,
                    scroll_position: inner.list.scroll_position,
                };
                inner.phase = LoadPhase::Loaded;
                // Page fetches issued against the previous list must not land on this one.
                self.generation.fetch_add(1, Ordering::AcqRel);
                persisted(self.cache.replace_snapshot(inner.list.to_snapshot()));

                info!(
                    filter = filter_label(filter),
                    projects = count,
                    featured = inner.list.featured_count,
                    non_featured_total = inner.list.non_featured_total,
                    cursor = inner.list.cursor,
                    "loaded initial projects"
                );
                LoadOutcome::Appended(count)
            }
            Err(e) => {
                error!(filter = filter_label(filter), error = %e, "failed to load projects");
                inner.phase = LoadPhase::Failed;
                LoadOutcome::Failed
            }
        }
    }

    async fn fetch_initial(
        &self,
        filter: Option<ProjectType>,
    ) -> folio_client::Result<InitialLoad> {
        let initial_count = self.options.initial_count();
        let page_limit = self.options.page_limit();
        let featured_cap = self.options.featured_cap();

        let featured_query = ProjectQuery::visible(true, filter).paged(1, featured_cap);
        let featured = self.api.fetch_page(&featured_query).await?;
        if featured.total > featured.data.len() as u64 {
            warn!(
                total = featured.total,
                received = featured.data.len(),
                cap = featured_cap,
                "featured projects exceed the featured page size"
            );
        }

        let mut projects = Vec::with_capacity(initial_count.max(featured.data.len()));
        append_unique(&mut projects, featured.data);
        let featured_count = projects.len();

        let needed = initial_count.saturating_sub(featured_count);
        if needed == 0 {
            let probe = ProjectQuery::visible(false, filter).paged(1, 1);
            let page = self.api.fetch_page(&probe).await?;
            debug!(
                featured = featured_count,
                non_featured_total = page.total,
                "featured projects fill the initial view, probed non-featured total"
            );
            return Ok(InitialLoad {
                projects,
                featured_count,
                cursor: 0,
                non_featured_total: page.total,
            });
        }

        let requested = match self.options.fill_policy() {
            FillPolicy::Dynamic => u32::try_from(needed).unwrap_or(u32::MAX),
            FillPolicy::Fixed => page_limit,
        };
        let fill_query = ProjectQuery::visible(false, filter).paged(1, requested);
        let page = self.api.fetch_page(&fill_query).await?;

        let received = page.data.len();
        let mut fill = page.data;
        fill.truncate(needed);
        let trimmed = received > fill.len();
        append_unique(&mut projects, fill);
        let loaded = projects.len() - featured_count;

        // Later pages are page_limit sized, so a fill of any other shape
        // resumes from the last complete page boundary.
        let cursor = if page.limit == page_limit && !trimmed {
            page.page
        } else {
            let aligned = aligned_cursor(loaded, page_limit);
            debug!(
                server_page = page.page,
                loaded, aligned, "aligned non-featured cursor to page boundary"
            );
            aligned
        };

        Ok(InitialLoad {
            projects,
            featured_count,
            cursor,
            non_featured_total: page.total,
        })
    }

    /// Fetch the next non-featured page and append it.
    ///
    /// Returns immediately with [`LoadOutcome::Busy`] while another fetch
    /// is outstanding and with [`LoadOutcome::Exhausted`] once every
    /// non-featured project is loaded. A failed fetch leaves the list and
    /// [`has_next_page`](Self::has_next_page) untouched.
    pub async fn load_next_page(&self) -> LoadOutcome {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            debug!("next page already in flight");
            return LoadOutcome::Busy;
        };

        let (ticket, query) = {
            let inner = self.inner.lock();
            if inner.phase == LoadPhase::Loading {
                return LoadOutcome::Busy;
            }
            if !inner.list.has_next_page() {
                return LoadOutcome::Exhausted;
            }
            let ticket = Ticket {
                generation: self.generation.load(Ordering::Acquire),
                filter: inner.list.filter,
            };
            let query = ProjectQuery::visible(false, inner.list.filter)
                .paged(inner.list.cursor.saturating_add(1), self.options.page_limit());
            (ticket, query)
        };

        debug!(
            page = query.page,
            filter = filter_label(ticket.filter),
            "requesting next page"
        );
        let result = self.api.fetch_page(&query).await;

        let mut inner = self.inner.lock();
        if self.generation.load(Ordering::Acquire) != ticket.generation
            || inner.list.filter != ticket.filter
        {
            debug!(
                filter = filter_label(ticket.filter),
                "discarding page fetched under a replaced filter"
            );
            return LoadOutcome::Stale;
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                error!(page = query.page, error = %e, "failed to load next page");
                return LoadOutcome::Failed;
            }
        };

        let before = inner.list.projects.len();
        let empty = page.data.is_empty();
        let added = append_unique(&mut inner.list.projects, page.data);
        inner.list.cursor = page.page;

        persisted(self.cache.append(inner.list.projects[before..].to_vec()));
        persisted(self.cache.set_cursor(inner.list.cursor, inner.list.page_limit));

        if empty && inner.list.has_next_page() {
            let loaded = inner.list.non_featured_loaded() as u64;
            warn!(
                expected = inner.list.non_featured_total,
                loaded, "catalog ran out of projects early, lowering total"
            );
            inner.list.non_featured_total = loaded;
            persisted(
                self.cache
                    .set_counts(inner.list.featured_count, inner.list.non_featured_total),
            );
        }

        debug!(
            page = inner.list.cursor,
            added,
            projects = inner.list.projects.len(),
            has_next = inner.list.has_next_page(),
            "appended page"
        );
        LoadOutcome::Appended(added)
    }

    /// Reset the list for `filter` and load it from scratch.
    ///
    /// The view reports [`FeedView::Loading`] until the load settles, and
    /// any page still in flight for the previous filter is dropped on
    /// arrival.
    pub async fn set_filter(&self, filter: Option<ProjectType>) -> LoadOutcome {
        info!(filter = filter_label(filter), "changing filter");
        self.generation.fetch_add(1, Ordering::AcqRel);
        {
            let mut inner = self.inner.lock();
            inner.list = ListState::empty(filter);
            inner.phase = LoadPhase::Loading;
            persisted(self.cache.clear());
            persisted(self.cache.set_filter(filter));
        }
        self.load_initial(filter).await
    }

    /// Find a project by identifier or slug.
    ///
    /// The loaded list is searched first; only when it holds no match are
    /// visible projects paged through from the catalog, in featured-cap
    /// sized pages. Returns `Ok(None)` when the catalog has no such project.
    ///
    /// # Errors
    /// Returns the client error of a failed catalog page.
    pub async fn find(&self, key: &str) -> folio_client::Result<Option<Project>> {
        let loaded = self
            .inner
            .lock()
            .list
            .projects
            .iter()
            .find(|p| p.matches(key))
            .cloned();
        if let Some(project) = loaded {
            debug!(key, id = %project.id, "found project in loaded list");
            return Ok(Some(project));
        }

        let limit = self.options.featured_cap();
        let mut page = 1;
        loop {
            let query = ProjectQuery {
                is_visible: Some(true),
                ..ProjectQuery::default()
            }
            .paged(page, limit);
            let result = self.api.fetch_page(&query).await?;
            if let Some(project) = result.data.iter().find(|p| p.matches(key)) {
                debug!(key, id = %project.id, page, "found project in catalog");
                return Ok(Some(project.clone()));
            }

            let seen = u64::from(result.page) * u64::from(result.limit.max(1));
            if result.data.is_empty() || seen >= result.total {
                debug!(key, pages = page, "project not in catalog");
                return Ok(None);
            }
            page = result.page.saturating_add(1);
        }
    }

    /// Whether more non-featured projects remain.
    pub fn has_next_page(&self) -> bool {
        self.inner.lock().list.has_next_page()
    }

    /// Whether a next-page fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Initial load phase.
    pub fn phase(&self) -> LoadPhase {
        self.inner.lock().phase
    }

    /// Active filter.
    pub fn filter(&self) -> Option<ProjectType> {
        self.inner.lock().list.filter
    }

    /// Projects in display order.
    pub fn projects(&self) -> Vec<Project> {
        self.inner.lock().list.projects.clone()
    }

    /// Copy of the working state.
    pub fn state(&self) -> ListState {
        self.inner.lock().list.clone()
    }

    /// Renderable state of the list.
    pub fn view(&self) -> FeedView {
        let inner = self.inner.lock();
        match inner.phase {
            LoadPhase::Idle | LoadPhase::Loading => FeedView::Loading,
            LoadPhase::Failed => FeedView::Failed,
            LoadPhase::Loaded if inner.list.projects.is_empty() => FeedView::Empty,
            LoadPhase::Loaded => FeedView::Ready {
                projects: inner.list.projects.clone(),
                featured_count: inner.list.featured_count,
                has_next_page: inner.list.has_next_page(),
                fetching_next: self.is_fetching(),
            },
        }
    }

    /// Record the last known scroll offset. Non-finite offsets are ignored.
    pub fn set_scroll_position(&self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        let offset = offset.max(0.0);

        let mut inner = self.inner.lock();
        if (inner.list.scroll_position - offset).abs() < f64::EPSILON {
            return;
        }
        inner.list.scroll_position = offset;
        persisted(self.cache.set_scroll_position(offset));
    }
}

fn persisted<T>(result: folio_core::Result<T>) {
    if let Err(e) = result {
        warn!(error = %e, "failed to persist projects cache");
    }
}
