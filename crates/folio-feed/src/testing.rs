//! In-memory catalog for engine tests.

use folio_client::{ApiFuture, CatalogApi, ClientError};
use folio_core::{Page, Project, ProjectQuery, ProjectType, User};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Semaphore;

type Gate = Box<dyn Fn(&ProjectQuery) -> bool + Send + Sync>;

/// `featured` projects `f1..` followed by `non_featured` projects `n1..`,
/// classifications cycling through `types`.
pub fn dataset(featured: usize, non_featured: usize, types: &[ProjectType]) -> Vec<Project> {
    let kind = |i: usize| types[i % types.len()];
    let featured = (0..featured).map(|i| {
        Project::new(format!("f{}", i + 1), format!("Featured {}", i + 1), kind(i)).featured(true)
    });
    let rest = (0..non_featured)
        .map(|i| Project::new(format!("n{}", i + 1), format!("Project {}", i + 1), kind(i)));
    featured.chain(rest).collect()
}

/// Catalog that filters and paginates a fixed dataset like the real API.
///
/// Every query is logged. Queries matching a [`hold`](Self::hold) predicate
/// wait for a [`release`](Self::release) before answering.
pub struct FakeCatalog {
    projects: Vec<Project>,
    calls: Mutex<Vec<ProjectQuery>>,
    failing: AtomicBool,
    extra_total: AtomicU64,
    gate: Mutex<Option<Gate>>,
    permits: Semaphore,
}

impl FakeCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            calls: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            extra_total: AtomicU64::new(0),
            gate: Mutex::new(None),
            permits: Semaphore::new(0),
        }
    }

    /// Web projects only.
    pub fn with(featured: usize, non_featured: usize) -> Self {
        Self::new(dataset(featured, non_featured, &[ProjectType::Web]))
    }

    pub fn calls(&self) -> Vec<ProjectQuery> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Answer every following query with a server error.
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Report `extra` more matches than the dataset holds.
    pub fn inflate_total(&self, extra: u64) {
        self.extra_total.store(extra, Ordering::SeqCst);
    }

    pub fn hold(&self, predicate: impl Fn(&ProjectQuery) -> bool + Send + Sync + 'static) {
        *self.gate.lock() = Some(Box::new(predicate));
    }

    pub fn release(&self, count: usize) {
        self.permits.add_permits(count);
    }

    fn answer(&self, query: &ProjectQuery) -> Page<Project> {
        let matching: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| query.is_visible.is_none_or(|v| p.is_visible == v))
            .filter(|p| query.is_featured.is_none_or(|f| p.is_featured == f))
            .filter(|p| query.project_type.is_none_or(|t| p.project_type == t))
            .collect();

        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).max(1);
        let data = matching
            .iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .map(|p| (*p).clone())
            .collect();

        Page {
            data,
            page,
            limit,
            total: matching.len() as u64 + self.extra_total.load(Ordering::SeqCst),
        }
    }
}

impl CatalogApi for FakeCatalog {
    fn fetch_page<'a>(&'a self, query: &'a ProjectQuery) -> ApiFuture<'a, Page<Project>> {
        Box::pin(async move {
            self.calls.lock().push(query.clone());

            let held = self.gate.lock().as_ref().is_some_and(|gate| gate(query));
            if held {
                self.permits.acquire().await.unwrap().forget();
            }

            if self.failing.load(Ordering::SeqCst) {
                return Err(ClientError::Server {
                    url: "fake://projects".into(),
                    status: 503,
                    message: "catalog unavailable".into(),
                });
            }
            Ok(self.answer(query))
        })
    }

    fn fetch_profile(&self) -> ApiFuture<'_, User> {
        Box::pin(async {
            Err(ClientError::InvalidConfig {
                message: "no profile in fake catalog".into(),
            })
        })
    }
}
