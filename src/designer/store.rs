//! In-memory storage for built reports.
//!
//! Every build gets its own [ReportId], so a page only ever reads the report
//! it built. Builds are serialized per designer form rather than globally.

use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    Error,
    report::{Report, Selection},
};

/// How many reports are kept before the oldest is dropped.
pub const MAX_STORED_REPORTS: usize = 32;

/// The resource name the report viewer opens.
pub const REPORT_RESOURCE: &str = "report";

/// Identifies one built report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(u64);

impl Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one designer form, from the page load until the page is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(u64);

impl Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A built report together with what it was built from.
#[derive(Debug)]
pub struct StoredReport {
    /// The id the viewer and the designer use to find this report.
    pub id: ReportId,
    /// The form that submitted the selection.
    pub form_id: FormId,
    /// The descriptor served to the report viewer.
    pub report: Report,
    /// The selection the report was built from.
    pub selection: Selection,
    /// The number of sales rows embedded in the report.
    pub row_count: usize,
    /// The sum of the sales amounts embedded in the report.
    pub total_sales: f64,
}

/// Holds recently built reports and tracks which forms are building one.
///
/// Reports are never edited in place. A rebuild stores a new report under a
/// new id.
#[derive(Debug, Clone)]
pub struct ReportStore {
    reports: Arc<RwLock<BTreeMap<ReportId, Arc<StoredReport>>>>,
    building: Arc<Mutex<HashSet<FormId>>>,
    next_id: Arc<AtomicU64>,
    capacity: usize,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::with_capacity(MAX_STORED_REPORTS)
    }
}

/// Marks a form as building until dropped.
#[derive(Debug)]
pub struct BuildGuard {
    form_id: FormId,
    building: Arc<Mutex<HashSet<FormId>>>,
}

impl Drop for BuildGuard {
    fn drop(&mut self) {
        self.building
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.form_id);
    }
}

impl ReportStore {
    /// A store that keeps at most `capacity` reports, dropping the oldest
    /// first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            reports: Arc::default(),
            building: Arc::default(),
            next_id: Arc::new(AtomicU64::new(1)),
            capacity: capacity.max(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Issue an id for a newly rendered designer form.
    pub fn new_form_id(&self) -> FormId {
        FormId(self.next_id())
    }

    /// Reserve an id for a report that is about to be stored.
    pub fn new_report_id(&self) -> ReportId {
        ReportId(self.next_id())
    }

    /// Claim the right for `form_id` to build a report.
    ///
    /// The guard must be held until the new report has been stored.
    ///
    /// # Errors
    /// Returns [Error::ReportInProgress] if the same form is already building.
    pub fn try_begin_build(&self, form_id: FormId) -> Result<BuildGuard, Error> {
        let mut building = self
            .building
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !building.insert(form_id) {
            tracing::warn!("rejected report build for form {form_id} while it is already building");
            return Err(Error::ReportInProgress);
        }

        Ok(BuildGuard {
            form_id,
            building: self.building.clone(),
        })
    }

    /// Store a built report, dropping the oldest reports beyond capacity.
    pub async fn insert(&self, report: StoredReport) -> Arc<StoredReport> {
        let report = Arc::new(report);
        let mut reports = self.reports.write().await;
        reports.insert(report.id, report.clone());

        while reports.len() > self.capacity {
            if let Some((evicted, _)) = reports.pop_first() {
                tracing::debug!("dropped report {evicted} from the report store");
            }
        }

        report
    }

    /// The report stored under `id`.
    ///
    /// # Errors
    /// Returns [Error::ReportNotFound] if no report has that id, or it has
    /// been dropped.
    pub async fn get(&self, id: ReportId) -> Result<Arc<StoredReport>, Error> {
        self.reports
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::ReportNotFound)
    }

    /// Look up a resource of report `id` by the name the report viewer asks
    /// for.
    ///
    /// # Errors
    /// Returns [Error::ReportNotFound] if `name` is not a known resource or
    /// the report does not exist.
    pub async fn resource(&self, id: ReportId, name: &str) -> Result<Arc<StoredReport>, Error> {
        if name != REPORT_RESOURCE {
            return Err(Error::ReportNotFound);
        }

        self.get(id).await
    }
}
