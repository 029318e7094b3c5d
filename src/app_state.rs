//! Implements a struct that holds the state of the REST server.

use crate::{designer::ReportStore, sales::SalesClient};

/// The report viewer bundle loaded when no other location is configured.
pub const DEFAULT_VIEWER_SCRIPT: &str = "/static/ar-js-viewer.js";

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client used to fetch sales rows for each report.
    pub sales_client: SalesClient,

    /// Recently built reports, keyed by report id, and the forms currently
    /// building one.
    pub reports: ReportStore,

    /// The URL of the report viewer script loaded by the designer page.
    pub viewer_script: String,
}

impl AppState {
    /// Create a new [AppState] with no report built yet.
    pub fn new(sales_client: SalesClient, viewer_script: &str) -> Self {
        Self {
            sales_client,
            reports: ReportStore::default(),
            viewer_script: viewer_script.to_owned(),
        }
    }
}
