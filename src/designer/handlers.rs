//! Route handlers for the designer page, the report build and the report
//! resources read by the viewer.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    designer::{
        form::{SelectionForm, SelectionFormData},
        store::{FormId, ReportId, ReportStore, StoredReport},
        view::{dependent_fields_view, design_view, designer_page, preview_view},
    },
    endpoints,
    report::{DataType, build},
    sales::{SalesClient, normalize},
};

/// The state needed to render the designer page.
#[derive(Debug, Clone)]
pub struct DesignerPageState {
    pub viewer_script: String,
    pub reports: ReportStore,
}

impl FromRef<AppState> for DesignerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            viewer_script: state.viewer_script.clone(),
            reports: state.reports.clone(),
        }
    }
}

/// The state needed to build a report.
#[derive(Debug, Clone)]
pub struct CreateReportState {
    pub sales_client: SalesClient,
    pub reports: ReportStore,
}

impl FromRef<AppState> for CreateReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sales_client: state.sales_client.clone(),
            reports: state.reports.clone(),
        }
    }
}

impl FromRef<AppState> for ReportStore {
    fn from_ref(state: &AppState) -> Self {
        state.reports.clone()
    }
}

/// The query for the fields that depend on the data type.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FieldsQuery {
    #[serde(default)]
    pub data_type: String,
}

/// Render the designer page with an empty form.
///
/// Every page load gets a new form id. Reports built by other pages are
/// never shown here.
pub async fn get_designer_page(State(state): State<DesignerPageState>) -> Response {
    let form_id = state.reports.new_form_id();

    designer_page(&state.viewer_script, form_id, &SelectionForm::new()).into_response()
}

/// Render the design view for the "Designer" button of the preview of
/// report `report_id`, restoring the selection the report was built from.
///
/// A report that is no longer stored gives an empty form. Requests that do
/// not come from htmx are sent to the full designer page.
pub async fn get_designer_view(
    HxRequest(is_htmx_request): HxRequest,
    State(reports): State<ReportStore>,
    Path(report_id): Path<ReportId>,
) -> Response {
    if !is_htmx_request {
        return Redirect::to(endpoints::ROOT).into_response();
    }

    match reports.get(report_id).await {
        Ok(stored) => {
            design_view(stored.form_id, &SelectionForm::from_selection(&stored.selection))
                .into_response()
        }
        Err(error) => {
            tracing::debug!("could not restore designer from report {report_id}: {error}");
            design_view(reports.new_form_id(), &SelectionForm::new()).into_response()
        }
    }
}

/// Render the plot type and grouping inputs for the chosen data type.
pub async fn get_selection_fields(Query(query): Query<FieldsQuery>) -> Response {
    if query.data_type.is_empty() {
        return dependent_fields_view(&SelectionForm::new()).into_response();
    }

    match query.data_type.parse::<DataType>() {
        Ok(data_type) => {
            let form = SelectionForm::new().on_data_type_changed(data_type);
            dependent_fields_view(&form).into_response()
        }
        Err(error) => {
            tracing::error!("could not render selection fields: {error}");
            error.into_alert_response()
        }
    }
}

/// Build a report from the designer form and render the preview.
///
/// A form builds one report at a time. A submit that arrives while the same
/// form is still building is rejected, submits from other forms are not.
pub async fn create_report_endpoint(
    State(state): State<CreateReportState>,
    Form(form_data): Form<SelectionFormData>,
) -> Response {
    let form_id = form_data
        .form_id
        .unwrap_or_else(|| state.reports.new_form_id());

    let _build_guard = match state.reports.try_begin_build(form_id) {
        Ok(guard) => guard,
        Err(error) => return error.into_alert_response(),
    };

    match build_report(&state, form_id, &form_data).await {
        Ok(stored) => preview_view(&stored).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

async fn build_report(
    state: &CreateReportState,
    form_id: FormId,
    form_data: &SelectionFormData,
) -> Result<Arc<StoredReport>, Error> {
    let form = SelectionForm::from_form_data(form_data)?;
    let (_, selection) = form.submit()?;

    let raw_rows = state.sales_client.fetch_sales().await?;
    let rows = normalize(&raw_rows);
    let report = build(&selection, &rows)?;
    let total_sales = rows.iter().map(|row| row.sales_amount).sum();

    let id = state.reports.new_report_id();

    tracing::info!(
        "built {} {} report {id} from {} rows",
        selection.data_type(),
        selection.plot_type(),
        rows.len()
    );

    let stored = state
        .reports
        .insert(StoredReport {
            id,
            form_id,
            report,
            selection,
            row_count: rows.len(),
            total_sales,
        })
        .await;

    Ok(stored)
}

/// Serve a resource of report `report_id` to the report viewer.
pub async fn get_report_resource(
    State(reports): State<ReportStore>,
    Path((report_id, name)): Path<(ReportId, String)>,
) -> Response {
    match reports.resource(report_id, &name).await {
        Ok(stored) => Json(&stored.report).into_response(),
        Err(error) => {
            tracing::debug!("resource \"{name}\" of report {report_id} not available: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod designer_page_tests {
    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;

    use crate::{
        designer::{
            handlers::{DesignerPageState, get_designer_page},
            store::ReportStore,
        },
        endpoints,
        test_utils::{
            assert_content_type, assert_form_submit_button, assert_hx_endpoint,
            assert_valid_html, must_get_form, must_select_one, parse_html_document,
        },
    };

    #[tokio::test]
    async fn render_page() {
        let state = DesignerPageState {
            viewer_script: "/static/ar-js-viewer.js".to_owned(),
            reports: ReportStore::default(),
        };

        let response = get_designer_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/html; charset=utf-8");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::REPORTS, "hx-post");
        assert_form_submit_button(&form);

        let plot_type = must_select_one(&html, "select[name='plot_type']");
        assert!(plot_type.value().attr("disabled").is_some());
        let grouping = must_select_one(&html, "input[name='grouping']");
        assert!(grouping.value().attr("disabled").is_some());
        assert!(grouping.value().attr("checked").is_none());

        let palette = must_select_one(&html, "select[name='palette'] option[selected]");
        assert_eq!(palette.value().attr("value"), Some("Office"));

        let content = html
            .select(&Selector::parse("#content section").unwrap())
            .next()
            .expect("No content section found");
        assert_eq!(content.value().attr("data-view-mode"), Some("design"));
    }
}
