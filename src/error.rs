//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError,
    report::DataType,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A data type name that is not part of the catalog reached the server.
    ///
    /// The designer only offers catalog data types, so this indicates a
    /// tampered or stale form and is never mapped to a default chart.
    #[error("unknown data type \"{0}\"")]
    UnknownDataType(String),

    /// The plot type does not belong to the selected data type.
    #[error("\"{plot_type}\" is not a valid plot type for {data_type}")]
    InvalidPlotType {
        /// The selected data type.
        data_type: DataType,
        /// The rejected plot type.
        plot_type: String,
    },

    /// A required designer field was left empty.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// The palette name is not one of the palettes offered by the designer.
    #[error("unknown palette \"{0}\"")]
    UnknownPalette(String),

    /// The sales endpoint could not be reached, timed out or responded with
    /// an error status.
    ///
    /// The string holds the underlying error for the server logs.
    #[error("could not fetch sales data: {0}")]
    FetchFailed(String),

    /// The sales endpoint responded with a body that is not the expected JSON.
    #[error("the sales data could not be parsed: {0}")]
    InvalidSalesData(String),

    /// Another report is still being built.
    #[error("a report is already being generated")]
    ReportInProgress,

    /// The requested report resource does not exist.
    #[error("the requested report could not be found")]
    ReportNotFound,

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            tracing::error!("could not decode sales response: {value}");
            Error::InvalidSalesData(value.to_string())
        } else {
            tracing::error!("sales request failed: {value}");
            Error::FetchFailed(value.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::ReportNotFound => NotFoundError.into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::UnknownDataType(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Unknown data type".to_owned(),
                    details: format!(
                        "\"{name}\" is not a data type this designer can chart. \
                        Reload the page and pick a data type from the list."
                    ),
                },
            ),
            Error::InvalidPlotType {
                data_type,
                plot_type,
            } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid plot type".to_owned(),
                    details: format!(
                        "{plot_type} charts are not available for \"{}\". \
                        Pick one of the listed plot types.",
                        data_type.label()
                    ),
                },
            ),
            Error::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing field".to_owned(),
                    details: format!("Choose a {field} before generating the report."),
                },
            ),
            Error::UnknownPalette(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Unknown palette".to_owned(),
                    details: format!("\"{name}\" is not one of the available palettes."),
                },
            ),
            Error::FetchFailed(_) | Error::InvalidSalesData(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not load sales data".to_owned(),
                    details: "The sales data service did not respond as expected. \
                        Your selection has been kept, try generating the report again."
                        .to_owned(),
                },
            ),
            Error::ReportInProgress => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Report already in progress".to_owned(),
                    details: "Wait for this form's report to finish before generating another."
                        .to_owned(),
                },
            ),
            Error::ReportNotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Report not found".to_owned(),
                    details: "Generate a report before opening it.".to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        report::DataType,
        test_utils::{assert_content_type, assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn alert_status_codes() {
        let cases = [
            (
                Error::UnknownDataType("Foo".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::InvalidPlotType {
                    data_type: DataType::SalesOverTime,
                    plot_type: "Pie".to_owned(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (Error::MissingField("plot type"), StatusCode::BAD_REQUEST),
            (
                Error::FetchFailed("connection refused".to_owned()),
                StatusCode::BAD_GATEWAY,
            ),
            (Error::ReportInProgress, StatusCode::CONFLICT),
            (
                Error::JSONSerializationError("oops".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, want_status) in cases {
            let response = error.into_alert_response();

            assert_eq!(response.status(), want_status);
            assert_content_type(&response, "text/html; charset=utf-8");
            let html = parse_html_fragment(response).await;
            assert_valid_html(&html);
        }
    }

    #[test]
    fn report_not_found_page_is_404() {
        let response = Error::ReportNotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_errors_render_generic_500_page() {
        let response = Error::JSONSerializationError("oops".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
