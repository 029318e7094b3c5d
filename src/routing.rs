//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    designer::{
        create_report_endpoint, get_designer_page, get_designer_view, get_report_resource,
        get_selection_fields,
    },
    endpoints,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_designer_page))
        .route(endpoints::SELECTION_FIELDS, get(get_selection_fields))
        .route(endpoints::REPORTS, post(create_report_endpoint))
        .route(endpoints::REPORT_DESIGNER, get(get_designer_view))
        .route(endpoints::REPORT_RESOURCES, get(get_report_resource))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{AppState, build_router, endpoints, sales::SalesClient};

    fn test_server() -> TestServer {
        let client = SalesClient::new("http://127.0.0.1:9/FactSales", Duration::from_secs(1))
            .expect("Could not create sales client");
        let state = AppState::new(client, "/static/ar-js-viewer.js");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_serves_designer_page() {
        let response = test_server().get(endpoints::ROOT).await;

        response.assert_status_ok();
        assert!(response.text().contains("Sales Chart Designer"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        test_server()
            .get("/reports/old")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn resource_of_unknown_report_is_not_found() {
        test_server()
            .get("/api/reports/1/resources/report")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unkeyed_resource_route_is_gone() {
        test_server()
            .get("/api/resources/report")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
