//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/reports/{report_id}/designer', use
//! [format_endpoint].

/// The designer page.
pub const ROOT: &str = "/";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route that renders the form fields that depend on the chosen data type.
pub const SELECTION_FIELDS: &str = "/api/selection/fields";
/// The route to build a report from the designer form.
pub const REPORTS: &str = "/api/reports";
/// The route that renders the designer form restored from a built report.
pub const REPORT_DESIGNER: &str = "/api/reports/{report_id}/designer";
/// The route the report viewer loads the named resources of a report from.
pub const REPORT_RESOURCES: &str = "/api/reports/{report_id}/resources/{name}";

/// Replace the first parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/resources/{name}', '{name}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters.
/// Paths with several parameters are filled in by calling it once per
/// parameter, from left to right.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
