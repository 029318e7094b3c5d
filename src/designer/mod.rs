//! Designer module
//!
//! The selection form, its HTML views and the handlers that turn a submitted
//! form into the report served to the report viewer.

mod form;
mod handlers;
mod store;
mod view;

pub use handlers::{
    create_report_endpoint, get_designer_page, get_designer_view, get_report_resource,
    get_selection_fields,
};
pub use store::ReportStore;
