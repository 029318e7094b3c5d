//! Sales module
//!
//! Fetches sales facts from the analytical endpoint and reshapes them into
//! rows the report viewer can group by month, channel and category.

mod client;
mod record;

pub use client::{DEFAULT_SALES_ENDPOINT, SalesClient};
pub use record::{
    NormalizedRecord, RawRecord, UNKNOWN_CHANNEL, normalize, product_category, sales_channel,
    truncate_to_month,
};
