//! Sales rows as returned by the analytical endpoint and their normalized form.

use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, Duration, format_description::BorrowedFormatItem, macros::format_description};

/// The label for sales channel keys that are not known.
pub const UNKNOWN_CHANNEL: &str = "Unknown";

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(sales_date_format, Date, "[year]-[month]-[day]");

/// A single sales fact as returned by the remote endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRecord {
    /// Identifies the product, used to derive the product category.
    pub product_key: i64,
    /// The amount of the sale.
    pub sales_amount: f64,
    /// Identifies the sales channel.
    pub channel_key: i64,
    /// The day of the sale.
    #[serde(deserialize_with = "deserialize_date_key")]
    pub date_key: Date,
}

/// A sales row with human readable labels and a month granular date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedRecord {
    /// The amount of the sale.
    pub sales_amount: f64,
    /// The first day of the month in which the sale happened.
    #[serde(with = "sales_date_format")]
    pub sales_date: Date,
    /// The name of the sales channel.
    pub sales_channel: &'static str,
    /// The name of the product category.
    pub product_category: &'static str,
}

/// Label each record and bucket its date by month.
///
/// The output has one record per input record, in the same order.
pub fn normalize(rows: &[RawRecord]) -> Vec<NormalizedRecord> {
    rows.iter()
        .map(|row| NormalizedRecord {
            sales_amount: row.sales_amount,
            sales_date: truncate_to_month(row.date_key),
            sales_channel: sales_channel(row.channel_key),
            product_category: product_category(row.product_key),
        })
        .collect()
}

/// Map a channel key to its name.
pub fn sales_channel(channel_key: i64) -> &'static str {
    match channel_key {
        1 => "Store",
        2 => "Online",
        3 => "Catalog",
        4 => "Reseller",
        _ => UNKNOWN_CHANNEL,
    }
}

/// Map a product key to the name of its category.
///
/// Product keys are allocated to categories in ascending ranges.
pub fn product_category(product_key: i64) -> &'static str {
    if product_key < 116 {
        "Audio"
    } else if product_key < 338 {
        "TV and Video"
    } else if product_key < 944 {
        "Computers"
    } else if product_key < 1316 {
        "Cameras"
    } else {
        "Cell phones"
    }
}

/// The first day of the month that `date` falls in.
pub fn truncate_to_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}

/// Accepts both plain dates and date-times, keeping only the date part.
fn deserialize_date_key<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let date_part = text.split('T').next().unwrap_or_default();

    Date::parse(date_part, DATE_FORMAT).map_err(serde::de::Error::custom)
}
