//! HTTP client for the analytical sales endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::{Error, sales::RawRecord};

/// The public demo endpoint serving the sales fact table.
pub const DEFAULT_SALES_ENDPOINT: &str =
    "https://demodata.grapecity.com/contoso/odata/v1/FactSales";

/// Only products from the computers category upwards are requested.
const PRODUCT_FILTER: &str = "ProductKey gt 337";
const SELECTED_FIELDS: &str = "ProductKey,SalesAmount,ChannelKey,DateKey";

/// The envelope the endpoint wraps its rows in.
#[derive(Debug, Deserialize)]
struct SalesResponse {
    value: Vec<RawRecord>,
}

/// Fetches raw sales records from a fixed endpoint.
#[derive(Debug, Clone)]
pub struct SalesClient {
    client: Client,
    endpoint: String,
}

impl SalesClient {
    /// Create a client for `endpoint` whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns [Error::FetchFailed] if the underlying HTTP client cannot be
    /// initialized.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .inspect_err(|error| tracing::error!("could not create HTTP client: {error}"))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
        })
    }

    /// The URL rows are fetched from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch all sales records matching the product filter.
    ///
    /// # Errors
    /// Returns [Error::FetchFailed] if the request fails, times out or the
    /// endpoint responds with an error status, and
    /// [Error::InvalidSalesData] if the body is not the expected JSON.
    pub async fn fetch_sales(&self) -> Result<Vec<RawRecord>, Error> {
        tracing::debug!("fetching sales from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("$filter", PRODUCT_FILTER), ("$select", SELECTED_FIELDS)])
            .send()
            .await?
            .error_for_status()?;

        let body: SalesResponse = response.json().await?;

        tracing::info!("fetched {} sales records", body.value.len());

        Ok(body.value)
    }
}
