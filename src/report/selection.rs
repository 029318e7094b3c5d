//! The frozen user selection that a report is built from.

use crate::{
    Error,
    report::catalog::{ChartSelection, DataType},
};

/// A validated snapshot of the four designer inputs.
///
/// Built once per submit. Later edits to the form do not affect a
/// [Selection] that has already been handed to the report builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The data type paired with one of its plot subtypes.
    pub chart: ChartSelection,
    /// The palette name, passed to the report viewer as is.
    pub palette: String,
}

impl Selection {
    /// Create a selection from raw input values.
    ///
    /// # Errors
    /// Returns [Error::InvalidPlotType] if `plot_type` does not belong to
    /// `data_type`.
    pub fn new(
        data_type: DataType,
        plot_type: &str,
        palette: &str,
        grouping: bool,
    ) -> Result<Self, Error> {
        Ok(Self {
            chart: ChartSelection::new(data_type, plot_type, grouping)?,
            palette: palette.to_owned(),
        })
    }

    /// The selected data type.
    pub fn data_type(&self) -> DataType {
        self.chart.data_type()
    }

    /// The name of the selected plot subtype.
    pub fn plot_type(&self) -> &'static str {
        self.chart.plot_type()
    }

    /// Whether the chart is split by sales channel.
    pub fn grouping(&self) -> bool {
        self.chart.grouping()
    }
}
