//! Report module
//!
//! Turns a chart selection and normalized sales rows into the report
//! descriptor rendered by the report viewer.

mod builder;
mod catalog;
mod descriptor;
mod selection;

pub use builder::{DATA_SET_FIELDS, DATA_SET_NAME, build};
pub use catalog::{
    CategoryPlotType, ChartSelection, DataType, Palette, RadialPlotType, TimePlotType,
    plot_subtypes_for, title_for,
};
pub use descriptor::*;
pub use selection::Selection;
