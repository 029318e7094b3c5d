//! The report descriptor consumed by the report viewer.
//!
//! The types mirror the JSON report definition format understood by the
//! viewer: PascalCase keys, lengths as strings with a unit suffix and field
//! references as `=Fields!Name.Value` expressions. Plots are a tagged union
//! over the three chart families so that options of one family cannot be set
//! on another.

#![allow(missing_docs)]

use std::fmt;

use serde::{Serialize, Serializer};

use crate::report::catalog::{CategoryPlotType, TimePlotType};

/// A length in inches, serialized as e.g. `"7.5in"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inches(pub f64);

impl Serialize for Inches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{}in", self.0))
    }
}

/// A length in points, serialized as e.g. `"2pt"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Points(pub f64);

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{}pt", self.0))
    }
}

/// A reference to the value of a data set field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValue(pub &'static str);

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "=Fields!{}.Value", self.0)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The root of a report definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    pub data_sources: Vec<DataSource>,
    pub data_sets: Vec<DataSet>,
    pub page: Page,
    pub body: Body,
    pub width: Inches,
}

impl Report {
    /// The single chart in the report body.
    pub fn chart(&self) -> Option<&Chart> {
        self.body.report_items.first()
    }
}

/// Where the report reads its rows from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSource {
    pub name: &'static str,
    pub connection_properties: ConnectionProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConnectionProperties {
    pub data_provider: &'static str,
    /// For embedded JSON this is `jsondata=` followed by the rows.
    pub connect_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSet {
    pub name: &'static str,
    pub query: Query,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Query {
    pub command_text: &'static str,
    pub data_source_name: &'static str,
}

/// Maps a data set field name to a key of the source rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Field {
    pub name: &'static str,
    pub data_field: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page {
    pub top_margin: Inches,
    pub bottom_margin: Inches,
    pub left_margin: Inches,
    pub right_margin: Inches,
    pub page_width: Inches,
    pub page_height: Inches,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    pub report_items: Vec<Chart>,
    pub height: Inches,
}

/// The chart report item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Chart {
    #[serde(rename = "Type")]
    pub type_: &'static str,
    pub name: &'static str,
    pub top: Inches,
    pub left: Inches,
    pub width: Inches,
    pub height: Inches,
    pub data_set_name: &'static str,
    pub palette: String,
    pub plot_area: PlotArea,
    pub plots: Vec<Plot>,
    pub header: Header,
    pub bar: BarOptions,
}

/// Chart wide bar settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BarOptions {
    /// Relative bar thickness in the range (0, 1].
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub title: &'static str,
    pub text_style: TextStyle,
    pub h_align: HorizontalAlignment,
    pub v_align: VerticalAlignment,
    pub style: Padding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Points>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Padding {
    pub padding_top: Points,
    pub padding_bottom: Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HorizontalAlignment {
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerticalAlignment {
    Middle,
}

/// The axes and legends framing the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlotArea {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legends: Vec<Legend>,
    pub axes: Vec<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Legend {
    pub legend_type: LegendType,
    pub orientation: Orientation,
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendType {
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendPosition {
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Axis {
    pub axis_type: AxisType,
    pub plots: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AxisPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<AxisScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_style: Option<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_grid_style: Option<BorderStyle>,
}

impl Axis {
    /// An axis of `axis_type` bound to `plot` with every option unset.
    pub fn new(axis_type: AxisType, plot: &'static str) -> Self {
        Self {
            axis_type,
            plots: vec![plot],
            position: None,
            format: None,
            scale: None,
            label_angle: None,
            label_style: None,
            line_style: None,
            major_grid: None,
            major_grid_style: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisType {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisPosition {
    /// The axis is laid out but not drawn.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisScale {
    Percentage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BorderStyle {
    pub border: Border,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Border {
    pub color: &'static str,
    pub width: Points,
    pub style: LineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Solid,
    Dotted,
}

/// A plot of one of the three chart families.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Plot {
    TimeSeries(TimeSeriesPlot),
    Radial(RadialPlot),
    Category(CategoryPlot),
}

/// A line or area plot over monthly sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSeriesPlot {
    pub plot_name: &'static str,
    pub plot_chart_type: TimePlotType,
    pub encodings: TimeSeriesEncodings,
    pub config: LineConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSeriesEncodings {
    pub category: CategoryEncoding,
    pub values: Vec<ValueEncoding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineConfig {
    pub line_aspect: LineAspect,
    pub line_style: LineStyle,
    pub show_nulls: ShowNulls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineAspect {
    Spline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineStyle {
    pub style: LineKind,
    pub width: Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShowNulls {
    /// Gaps are bridged by connecting the neighbouring points.
    Connected,
}

/// A pie or donut plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RadialPlot {
    pub plot_name: &'static str,
    pub plot_chart_type: &'static str,
    pub config: RadialConfig,
    pub encodings: RadialEncodings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RadialConfig {
    /// Zero for a solid disk, otherwise the relative size of the hole.
    pub inner_radius: f64,
    pub radial: bool,
    pub axis_mode: &'static str,
    pub text: TextConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextConfig {
    pub template: &'static str,
    pub text_position: TextPosition,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextPosition {
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RadialEncodings {
    pub values: Vec<ValueEncoding>,
    pub details: Vec<DetailEncoding>,
    pub color: ColorEncoding,
}

/// A bar or column plot over product categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryPlot {
    pub plot_name: &'static str,
    pub plot_chart_type: CategoryPlotType,
    pub config: CategoryConfig,
    pub encodings: CategoryEncodings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryConfig {
    /// Draws the categories along the vertical axis.
    pub swap_axes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryEncodings {
    pub category: CategoryEncoding,
    pub values: Vec<ValueEncoding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<DetailEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorEncoding>,
}

/// The fields bound to an encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldBinding {
    pub value: Vec<FieldValue>,
}

impl FieldBinding {
    /// Bind a single field.
    pub fn field(name: &'static str) -> Self {
        Self {
            value: vec![FieldValue(name)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryEncoding {
    pub field: FieldBinding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorting_field: Option<FieldValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Ascending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValueEncoding {
    pub field: FieldBinding,
    pub aggregate: Aggregate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Aggregate {
    Sum,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailEncoding {
    pub field: FieldBinding,
    pub group: GroupMode,
}

/// How the series split by a detail encoding are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupMode {
    /// Slices stacked around the circle.
    Stack,
    /// Bars placed side by side.
    Cluster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColorEncoding {
    pub field: FieldBinding,
}
