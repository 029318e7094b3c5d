//! Builds the report descriptor for a selection and a set of normalized rows.
//!
//! Each chart family gets its own plot and plot area builder:
//! - **Time series**: monthly totals as a spline line or area, sorted by date
//! - **Radial**: share of sales per channel as a pie or donut
//! - **Category**: totals per product category as bars or columns, optionally
//!   clustered by channel
//!
//! Page and chart geometry are fixed.

use crate::{
    Error,
    report::{
        catalog::{CategoryPlotType, ChartSelection, DataType, RadialPlotType, TimePlotType, title_for},
        descriptor::{
            Aggregate, Axis, AxisPosition, AxisScale, AxisType, BarOptions, Body, Border,
            BorderStyle, CategoryConfig, CategoryEncoding, CategoryEncodings, CategoryPlot, Chart,
            ColorEncoding, ConnectionProperties, DataSet, DataSource, DetailEncoding, Field,
            FieldBinding, FieldValue, GroupMode, Header, HorizontalAlignment, Inches, Legend,
            LegendPosition, LegendType, LineAspect, LineConfig, LineKind, LineStyle, Orientation,
            Padding, Page, Plot, PlotArea, Points, Query, RadialConfig, RadialEncodings,
            RadialPlot, Report, ShowNulls, SortDirection, TextConfig, TextPosition, TextStyle,
            TimeSeriesEncodings, TimeSeriesPlot, ValueEncoding, VerticalAlignment,
        },
        selection::Selection,
    },
    sales::NormalizedRecord,
};

/// The name shared by the data source and the data set query.
pub const DATA_SOURCE_NAME: &str = "DataSource";
/// The data set the chart reads from.
pub const DATA_SET_NAME: &str = "SalesDataSet";
/// The name axes use to refer to the chart's only plot.
pub const PLOT_NAME: &str = "Plot";
/// The fields of the data set, in the same order as the normalized rows.
pub const DATA_SET_FIELDS: [&str; 4] = ["SalesAmount", "SalesDate", "SalesChannel", "ProductCategory"];

const SALES_AMOUNT: &str = "SalesAmount";
const SALES_DATE: &str = "SalesDate";
const SALES_CHANNEL: &str = "SalesChannel";
const PRODUCT_CATEGORY: &str = "ProductCategory";

const DONUT_INNER_RADIUS: f64 = 0.2;
const CATEGORY_BAR_WIDTH: f64 = 0.5;
const DEFAULT_BAR_WIDTH: f64 = 1.0;

const LABEL_COLOR: &str = "#1a1a1a";
const AXIS_LINE_COLOR: &str = "#ccc";
const TITLE_COLOR: &str = "#3da7a8";

/// Build the report descriptor for `selection` with `rows` embedded as its
/// data source.
///
/// The result only depends on the arguments: building the same selection
/// from the same rows twice gives identical reports.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if the rows cannot be serialized.
pub fn build(selection: &Selection, rows: &[NormalizedRecord]) -> Result<Report, Error> {
    let data_type = selection.data_type();

    let chart = Chart {
        type_: "dvchart",
        name: "salesChart",
        top: Inches(0.0),
        left: Inches(0.0),
        width: Inches(7.5),
        height: Inches(6.0),
        data_set_name: DATA_SET_NAME,
        palette: selection.palette.clone(),
        plot_area: build_plot_area(&selection.chart),
        plots: vec![build_plot(&selection.chart)],
        header: header(title_for(data_type)),
        bar: BarOptions {
            width: if data_type == DataType::SalesPerCategory {
                CATEGORY_BAR_WIDTH
            } else {
                DEFAULT_BAR_WIDTH
            },
        },
    };

    Ok(Report {
        data_sources: vec![data_source(rows)?],
        data_sets: vec![data_set()],
        page: Page {
            top_margin: Inches(0.5),
            bottom_margin: Inches(0.5),
            left_margin: Inches(0.5),
            right_margin: Inches(0.5),
            page_width: Inches(8.5),
            page_height: Inches(11.0),
        },
        body: Body {
            report_items: vec![chart],
            height: Inches(6.0),
        },
        width: Inches(7.5),
    })
}

fn build_plot(chart: &ChartSelection) -> Plot {
    match *chart {
        ChartSelection::Time(plot_type) => Plot::TimeSeries(time_series_plot(plot_type)),
        ChartSelection::Channel(plot_type) => Plot::Radial(radial_plot(plot_type)),
        ChartSelection::Category { plot, grouping } => {
            Plot::Category(category_plot(plot, grouping))
        }
    }
}

fn build_plot_area(chart: &ChartSelection) -> PlotArea {
    match *chart {
        ChartSelection::Time(_) => time_series_plot_area(),
        ChartSelection::Channel(_) => radial_plot_area(),
        ChartSelection::Category { grouping, .. } => category_plot_area(grouping),
    }
}

/// Embeds the rows as JSON so the viewer does not fetch them itself.
fn data_source(rows: &[NormalizedRecord]) -> Result<DataSource, Error> {
    let json = serde_json::to_string(rows).map_err(|error| {
        tracing::error!("could not serialize sales rows: {error}");
        Error::JSONSerializationError(error.to_string())
    })?;

    Ok(DataSource {
        name: DATA_SOURCE_NAME,
        connection_properties: ConnectionProperties {
            data_provider: "JSONEMBED",
            connect_string: format!("jsondata={json}"),
        },
    })
}

fn data_set() -> DataSet {
    DataSet {
        name: DATA_SET_NAME,
        query: Query {
            command_text: "$.*",
            data_source_name: DATA_SOURCE_NAME,
        },
        fields: DATA_SET_FIELDS
            .into_iter()
            .map(|name| Field {
                name,
                data_field: name,
            })
            .collect(),
    }
}

fn header(title: &'static str) -> Header {
    Header {
        title,
        text_style: TextStyle {
            color: Some(TITLE_COLOR),
            font_size: Some(Points(24.0)),
        },
        h_align: HorizontalAlignment::Center,
        v_align: VerticalAlignment::Middle,
        style: Padding {
            padding_top: Points(12.0),
            padding_bottom: Points(6.0),
        },
    }
}

fn sum_of_sales() -> Vec<ValueEncoding> {
    vec![ValueEncoding {
        field: FieldBinding::field(SALES_AMOUNT),
        aggregate: Aggregate::Sum,
    }]
}

fn color_legend() -> Legend {
    Legend {
        legend_type: LegendType::Color,
        orientation: Orientation::Vertical,
        position: LegendPosition::Right,
    }
}

fn time_series_plot(plot_type: TimePlotType) -> TimeSeriesPlot {
    TimeSeriesPlot {
        plot_name: PLOT_NAME,
        plot_chart_type: plot_type,
        encodings: TimeSeriesEncodings {
            // Sorted explicitly since the viewer groups rows in input order.
            category: CategoryEncoding {
                field: FieldBinding::field(SALES_DATE),
                sort: Some(SortDirection::Ascending),
                sorting_field: Some(FieldValue(SALES_DATE)),
            },
            values: sum_of_sales(),
        },
        config: LineConfig {
            line_aspect: LineAspect::Spline,
            line_style: LineStyle {
                style: LineKind::Solid,
                width: Points(2.0),
            },
            show_nulls: ShowNulls::Connected,
        },
    }
}

fn time_series_plot_area() -> PlotArea {
    let mut x_axis = category_x_axis();
    x_axis.label_angle = Some(-45.0);
    x_axis.format = Some("MM-YYYY");

    PlotArea {
        legends: Vec::new(),
        axes: vec![x_axis, currency_y_axis()],
    }
}

fn radial_plot(plot_type: RadialPlotType) -> RadialPlot {
    let inner_radius = match plot_type {
        RadialPlotType::Pie => 0.0,
        RadialPlotType::Donut => DONUT_INNER_RADIUS,
    };

    RadialPlot {
        plot_name: PLOT_NAME,
        plot_chart_type: "Pie",
        config: RadialConfig {
            inner_radius,
            radial: true,
            axis_mode: "Radial",
            text: TextConfig {
                template: "{PercentageCategory:p0}",
                text_position: TextPosition::Center,
                style: TextStyle {
                    color: None,
                    font_size: Some(Points(14.0)),
                },
            },
        },
        encodings: RadialEncodings {
            values: sum_of_sales(),
            details: vec![DetailEncoding {
                field: FieldBinding::field(SALES_CHANNEL),
                group: GroupMode::Stack,
            }],
            color: ColorEncoding {
                field: FieldBinding::field(SALES_CHANNEL),
            },
        },
    }
}

fn radial_plot_area() -> PlotArea {
    let mut x_axis = Axis::new(AxisType::X, PLOT_NAME);
    x_axis.position = Some(AxisPosition::None);

    let mut y_axis = Axis::new(AxisType::Y, PLOT_NAME);
    y_axis.position = Some(AxisPosition::None);
    y_axis.format = Some("p0");
    y_axis.scale = Some(AxisScale::Percentage);

    PlotArea {
        legends: vec![color_legend()],
        axes: vec![x_axis, y_axis],
    }
}

fn category_plot(plot_type: CategoryPlotType, grouping: bool) -> CategoryPlot {
    let (details, color) = if grouping {
        (
            vec![DetailEncoding {
                field: FieldBinding::field(SALES_CHANNEL),
                group: GroupMode::Cluster,
            }],
            Some(ColorEncoding {
                field: FieldBinding::field(SALES_CHANNEL),
            }),
        )
    } else {
        (Vec::new(), None)
    };

    CategoryPlot {
        plot_name: PLOT_NAME,
        plot_chart_type: plot_type,
        config: CategoryConfig {
            swap_axes: plot_type == CategoryPlotType::Bar,
        },
        encodings: CategoryEncodings {
            category: CategoryEncoding {
                field: FieldBinding::field(PRODUCT_CATEGORY),
                sort: None,
                sorting_field: None,
            },
            values: sum_of_sales(),
            details,
            color,
        },
    }
}

fn category_plot_area(grouping: bool) -> PlotArea {
    let legends = if grouping {
        vec![color_legend()]
    } else {
        Vec::new()
    };

    PlotArea {
        legends,
        axes: vec![category_x_axis(), currency_y_axis()],
    }
}

fn category_x_axis() -> Axis {
    let mut axis = Axis::new(AxisType::X, PLOT_NAME);
    axis.label_style = Some(label_style());
    axis.line_style = Some(BorderStyle {
        border: Border {
            color: AXIS_LINE_COLOR,
            width: Points(2.0),
            style: LineKind::Solid,
        },
    });

    axis
}

/// Whole dollar labels with dotted horizontal gridlines.
fn currency_y_axis() -> Axis {
    let mut axis = Axis::new(AxisType::Y, PLOT_NAME);
    axis.format = Some("c0");
    axis.label_style = Some(label_style());
    axis.major_grid = Some(true);
    axis.major_grid_style = Some(BorderStyle {
        border: Border {
            color: AXIS_LINE_COLOR,
            width: Points(0.25),
            style: LineKind::Dotted,
        },
    });

    axis
}

fn label_style() -> TextStyle {
    TextStyle {
        color: Some(LABEL_COLOR),
        font_size: None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        report::{
            builder::{DATA_SET_FIELDS, build},
            catalog::{DataType, plot_subtypes_for},
            descriptor::{
                Aggregate, AxisType, Chart, FieldValue, GroupMode, Plot, Report, SortDirection,
            },
            selection::Selection,
        },
        sales::NormalizedRecord,
    };

    fn sample_rows() -> Vec<NormalizedRecord> {
        vec![
            NormalizedRecord {
                sales_amount: 50.0,
                sales_date: date!(2023 - 03 - 01),
                sales_channel: "Store",
                product_category: "Audio",
            },
            NormalizedRecord {
                sales_amount: 12.25,
                sales_date: date!(2023 - 01 - 01),
                sales_channel: "Online",
                product_category: "Cameras",
            },
        ]
    }

    fn must_build(data_type: DataType, plot_type: &str, grouping: bool) -> Report {
        let selection = Selection::new(data_type, plot_type, "Office", grouping)
            .expect("could not create selection");

        build(&selection, &sample_rows()).expect("could not build report")
    }

    fn must_get_chart(report: &Report) -> &Chart {
        report.chart().expect("report has no chart")
    }

    #[test]
    fn builds_every_catalog_subtype() {
        for data_type in DataType::ALL {
            for plot_type in plot_subtypes_for(data_type) {
                for grouping in [false, true] {
                    let report = must_build(data_type, plot_type, grouping);

                    assert_eq!(must_get_chart(&report).plots.len(), 1);
                }
            }
        }
    }

    #[test]
    fn build_is_deterministic() {
        for data_type in DataType::ALL {
            for plot_type in plot_subtypes_for(data_type) {
                let first = serde_json::to_string(&must_build(data_type, plot_type, true)).unwrap();
                let second =
                    serde_json::to_string(&must_build(data_type, plot_type, true)).unwrap();

                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn time_series_sorts_by_date_and_sums_sales() {
        let report = must_build(DataType::SalesOverTime, "Line", false);
        let chart = must_get_chart(&report);

        let Plot::TimeSeries(plot) = &chart.plots[0] else {
            panic!("want time series plot, got {:?}", chart.plots[0]);
        };
        assert_eq!(plot.encodings.category.sort, Some(SortDirection::Ascending));
        assert_eq!(
            plot.encodings.category.sorting_field,
            Some(FieldValue("SalesDate"))
        );
        assert_eq!(plot.encodings.values[0].aggregate, Aggregate::Sum);
        assert_eq!(
            plot.encodings.values[0].field.value,
            vec![FieldValue("SalesAmount")]
        );
        assert!(chart.plot_area.legends.is_empty());
        assert_eq!(chart.header.title, "Sales over time");
        assert_eq!(chart.bar.width, 1.0);
    }

    #[test]
    fn time_series_axes_format_month_and_currency() {
        let report = must_build(DataType::SalesOverTime, "Area", false);
        let axes = &must_get_chart(&report).plot_area.axes;

        assert_eq!(axes.len(), 2);
        assert_eq!(axes[0].axis_type, AxisType::X);
        assert_eq!(axes[0].format, Some("MM-YYYY"));
        assert_eq!(axes[0].major_grid, None);
        assert_eq!(axes[1].axis_type, AxisType::Y);
        assert_eq!(axes[1].format, Some("c0"));
        assert_eq!(axes[1].major_grid, Some(true));
    }

    #[test]
    fn time_series_json_shape() {
        let report = must_build(DataType::SalesOverTime, "Line", false);
        let json = serde_json::to_value(&report).unwrap();
        let plot = &json["Body"]["ReportItems"][0]["Plots"][0];

        assert_eq!(plot["PlotChartType"], json!("Line"));
        assert!(plot.get("PlotType").is_none());
        assert_eq!(plot["Config"]["LineAspect"], json!("Spline"));
        assert_eq!(plot["Config"]["LineStyle"]["Width"], json!("2pt"));
        assert_eq!(plot["Config"]["ShowNulls"], json!("Connected"));
        assert_eq!(plot["Encodings"]["Category"]["Sort"], json!("Ascending"));
        assert_eq!(
            json["Body"]["ReportItems"][0]["PlotArea"].get("Legends"),
            None
        );
    }

    #[test]
    fn donut_has_hole_and_pie_does_not() {
        for (plot_type, want_radius) in [("Pie", 0.0), ("Donut", 0.2)] {
            let report = must_build(DataType::SalesPerChannel, plot_type, false);
            let chart = must_get_chart(&report);

            let Plot::Radial(plot) = &chart.plots[0] else {
                panic!("want radial plot, got {:?}", chart.plots[0]);
            };
            assert_eq!(plot.config.inner_radius, want_radius);
            assert_eq!(plot.plot_chart_type, "Pie");
            assert_eq!(plot.encodings.details[0].group, GroupMode::Stack);
            assert_eq!(
                plot.encodings.color.field.value,
                vec![FieldValue("SalesChannel")]
            );
        }
    }

    #[test]
    fn radial_plot_area_hides_axes_and_shows_legend() {
        let report = must_build(DataType::SalesPerChannel, "Donut", false);
        let json = serde_json::to_value(&report).unwrap();
        let plot_area = &json["Body"]["ReportItems"][0]["PlotArea"];

        assert_eq!(
            plot_area["Legends"],
            json!([{"LegendType": "Color", "Orientation": "Vertical", "Position": "Right"}])
        );
        assert_eq!(plot_area["Axes"][0]["Position"], json!("None"));
        assert_eq!(plot_area["Axes"][1]["Scale"], json!("Percentage"));
        assert_eq!(plot_area["Axes"][1]["Format"], json!("p0"));
    }

    #[test]
    fn grouped_bar_chart_clusters_by_channel() {
        let selection = Selection::new(DataType::SalesPerCategory, "Bar", "Dark", true).unwrap();
        let report = build(&selection, &sample_rows()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        let chart = &json["Body"]["ReportItems"][0];
        let plot = &chart["Plots"][0];

        assert_eq!(plot["PlotChartType"], json!("Bar"));
        assert_eq!(plot["Config"]["SwapAxes"], json!(true));
        assert_eq!(
            plot["Encodings"]["Details"],
            json!([{"Field": {"Value": ["=Fields!SalesChannel.Value"]}, "Group": "Cluster"}])
        );
        assert_eq!(
            plot["Encodings"]["Color"],
            json!({"Field": {"Value": ["=Fields!SalesChannel.Value"]}})
        );
        assert_eq!(chart["PlotArea"]["Legends"].as_array().map(Vec::len), Some(1));
        assert_eq!(chart["Palette"], json!("Dark"));
        assert_eq!(chart["Bar"]["Width"], json!(0.5));
    }

    #[test]
    fn ungrouped_column_chart_has_no_split_or_legend() {
        let report = must_build(DataType::SalesPerCategory, "Column", false);
        let json = serde_json::to_value(&report).unwrap();
        let chart = &json["Body"]["ReportItems"][0];
        let plot = &chart["Plots"][0];

        assert_eq!(plot["Config"]["SwapAxes"], json!(false));
        assert_eq!(plot["Encodings"].get("Details"), None);
        assert_eq!(plot["Encodings"].get("Color"), None);
        assert_eq!(
            plot["Encodings"]["Category"],
            json!({"Field": {"Value": ["=Fields!ProductCategory.Value"]}})
        );
        assert_eq!(chart["PlotArea"].get("Legends"), None);
    }

    #[test]
    fn palette_is_passed_through_verbatim() {
        let selection =
            Selection::new(DataType::SalesPerChannel, "Pie", "not-a-palette", false).unwrap();

        let report = build(&selection, &[]).unwrap();

        assert_eq!(must_get_chart(&report).palette, "not-a-palette");
    }

    #[test]
    fn embeds_rows_and_names_four_fields() {
        let report = must_build(DataType::SalesOverTime, "Line", false);

        let data_source = &report.data_sources[0];
        assert_eq!(data_source.connection_properties.data_provider, "JSONEMBED");
        let embedded = data_source
            .connection_properties
            .connect_string
            .strip_prefix("jsondata=")
            .expect("connect string should start with jsondata=");
        let rows: Value = serde_json::from_str(embedded).unwrap();
        assert_eq!(
            rows,
            json!([
                {"SalesAmount": 50.0, "SalesDate": "2023-03-01", "SalesChannel": "Store", "ProductCategory": "Audio"},
                {"SalesAmount": 12.25, "SalesDate": "2023-01-01", "SalesChannel": "Online", "ProductCategory": "Cameras"}
            ])
        );

        let data_set = &report.data_sets[0];
        assert_eq!(data_set.query.data_source_name, data_source.name);
        let names: Vec<_> = data_set.fields.iter().map(|field| field.name).collect();
        assert_eq!(names, DATA_SET_FIELDS);
        assert!(data_set.fields.iter().all(|field| field.name == field.data_field));
    }

    #[test]
    fn page_geometry_is_fixed() {
        let report = must_build(DataType::SalesPerCategory, "Bar", false);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json["Page"],
            json!({
                "TopMargin": "0.5in",
                "BottomMargin": "0.5in",
                "LeftMargin": "0.5in",
                "RightMargin": "0.5in",
                "PageWidth": "8.5in",
                "PageHeight": "11in"
            })
        );
        assert_eq!(json["Width"], json!("7.5in"));
        let chart = &json["Body"]["ReportItems"][0];
        assert_eq!(chart["Width"], json!("7.5in"));
        assert_eq!(chart["Height"], json!("6in"));
        assert_eq!(chart["Top"], json!("0in"));
        assert_eq!(chart["Type"], json!("dvchart"));
        assert_eq!(chart["DataSetName"], json!("SalesDataSet"));
    }

    #[test]
    fn empty_rows_embed_empty_array() {
        let selection = Selection::new(DataType::SalesOverTime, "Line", "Office", false).unwrap();

        let report = build(&selection, &[]).unwrap();

        assert_eq!(
            report.data_sources[0].connection_properties.connect_string,
            "jsondata=[]"
        );
    }
}
