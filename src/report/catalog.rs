//! The fixed catalog of chart data types, plot subtypes and palettes.
//!
//! Every plot subtype belongs to exactly one data type. The subtypes are
//! modelled as one enum per chart family so that a subtype can only be paired
//! with the data type that owns it.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::Error;

/// The top-level chart category chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    /// Total sales per month.
    SalesOverTime,
    /// Share of sales per sales channel.
    SalesPerChannel,
    /// Total sales per product category.
    SalesPerCategory,
}

impl DataType {
    /// All data types in the order they are offered to the user.
    pub const ALL: [DataType; 3] = [
        DataType::SalesOverTime,
        DataType::SalesPerChannel,
        DataType::SalesPerCategory,
    ];

    /// The identifier used in forms and query strings.
    pub fn name(self) -> &'static str {
        match self {
            DataType::SalesOverTime => "SalesOverTime",
            DataType::SalesPerChannel => "SalesPerChannel",
            DataType::SalesPerCategory => "SalesPerCategory",
        }
    }

    /// The human readable label shown in the data type select.
    pub fn label(self) -> &'static str {
        title_for(self)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|data_type| data_type.name() == s)
            .ok_or_else(|| Error::UnknownDataType(s.to_owned()))
    }
}

/// Plot subtypes for [DataType::SalesOverTime].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimePlotType {
    /// A line through the monthly totals.
    Line,
    /// A filled area under the monthly totals.
    Area,
}

impl TimePlotType {
    const ALL: [TimePlotType; 2] = [TimePlotType::Line, TimePlotType::Area];

    /// The subtype name as offered in the plot type select.
    pub fn name(self) -> &'static str {
        match self {
            TimePlotType::Line => "Line",
            TimePlotType::Area => "Area",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plot| plot.name() == name)
    }
}

/// Plot subtypes for [DataType::SalesPerChannel].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RadialPlotType {
    /// A solid disk.
    Pie,
    /// A ring with a hole in the middle.
    Donut,
}

impl RadialPlotType {
    const ALL: [RadialPlotType; 2] = [RadialPlotType::Pie, RadialPlotType::Donut];

    /// The subtype name as offered in the plot type select.
    pub fn name(self) -> &'static str {
        match self {
            RadialPlotType::Pie => "Pie",
            RadialPlotType::Donut => "Donut",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plot| plot.name() == name)
    }
}

/// Plot subtypes for [DataType::SalesPerCategory].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CategoryPlotType {
    /// Horizontal bars.
    Bar,
    /// Vertical columns.
    Column,
}

impl CategoryPlotType {
    const ALL: [CategoryPlotType; 2] = [CategoryPlotType::Bar, CategoryPlotType::Column];

    /// The subtype name as offered in the plot type select.
    pub fn name(self) -> &'static str {
        match self {
            CategoryPlotType::Bar => "Bar",
            CategoryPlotType::Column => "Column",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plot| plot.name() == name)
    }
}

/// A data type paired with one of its own plot subtypes.
///
/// Grouping by sales channel only exists for the category family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSelection {
    /// Sales over time.
    Time(TimePlotType),
    /// Sales per channel.
    Channel(RadialPlotType),
    /// Sales per category, optionally clustered by channel.
    Category {
        /// Bar or column.
        plot: CategoryPlotType,
        /// Whether to split each category by sales channel.
        grouping: bool,
    },
}

impl ChartSelection {
    /// Pair `data_type` with the subtype called `plot_type`.
    ///
    /// `grouping` is dropped for data types other than
    /// [DataType::SalesPerCategory].
    ///
    /// # Errors
    /// Returns [Error::InvalidPlotType] if `plot_type` does not belong to
    /// `data_type`.
    pub fn new(data_type: DataType, plot_type: &str, grouping: bool) -> Result<Self, Error> {
        let chart = match data_type {
            DataType::SalesOverTime => TimePlotType::parse(plot_type).map(ChartSelection::Time),
            DataType::SalesPerChannel => {
                RadialPlotType::parse(plot_type).map(ChartSelection::Channel)
            }
            DataType::SalesPerCategory => CategoryPlotType::parse(plot_type)
                .map(|plot| ChartSelection::Category { plot, grouping }),
        };

        chart.ok_or_else(|| Error::InvalidPlotType {
            data_type,
            plot_type: plot_type.to_owned(),
        })
    }

    /// The data type that owns the selected subtype.
    pub fn data_type(&self) -> DataType {
        match self {
            ChartSelection::Time(_) => DataType::SalesOverTime,
            ChartSelection::Channel(_) => DataType::SalesPerChannel,
            ChartSelection::Category { .. } => DataType::SalesPerCategory,
        }
    }

    /// The name of the selected subtype.
    pub fn plot_type(&self) -> &'static str {
        match self {
            ChartSelection::Time(plot) => plot.name(),
            ChartSelection::Channel(plot) => plot.name(),
            ChartSelection::Category { plot, .. } => plot.name(),
        }
    }

    /// Whether the chart is split by sales channel.
    pub fn grouping(&self) -> bool {
        matches!(self, ChartSelection::Category { grouping: true, .. })
    }
}

/// The colour palettes offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    /// The default palette.
    #[default]
    Office,
    /// Pale tones for light page backgrounds.
    Light,
    /// Saturated tones for dark page backgrounds.
    Dark,
    /// Shades of blue.
    Blue,
    /// Shades of orange.
    Orange,
}

impl Palette {
    /// All palettes in the order they are offered to the user.
    pub const ALL: [Palette; 5] = [
        Palette::Office,
        Palette::Light,
        Palette::Dark,
        Palette::Blue,
        Palette::Orange,
    ];

    /// The palette name understood by the report viewer.
    pub fn name(self) -> &'static str {
        match self {
            Palette::Office => "Office",
            Palette::Light => "Light",
            Palette::Dark => "Dark",
            Palette::Blue => "Blue",
            Palette::Orange => "Orange",
        }
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|palette| palette.name() == s)
            .ok_or_else(|| Error::UnknownPalette(s.to_owned()))
    }
}

/// The plot subtypes that may be paired with `data_type`.
pub fn plot_subtypes_for(data_type: DataType) -> &'static [&'static str] {
    match data_type {
        DataType::SalesOverTime => &["Line", "Area"],
        DataType::SalesPerChannel => &["Pie", "Donut"],
        DataType::SalesPerCategory => &["Bar", "Column"],
    }
}

/// The chart title displayed for `data_type`.
pub fn title_for(data_type: DataType) -> &'static str {
    match data_type {
        DataType::SalesOverTime => "Sales over time",
        DataType::SalesPerChannel => "Sales per channel",
        DataType::SalesPerCategory => "Sales per category",
    }
}
