//! The designer form as an explicit state machine.
//!
//! The form owns the four user inputs and the flags that decide which inputs
//! are enabled. Changing the data type is the only transition that touches
//! the dependent inputs, so it is expressed as a pure function from one form
//! state to the next.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    designer::store::FormId,
    report::{DataType, Palette, Selection, plot_subtypes_for},
};

/// Whether the form is being edited or has produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// The user is still choosing inputs.
    #[default]
    Editing,
    /// A selection has been taken from the form.
    Submitted,
}

/// Which of the two views the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The designer form.
    Design,
    /// The report viewer showing the report this form just built.
    Preview,
}

/// The raw form fields posted by the designer page.
///
/// Disabled inputs are not posted by the browser, so every field has a
/// default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionFormData {
    /// The form that posted the fields, issued when the form was rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<FormId>,
    /// The data type name, empty if none was chosen.
    #[serde(default)]
    pub data_type: String,
    /// The plot subtype name, empty if none was chosen.
    #[serde(default)]
    pub plot_type: String,
    /// Whether to split category charts by sales channel.
    #[serde(default)]
    pub grouping: bool,
    /// The palette name, empty for the default palette.
    #[serde(default)]
    pub palette: String,
}

/// The designer form state.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionForm {
    data_type: Option<DataType>,
    plot_types: &'static [&'static str],
    plot_type: Option<String>,
    plot_type_enabled: bool,
    grouping: bool,
    grouping_enabled: bool,
    palette: Palette,
    phase: FormPhase,
}

impl Default for SelectionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionForm {
    /// A form with nothing chosen and the dependent inputs disabled.
    pub fn new() -> Self {
        Self {
            data_type: None,
            plot_types: &[],
            plot_type: None,
            plot_type_enabled: false,
            grouping: false,
            grouping_enabled: false,
            palette: Palette::default(),
            phase: FormPhase::Editing,
        }
    }

    /// Rebuild the form from posted fields.
    ///
    /// The fields are replayed through the same transitions a user goes
    /// through, so grouping is dropped for data types that do not support it.
    ///
    /// # Errors
    /// Returns [Error::UnknownDataType] or [Error::UnknownPalette] if a name
    /// is not part of the catalog.
    pub fn from_form_data(data: &SelectionFormData) -> Result<Self, Error> {
        let mut form = Self::new();

        if !data.data_type.is_empty() {
            let data_type = data.data_type.parse::<DataType>().inspect_err(|error| {
                tracing::error!("rejected designer form: {error}");
            })?;
            form = form.on_data_type_changed(data_type);
        }

        if !data.plot_type.is_empty() {
            form = form.select_plot_type(&data.plot_type);
        }

        form = form.set_grouping(data.grouping);

        if !data.palette.is_empty() {
            form = form.select_palette(data.palette.parse::<Palette>()?);
        }

        Ok(form)
    }

    /// The form state that produced `selection`.
    pub fn from_selection(selection: &Selection) -> Self {
        let palette = selection.palette.parse::<Palette>().unwrap_or_default();

        let form = Self::new()
            .on_data_type_changed(selection.data_type())
            .select_plot_type(selection.plot_type())
            .set_grouping(selection.grouping())
            .select_palette(palette);

        Self {
            phase: FormPhase::Submitted,
            ..form
        }
    }

    /// Switch to `data_type`.
    ///
    /// The plot subtype list is replaced with the subtypes of `data_type`,
    /// the chosen subtype is cleared and the subtype input is enabled.
    /// Grouping is cleared and only enabled for [DataType::SalesPerCategory].
    pub fn on_data_type_changed(self, data_type: DataType) -> Self {
        Self {
            data_type: Some(data_type),
            plot_types: plot_subtypes_for(data_type),
            plot_type: None,
            plot_type_enabled: true,
            grouping: false,
            grouping_enabled: data_type == DataType::SalesPerCategory,
            phase: FormPhase::Editing,
            ..self
        }
    }

    /// Choose a plot subtype. Ignored while the subtype input is disabled.
    pub fn select_plot_type(self, plot_type: &str) -> Self {
        if !self.plot_type_enabled {
            return self;
        }

        Self {
            plot_type: Some(plot_type.to_owned()),
            phase: FormPhase::Editing,
            ..self
        }
    }

    /// Tick or untick grouping. Ignored while the grouping input is disabled.
    pub fn set_grouping(self, grouping: bool) -> Self {
        if !self.grouping_enabled {
            return self;
        }

        Self {
            grouping,
            phase: FormPhase::Editing,
            ..self
        }
    }

    /// Choose a palette.
    pub fn select_palette(self, palette: Palette) -> Self {
        Self {
            palette,
            phase: FormPhase::Editing,
            ..self
        }
    }

    /// Take a [Selection] from the form.
    ///
    /// The selection is a copy of the current inputs, so editing the form
    /// afterwards does not change it.
    ///
    /// # Errors
    /// Returns [Error::MissingField] if the data type or plot subtype is
    /// empty, and [Error::InvalidPlotType] if the subtype does not belong to
    /// the data type.
    pub fn submit(&self) -> Result<(SelectionForm, Selection), Error> {
        let data_type = self.data_type.ok_or(Error::MissingField("data type"))?;
        let plot_type = self
            .plot_type
            .as_deref()
            .ok_or(Error::MissingField("plot type"))?;

        let selection = Selection::new(data_type, plot_type, self.palette.name(), self.grouping)?;

        let form = Self {
            phase: FormPhase::Submitted,
            ..self.clone()
        };

        Ok((form, selection))
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.data_type
    }

    /// The plot subtypes offered for the chosen data type.
    pub fn plot_types(&self) -> &'static [&'static str] {
        self.plot_types
    }

    pub fn plot_type(&self) -> Option<&str> {
        self.plot_type.as_deref()
    }

    pub fn plot_type_enabled(&self) -> bool {
        self.plot_type_enabled
    }

    pub fn grouping(&self) -> bool {
        self.grouping
    }

    pub fn grouping_enabled(&self) -> bool {
        self.grouping_enabled
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }
}
