//! HTML for the designer form and the report preview.

use maud::{Markup, PreEscaped, html};

use crate::{
    designer::{
        form::{FormPhase, SelectionForm, ViewMode},
        store::{FormId, REPORT_RESOURCE, ReportId, StoredReport},
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CHECKBOX_STYLE, FORM_CONTAINER_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base,
        format_currency_rounded, loading_spinner,
    },
    report::{DataType, Palette},
};

/// The stylesheet shipped with the report viewer bundle.
const VIEWER_STYLESHEET: &str = "/static/ar-js-viewer.css";

/// The element the designer and preview views are swapped into.
const CONTENT_ID: &str = "content";
const DEPENDENT_FIELDS_ID: &str = "dependent-fields";
const VIEWER_ID: &str = "report-viewer";

impl ViewMode {
    fn name(self) -> &'static str {
        match self {
            ViewMode::Design => "design",
            ViewMode::Preview => "preview",
        }
    }
}

/// The full designer page, starting in the design view.
pub fn designer_page(viewer_script: &str, form_id: FormId, form: &SelectionForm) -> Markup {
    let head_elements = [
        HeadElement::ScriptLink(viewer_script.to_owned()),
        HeadElement::StyleLink(VIEWER_STYLESHEET.to_owned()),
    ];

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="mb-6 text-2xl font-bold" { "Sales Chart Designer" }

            div id=(CONTENT_ID) class="w-full"
            {
                (design_view(form_id, form))
            }
        }
    };

    base("Designer", &head_elements, &content)
}

/// The design view: the selection form.
///
/// `form_id` is posted back with the form so that builds are serialized per
/// form.
pub fn design_view(form_id: FormId, form: &SelectionForm) -> Markup {
    let submit_text = match form.phase() {
        FormPhase::Editing => "Generate Report",
        FormPhase::Submitted => "Regenerate Report",
    };

    html! {
        section data-view-mode=(ViewMode::Design.name()) class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::REPORTS)
                hx-target={ "#" (CONTENT_ID) }
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                hx-disabled-elt="#submit-button"
                class="w-full space-y-4 md:space-y-6"
            {
                input type="hidden" name="form_id" value=(form_id);

                div
                {
                    label for="data_type" class=(FORM_LABEL_STYLE) { "Data Type" }

                    select
                        id="data_type"
                        name="data_type"
                        required
                        hx-get=(endpoints::SELECTION_FIELDS)
                        hx-trigger="change"
                        hx-target={ "#" (DEPENDENT_FIELDS_ID) }
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" disabled selected[form.data_type().is_none()]
                        {
                            "Select a data type"
                        }

                        @for data_type in DataType::ALL {
                            option
                                value=(data_type.name())
                                selected[form.data_type() == Some(data_type)]
                            {
                                (data_type.label())
                            }
                        }
                    }
                }

                div id=(DEPENDENT_FIELDS_ID) class="space-y-4 md:space-y-6"
                {
                    (dependent_fields_view(form))
                }

                div
                {
                    label for="palette" class=(FORM_LABEL_STYLE) { "Palette" }

                    select id="palette" name="palette" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for palette in Palette::ALL {
                            option value=(palette.name()) selected[form.palette() == palette]
                            {
                                (palette.name())
                            }
                        }
                    }
                }

                button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" id="indicator"
                    {
                        (loading_spinner())
                    }
                    (submit_text)
                }
            }
        }
    }
}

/// The inputs that depend on the chosen data type.
pub fn dependent_fields_view(form: &SelectionForm) -> Markup {
    html! {
        div
        {
            label for="plot_type" class=(FORM_LABEL_STYLE) { "Plot Type" }

            select
                id="plot_type"
                name="plot_type"
                required
                disabled[!form.plot_type_enabled()]
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" disabled selected[form.plot_type().is_none()]
                {
                    "Select a plot type"
                }

                @for plot_type in form.plot_types() {
                    option value=(plot_type) selected[form.plot_type() == Some(*plot_type)]
                    {
                        (plot_type)
                    }
                }
            }
        }

        div class="flex items-center gap-x-3"
        {
            input
                type="checkbox"
                id="grouping"
                name="grouping"
                value="true"
                checked[form.grouping()]
                disabled[!form.grouping_enabled()]
                class=(FORM_CHECKBOX_STYLE);

            label for="grouping" class="block text-sm font-medium text-gray-900 dark:text-white"
            {
                "Group by sales channel"
            }
        }
    }
}

/// The preview view: a summary of the built report and the report viewer.
pub fn preview_view(report: &StoredReport) -> Markup {
    let designer_endpoint = format_endpoint(endpoints::REPORT_DESIGNER, &report.id.to_string());

    html! {
        section
            data-view-mode=(ViewMode::Preview.name())
            data-report-id=(report.id)
            class="w-full space-y-4"
        {
            div class="flex items-center justify-between gap-x-4"
            {
                p class="text-sm text-gray-700 dark:text-gray-300"
                {
                    (report.selection.data_type().label())
                    " as a "
                    (report.selection.plot_type().to_lowercase())
                    " chart from "
                    (report.row_count)
                    " sales records totalling "
                    (format_currency_rounded(report.total_sales))
                }

                button
                    type="button"
                    hx-get=(designer_endpoint)
                    hx-target={ "#" (CONTENT_ID) }
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Designer"
                }
            }

            div id=(VIEWER_ID) class="w-full" style="height: 80vh;" {}

            script { (PreEscaped(open_viewer_script(report.id))) }
        }
    }
}

/// The script that opens the resources of report `id` in the viewer and adds
/// a toolbar button leading back to the designer.
fn open_viewer_script(id: ReportId) -> String {
    let id = id.to_string();
    let resource_prefix = format_endpoint(&format_endpoint(endpoints::REPORT_RESOURCES, &id), "");
    let designer = format_endpoint(endpoints::REPORT_DESIGNER, &id);

    format!(
        r##"
        (function () {{
            const viewer = new ActiveReports.Viewer("#{VIEWER_ID}");

            viewer.toolbar.addItem({{
                key: "$openDesigner",
                text: "Designer",
                iconCssClass: "mdi mdi-reply",
                enabled: true,
                action: function () {{
                    htmx.ajax("GET", "{designer}", {{ target: "#{CONTENT_ID}" }});
                }},
            }});

            viewer.toolbar.updateLayout({{
                default: [
                    "$openDesigner", "$split", "$navigation", "$split", "$refresh",
                    "$split", "$history", "$split", "$zoom", "$fullscreen", "$split",
                    "$print", "$split", "$singlepagemode", "$continuousmode", "$galleymode",
                ],
            }});

            viewer.open("{REPORT_RESOURCE}", {{
                ResourceLocator: {{
                    getResource: function (resource) {{
                        return fetch("{resource_prefix}" + encodeURIComponent(resource))
                            .then(function (response) {{ return response.json(); }});
                    }},
                }},
            }});
        }})();
        "##
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        designer::{
            form::SelectionForm,
            store::{ReportStore, StoredReport},
            view::{design_view, dependent_fields_view, designer_page, preview_view},
        },
        endpoints::{self, format_endpoint},
        report::{DataType, Palette, Selection, build},
        test_utils::{
            assert_form_submit_button, assert_hx_endpoint, assert_select_options,
            assert_valid_html, must_get_form, must_select_one,
        },
    };

    #[test]
    fn page_loads_viewer_script() {
        let html = Html::parse_document(
            &designer_page(
                "/viewer.js",
                ReportStore::default().new_form_id(),
                &SelectionForm::new(),
            )
            .into_string(),
        );

        assert_valid_html(&html);
        let script = must_select_one(&html, "script[src='/viewer.js']");
        assert_eq!(script.value().attr("src"), Some("/viewer.js"));
    }

    fn render_design_view(form: &SelectionForm) -> Html {
        let form_id = ReportStore::default().new_form_id();

        Html::parse_fragment(&design_view(form_id, form).into_string())
    }

    #[test]
    fn design_view_offers_every_data_type_and_palette() {
        let html = render_design_view(&SelectionForm::new());

        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::REPORTS, "hx-post");
        assert_form_submit_button(&form);
        assert_select_options(
            &html,
            "data_type",
            &["", "SalesOverTime", "SalesPerChannel", "SalesPerCategory"],
        );
        assert_select_options(&html, "palette", &["Office", "Light", "Dark", "Blue", "Orange"]);
    }

    #[test]
    fn design_view_posts_its_form_id() {
        let store = ReportStore::default();
        let form_id = store.new_form_id();

        let html = Html::parse_fragment(&design_view(form_id, &SelectionForm::new()).into_string());

        let input = must_select_one(&html, "input[type='hidden'][name='form_id']");
        assert_eq!(input.value().attr("value"), Some(form_id.to_string().as_str()));
    }

    #[test]
    fn data_type_select_requests_dependent_fields() {
        let html = render_design_view(&SelectionForm::new());

        let select = must_select_one(&html, "select[name='data_type']");
        assert_hx_endpoint(&select, endpoints::SELECTION_FIELDS, "hx-get");
        assert_eq!(select.value().attr("hx-trigger"), Some("change"));
        assert_eq!(select.value().attr("hx-target"), Some("#dependent-fields"));
    }

    #[test]
    fn dependent_fields_follow_form_state() {
        let form = SelectionForm::new()
            .on_data_type_changed(DataType::SalesPerCategory)
            .select_plot_type("Column")
            .set_grouping(true);

        let html = Html::parse_fragment(&dependent_fields_view(&form).into_string());

        assert_valid_html(&html);
        assert_select_options(&html, "plot_type", &["", "Bar", "Column"]);
        let selected = must_select_one(&html, "select[name='plot_type'] option[selected]");
        assert_eq!(selected.value().attr("value"), Some("Column"));
        let grouping = must_select_one(&html, "input[name='grouping']");
        assert!(grouping.value().attr("checked").is_some());
        assert!(grouping.value().attr("disabled").is_none());
    }

    #[test]
    fn restored_form_selects_palette() {
        let form = SelectionForm::new().select_palette(Palette::Blue);

        let html = render_design_view(&form);

        let selected = must_select_one(&html, "select[name='palette'] option[selected]");
        assert_eq!(selected.value().attr("value"), Some("Blue"));
    }

    #[test]
    fn preview_summarises_report_and_opens_viewer() {
        let store = ReportStore::default();
        let selection = Selection::new(DataType::SalesPerChannel, "Donut", "Office", false).unwrap();
        let report = StoredReport {
            id: store.new_report_id(),
            form_id: store.new_form_id(),
            report: build(&selection, &[]).unwrap(),
            selection,
            row_count: 3,
            total_sales: 122.56,
        };

        let html = Html::parse_fragment(&preview_view(&report).into_string());

        assert_valid_html(&html);
        let summary = must_select_one(&html, "p").text().collect::<String>();
        assert_eq!(
            summary,
            "Sales per channel as a donut chart from 3 sales records totalling $123"
        );
        let id = report.id.to_string();
        let section = must_select_one(&html, "section[data-view-mode='preview']");
        assert_eq!(section.value().attr("data-report-id"), Some(id.as_str()));
        let button = must_select_one(&html, "button");
        assert_hx_endpoint(
            &button,
            &format_endpoint(endpoints::REPORT_DESIGNER, &id),
            "hx-get",
        );
        let script = html
            .select(&Selector::parse("script").unwrap())
            .next()
            .expect("No script found")
            .inner_html();
        assert!(script.contains("new ActiveReports.Viewer(\"#report-viewer\")"));
        assert!(script.contains("viewer.open(\"report\""));
        assert!(script.contains(&format!(
            "fetch(\"/api/reports/{id}/resources/\" + encodeURIComponent(resource))"
        )));
        assert!(script.contains(&format!("htmx.ajax(\"GET\", \"/api/reports/{id}/designer\"")));
    }
}
