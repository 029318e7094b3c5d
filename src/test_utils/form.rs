use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    must_select_one(html, "form")
}

#[track_caller]
pub(crate) fn must_select_one<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
    let parsed_selector =
        Selector::parse(selector).unwrap_or_else(|error| panic!("Invalid selector {selector}: {error:?}"));

    html.select(&parsed_selector)
        .next()
        .unwrap_or_else(|| panic!("No element found for selector \"{selector}\""))
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(element: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_attribute = element
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_attribute, endpoint,
        "want element with attribute {attribute}=\"{endpoint}\", got {hx_attribute:?}"
    );
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
}

/// Assert that the select named `name` offers exactly `want_values`, in order.
#[track_caller]
pub(crate) fn assert_select_options(html: &Html, name: &str, want_values: &[&str]) {
    let select = must_select_one(html, &format!("select[name='{name}']"));

    let got_values: Vec<&str> = select
        .select(&Selector::parse("option").unwrap())
        .map(|option| option.value().attr("value").unwrap_or_default())
        .collect();

    assert_eq!(
        got_values, want_values,
        "want select \"{name}\" with options {want_values:?}, got {got_values:?}"
    );
}
