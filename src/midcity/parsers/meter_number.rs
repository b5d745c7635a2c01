//! Meter number resolution.

use regex::Regex;
use std::sync::LazyLock;

use crate::midcity::cascade::{first_match, Strategy};
use crate::midcity::containers::Container;
use crate::midcity::page::Page;

static SELECT_METER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Select Meter\D{0,80}?(\d{8,12})").expect("Invalid regex")
});

static OPTION_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{8,12})").expect("Invalid regex"));

static LABELLED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Meter|Account)\D*(\d{10,12})").expect("Invalid regex")
});

static BARE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{8,12})\b").expect("Invalid regex"));

static METER_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Meter\s*:?\s*(\d+)").expect("Invalid regex"));

static NUMBER_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)meter.*number").expect("Invalid regex"));

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolves the meter number from the page as a whole.
pub fn resolve_on_page(page: &Page) -> Option<String> {
    first_match(
        "meter number",
        page,
        &[
            Strategy::new("'Select Meter' text", from_select_meter_text),
            Strategy::new("meter dropdown", from_meter_dropdown),
            Strategy::new("meter/account label", from_labelled_text),
        ],
    )
}

/// Resolves the meter number inside one container.
pub fn resolve_in_container(container: &Container<'_>) -> Option<String> {
    first_match(
        "meter number",
        container,
        &[
            Strategy::new("data attribute", from_data_attribute),
            Strategy::new("meter-number element", from_number_element),
            Strategy::new("bare digit run", from_bare_digits),
            Strategy::new("'Meter:' label", from_meter_label),
        ],
    )
}

fn from_select_meter_text(page: &Page) -> Option<String> {
    capture(&SELECT_METER_RE, page.text())
}

fn from_meter_dropdown(page: &Page) -> Option<String> {
    page.select(r#"select[name="meter_id"] option"#)
        .into_iter()
        .filter_map(|option| option.value().attr("value"))
        .find_map(|value| capture(&OPTION_VALUE_RE, value))
}

fn from_labelled_text(page: &Page) -> Option<String> {
    capture(&LABELLED_RE, page.text())
}

fn from_data_attribute(container: &Container<'_>) -> Option<String> {
    container
        .attr("data-meter-id")
        .or_else(|| container.attr("data-meter"))
        .map(str::to_string)
}

fn from_number_element(container: &Container<'_>) -> Option<String> {
    container
        .descendant_elements()
        .find(|e| {
            let element = e.value();
            let named = matches!(element.name(), "span" | "div")
                && element.classes().any(|c| c == "meter-number");
            named || element.classes().any(|c| NUMBER_CLASS_RE.is_match(c))
        })
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn from_bare_digits(container: &Container<'_>) -> Option<String> {
    capture(&BARE_DIGITS_RE, &container.text)
}

fn from_meter_label(container: &Container<'_>) -> Option<String> {
    capture(&METER_LABEL_RE, &container.text)
}
