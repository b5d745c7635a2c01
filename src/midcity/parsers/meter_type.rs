//! Meter type classification.
//!
//! The type is never read as primary data. The unit a balance was printed in
//! is the strongest hint, then whatever the container says about itself.

use regex::Regex;
use std::sync::LazyLock;

use crate::midcity::cascade::{first_match, Strategy};
use crate::midcity::containers::Container;
use crate::model::{MeterType, Unit};

static TYPE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)type").expect("Invalid regex"));

/// Classifies a container's meter.
///
/// # Arguments
/// * `unit` - Unit the balance was found in, if the matching strategy knew it
/// * `container` - The container the reading came from
pub fn classify(unit: Option<Unit>, container: &Container<'_>) -> MeterType {
    if let Some(unit) = unit {
        return unit.implied_meter_type();
    }

    first_match(
        "meter type",
        container,
        &[
            Strategy::new("type attribute", from_type_attribute),
            Strategy::new("type element", from_type_element),
            Strategy::new("keyword", from_keywords),
        ],
    )
    .unwrap_or(MeterType::Unknown)
}

fn from_type_attribute(container: &Container<'_>) -> Option<MeterType> {
    container
        .attr("data-meter-type")
        .or_else(|| container.attr("data-type"))
        .and_then(MeterType::from_label)
}

fn from_type_element(container: &Container<'_>) -> Option<MeterType> {
    let named = container.descendant_elements().find(|e| {
        matches!(e.value().name(), "span" | "div") && e.value().classes().any(|c| c == "meter-type")
    });
    let element = named.or_else(|| {
        container
            .descendant_elements()
            .find(|e| e.value().classes().any(|c| TYPE_CLASS_RE.is_match(c)))
    })?;
    MeterType::from_label(&element.text().collect::<String>())
}

fn from_keywords(container: &Container<'_>) -> Option<MeterType> {
    let text = container.text.to_lowercase();
    if text.contains("electricity") || text.contains("electric") {
        Some(MeterType::Electricity)
    } else if text.contains("water") {
        Some(MeterType::Water)
    } else if text.contains("gas") {
        Some(MeterType::Gas)
    } else {
        None
    }
}
