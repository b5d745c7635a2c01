//! Predicted zero-balance date resolution.
//!
//! The portal prints the forecast next to the chart. It is optional, so a miss
//! simply leaves the field empty.

use regex::Regex;
use std::sync::LazyLock;

use crate::midcity::cascade::{first_match, Strategy};

static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Predicted\s+0\s+balance\s+date[:\s]+(\d{4}-\d{2}-\d{2})")
        .expect("Invalid regex")
});

static DAY_FIRST_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Predicted\s+0\s+balance\s+date[:\s]+(\d{1,2}[/-]\d{1,2}[/-]\d{4})")
        .expect("Invalid regex")
});

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Finds the predicted zero-balance date in free text, as printed.
pub fn resolve(text: &str) -> Option<String> {
    first_match(
        "predicted zero date",
        text,
        &[
            Strategy::new("ISO date", from_iso_date),
            Strategy::new("day-first date", from_day_first_date),
        ],
    )
}

fn from_iso_date(text: &str) -> Option<String> {
    capture(&ISO_DATE_RE, text)
}

fn from_day_first_date(text: &str) -> Option<String> {
    capture(&DAY_FIRST_DATE_RE, text)
}
