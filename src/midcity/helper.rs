//! Helper functions for reading MidCity HTML pages.
//!
//! This module provides utility functions for:
//! - Building CSS selectors without panicking on bad input
//! - Collecting the visible text of a document or element
//! - Walking ancestors (table nesting, hidden text)
//! - Parsing balances printed with thousands separators

use crate::error::ParseError;
use scraper::node::Node;
use scraper::{ElementRef, Selector};

/// Creates a CSS selector from a string.
///
/// This is a wrapper around scraper's Selector::parse that converts
/// parsing errors into our own error type for consistent error handling.
///
/// # Examples
///
/// Valid selectors:
/// - `"div.panel"` - Class selector
/// - `"select[name=meter_id] option"` - Attribute selector
/// - `"div.panel, div.well"` - Selector list
pub fn html_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::invalid_selector(selector, e))
}

/// Selects all matches of `selector` under `element`.
///
/// An invalid selector is logged and treated as matching nothing, so a typo
/// degrades one strategy instead of the whole extraction.
pub fn select_all<'a>(element: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match html_selector(selector) {
        Ok(selector) => element.select(&selector).collect(),
        Err(e) => {
            tracing::warn!("{}", e);
            Vec::new()
        }
    }
}

const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style", "noscript"];

/// Visible text nodes of an element, trimmed, in document order.
///
/// Text inside `<script>`, `<style>` and `<noscript>` is skipped; empty nodes
/// are dropped.
pub fn visible_text_nodes(element: ElementRef<'_>) -> Vec<&str> {
    element
        .descendants()
        .filter_map(|node| {
            let text = match node.value() {
                Node::Text(text) => text,
                _ => return None,
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| HIDDEN_TEXT_PARENTS.contains(&e.name()))
            });
            let trimmed = text.trim();
            (!hidden && !trimmed.is_empty()).then_some(trimmed)
        })
        .collect()
}

/// Visible text of an element, nodes joined by single spaces.
pub fn visible_text(element: ElementRef<'_>) -> String {
    visible_text_nodes(element).join(" ")
}

/// Returns true when the element sits somewhere inside a `<table>`.
pub fn is_inside_table(element: ElementRef<'_>) -> bool {
    element.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .is_some_and(|e| e.name() == "table")
    })
}

/// Truncates text to at most `max` characters for log output.
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Parses a decimal number, ignoring thousands separators.
///
/// # Returns
/// * `Some(value)` - e.g. `"1,234.56"` becomes `1234.56`
/// * `None` - when the text is not a number; callers treat this as no match
pub fn parse_decimal(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
