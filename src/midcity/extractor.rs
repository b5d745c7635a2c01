//! Meters page → readings.
//!
//! One cascade for every layout the portal has shipped: the page-global pass
//! handles the current single-meter page, the container pass handles the card
//! and panel layouts, and a page that fits neither is logged for diagnosis.

use chrono::{DateTime, Local};

use crate::midcity::card::parse_container;
use crate::midcity::containers::discover;
use crate::midcity::diagnostics::PageDiagnostics;
use crate::midcity::page::Page;
use crate::midcity::parsers::{balance, meter_number, zero_date};
use crate::model::MeterReading;

/// Extracts every reading from the meters page, stamped with the current time.
///
/// Never fails: a field no strategy can find means no reading for that meter,
/// and a page with no meters yields an empty vector.
pub fn extract(html: &str) -> Vec<MeterReading> {
    extract_at(html, Local::now())
}

/// Same as [`extract`] with a fixed extraction time.
pub fn extract_at(html: &str, timestamp: DateTime<Local>) -> Vec<MeterReading> {
    let page = Page::parse(html);
    tracing::info!(
        "Parsing meters page: {}",
        page.title().as_deref().unwrap_or("No title")
    );

    if let Some(reading) = from_whole_page(&page, timestamp) {
        tracing::info!(
            "Found meter {}: {} {}",
            reading.meter_number,
            reading.balance,
            reading.unit
        );
        return vec![reading];
    }

    tracing::warn!("Page-level extraction found no reading, trying meter containers");
    let containers = discover(&page);
    if containers.is_empty() {
        PageDiagnostics::collect(&page).log();
        return Vec::new();
    }

    let readings: Vec<MeterReading> = containers
        .iter()
        .filter_map(|container| parse_container(container, timestamp))
        .collect();

    if readings.is_empty() {
        tracing::warn!(
            "None of {} container(s) held a complete reading",
            containers.len()
        );
    } else {
        tracing::info!(
            "Extracted {} reading(s) from {} container(s)",
            readings.len(),
            containers.len()
        );
    }
    readings
}

fn from_whole_page(page: &Page, timestamp: DateTime<Local>) -> Option<MeterReading> {
    let meter_number = meter_number::resolve_on_page(page)?;
    let Some(balance) = balance::resolve_on_page(page) else {
        tracing::debug!("Meter {} found but no page-level balance", meter_number);
        return None;
    };
    let unit = balance.unit.unwrap_or_default();

    Some(MeterReading {
        meter_number,
        meter_type: unit.implied_meter_type(),
        balance: balance.value,
        unit,
        predicted_zero_date: zero_date::resolve(page.text()),
        last_updated: timestamp,
    })
}
