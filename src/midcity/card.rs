//! Turns one meter container into a reading.

use chrono::{DateTime, Local};

use crate::midcity::containers::Container;
use crate::midcity::helper::truncate;
use crate::midcity::parsers::{balance, meter_number, meter_type, zero_date};
use crate::model::MeterReading;

/// Parses a container into a reading.
///
/// # Returns
/// * `Some(reading)` - when both a meter number and a balance were found
/// * `None` - otherwise; partial readings are never produced
pub fn parse_container(
    container: &Container<'_>,
    timestamp: DateTime<Local>,
) -> Option<MeterReading> {
    tracing::debug!("Parsing container text: {}", truncate(&container.text, 200));

    let Some(meter_number) = meter_number::resolve_in_container(container) else {
        tracing::debug!("Could not find meter number in container");
        return None;
    };
    let Some(balance) = balance::resolve_in_container(container) else {
        tracing::debug!("Could not find balance for meter {}", meter_number);
        return None;
    };

    Some(MeterReading {
        meter_number,
        meter_type: meter_type::classify(balance.unit, container),
        balance: balance.value,
        unit: balance.unit.unwrap_or_default(),
        predicted_zero_date: zero_date::resolve(&container.text),
        last_updated: timestamp,
    })
}
