use chrono::{DateTime, Local};

use super::types::{MeterType, Unit};

/// One extracted record of a meter's current balance.
///
/// Built fresh on every poll cycle from the latest page and never merged
/// with earlier readings.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterReading {
    pub meter_number: String,
    pub meter_type: MeterType,
    pub balance: f64,
    pub unit: Unit,
    /// Date the balance is forecast to reach zero, as printed on the page
    pub predicted_zero_date: Option<String>,
    /// Extraction time, not source time
    pub last_updated: DateTime<Local>,
}
