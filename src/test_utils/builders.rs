//! Test data builders.
//!
//! This module provides builder patterns for creating readings with sensible
//! defaults, so each test only spells out the fields it cares about.

use chrono::{DateTime, Local};

use super::fixtures::test_timestamp;
use crate::model::{MeterReading, MeterType, Unit};

/// Builder for creating MeterReading instances for testing.
///
/// Defaults to an electricity meter holding 100 kWh.
#[derive(Debug)]
pub struct MeterReadingBuilder {
    meter_number: String,
    meter_type: MeterType,
    balance: f64,
    unit: Unit,
    predicted_zero_date: Option<String>,
    last_updated: DateTime<Local>,
}

impl MeterReadingBuilder {
    pub fn new() -> Self {
        Self {
            meter_number: "12345678".to_string(),
            meter_type: MeterType::Electricity,
            balance: 100.0,
            unit: Unit::Kwh,
            predicted_zero_date: None,
            last_updated: test_timestamp(),
        }
    }

    pub fn meter_number(mut self, meter_number: &str) -> Self {
        self.meter_number = meter_number.to_string();
        self
    }

    pub fn meter_type(mut self, meter_type: MeterType) -> Self {
        self.meter_type = meter_type;
        self
    }

    pub fn balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn predicted_zero_date(mut self, date: &str) -> Self {
        self.predicted_zero_date = Some(date.to_string());
        self
    }

    pub fn build(self) -> MeterReading {
        MeterReading {
            meter_number: self.meter_number,
            meter_type: self.meter_type,
            balance: self.balance,
            unit: self.unit,
            predicted_zero_date: self.predicted_zero_date,
            last_updated: self.last_updated,
        }
    }
}

impl Default for MeterReadingBuilder {
    fn default() -> Self {
        Self::new()
    }
}
