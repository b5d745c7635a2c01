//! Home Assistant view of a meter reading.
//!
//! Everything here is derived deterministically from a [`MeterReading`], so the
//! same meter always lands on the same entity regardless of transport.

use serde_derive::Serialize;

use super::reading::MeterReading;
use super::types::MeterType;

pub const ATTRIBUTION: &str = "Data from MidCity Utilities";

/// Sanitizes a meter number for use inside entity and object ids.
fn id_fragment(meter_number: &str) -> String {
    meter_number.replace(' ', "_").to_lowercase()
}

/// Object id shared by the REST entity and the MQTT discovery topic.
pub fn object_id(meter_type: MeterType, meter_number: &str) -> String {
    format!("midcity_{}_{}", meter_type, id_fragment(meter_number))
}

/// Entity id a reading is published under, e.g. `sensor.midcity_electricity_123_456`.
pub fn entity_id(meter_type: MeterType, meter_number: &str) -> String {
    format!("sensor.{}", object_id(meter_type, meter_number))
}

/// Stable unique id, kept without the `sensor.` prefix.
pub fn unique_id(meter_type: MeterType, meter_number: &str) -> String {
    format!("midcity_{}_{}", meter_type, meter_number)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorDescriptor {
    pub object_id: String,
    pub entity_id: String,
    pub unique_id: String,
    pub friendly_name: String,
    pub device_class: &'static str,
    pub icon: &'static str,
    pub unit_of_measurement: String,
}

impl SensorDescriptor {
    pub fn for_reading(reading: &MeterReading) -> Self {
        let meter_type = reading.meter_type;
        let (device_class, icon) = match meter_type {
            MeterType::Electricity => ("energy", "mdi:lightning-bolt"),
            MeterType::Water => ("water", "mdi:water"),
            _ => ("monetary", "mdi:cash"),
        };

        Self {
            object_id: object_id(meter_type, &reading.meter_number),
            entity_id: entity_id(meter_type, &reading.meter_number),
            unique_id: unique_id(meter_type, &reading.meter_number),
            friendly_name: format!("MidCity {}", meter_type.title()),
            device_class,
            icon,
            unit_of_measurement: reading.unit.to_string(),
        }
    }
}

/// State attributes attached to the sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorAttributes {
    pub meter_number: String,
    pub meter_type: String,
    pub unit_of_measurement: String,
    pub device_class: String,
    pub friendly_name: String,
    pub last_updated: String,
    pub icon: String,
    pub attribution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_zero_date: Option<String>,
}

impl SensorAttributes {
    pub fn new(reading: &MeterReading, descriptor: &SensorDescriptor) -> Self {
        Self {
            meter_number: reading.meter_number.clone(),
            meter_type: reading.meter_type.to_string(),
            unit_of_measurement: descriptor.unit_of_measurement.clone(),
            device_class: descriptor.device_class.to_string(),
            friendly_name: descriptor.friendly_name.clone(),
            last_updated: reading.last_updated.to_rfc3339(),
            icon: descriptor.icon.to_string(),
            attribution: ATTRIBUTION.to_string(),
            predicted_zero_date: reading.predicted_zero_date.clone(),
        }
    }
}
