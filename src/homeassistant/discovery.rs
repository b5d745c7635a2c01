//! Home Assistant MQTT discovery topics and documents.

use serde_derive::Serialize;

use crate::model::SensorDescriptor;

pub const DISCOVERY_PREFIX: &str = "homeassistant";
pub const NODE_ID: &str = "midcity_utilities";

const DEVICE_NAME: &str = "MidCity Utilities";
const DEVICE_MODEL: &str = "Prepaid Meter";

/// The three retained topics of one sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTopics {
    pub config: String,
    pub state: String,
    pub attributes: String,
}

impl SensorTopics {
    pub fn for_object(object_id: &str) -> Self {
        let base = format!("{}/sensor/{}/{}", DISCOVERY_PREFIX, NODE_ID, object_id);
        Self {
            config: format!("{}/config", base),
            state: format!("{}/state", base),
            attributes: format!("{}/attributes", base),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub identifiers: Vec<String>,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            identifiers: vec![NODE_ID.to_string()],
            name: DEVICE_NAME.to_string(),
            manufacturer: DEVICE_NAME.to_string(),
            model: DEVICE_MODEL.to_string(),
        }
    }
}

/// Payload of a sensor's `config` topic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryConfig {
    pub name: String,
    pub unique_id: String,
    pub object_id: String,
    pub state_topic: String,
    pub json_attributes_topic: String,
    pub unit_of_measurement: String,
    pub device_class: String,
    pub icon: String,
    pub device: DeviceInfo,
}

impl DiscoveryConfig {
    pub fn new(descriptor: &SensorDescriptor, topics: &SensorTopics) -> Self {
        Self {
            name: descriptor.friendly_name.clone(),
            unique_id: descriptor.unique_id.clone(),
            object_id: descriptor.object_id.clone(),
            state_topic: topics.state.clone(),
            json_attributes_topic: topics.attributes.clone(),
            unit_of_measurement: descriptor.unit_of_measurement.clone(),
            device_class: descriptor.device_class.to_string(),
            icon: descriptor.icon.to_string(),
            device: DeviceInfo::default(),
        }
    }
}
