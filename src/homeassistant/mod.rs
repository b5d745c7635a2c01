mod discovery;
mod log_only;
mod mqtt;
mod rest;

pub use log_only::LogOnlyPublisher;
pub use mqtt::{connect as connect_mqtt, MqttPublisher, MqttTransport};
pub use rest::RestPublisher;
