use crate::config::MqttConfig;
use crate::error::PublishError;
use crate::homeassistant::discovery::{DiscoveryConfig, SensorTopics};
use crate::model::{MeterReading, ReadingPublisher, SensorAttributes, SensorDescriptor};
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::time::Duration;

const CLIENT_ID: &str = "midcity-ha-forwarder";
const KEEP_ALIVE: Duration = Duration::from_secs(30);
const REQUEST_CAPACITY: usize = 10;
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Publishes retained messages to the broker.
#[async_trait]
pub trait MqttTransport: Send + Sync {
    async fn publish_retained(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError>;
}

/// Queues without waiting: a full request queue (broker unreachable) or a
/// closed event loop is an error for this message only.
#[async_trait]
impl MqttTransport for AsyncClient {
    async fn publish_retained(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        self.try_publish(topic, QoS::AtLeastOnce, true, payload)
            .map_err(PublishError::mqtt)
    }
}

/// Connects to the broker and drives the connection on a background task.
///
/// The returned client only queues requests; nothing reaches the broker unless
/// the spawned event loop keeps polling, which it does until the process exits.
pub fn connect(config: &MqttConfig) -> AsyncClient {
    let mut options = MqttOptions::new(CLIENT_ID, config.host.clone(), config.port);
    options.set_keep_alive(KEEP_ALIVE);
    if let Some(username) = &config.username {
        options.set_credentials(username.clone(), config.password.clone().unwrap_or_default());
    }

    let (client, mut event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);
    let host = format!("{}:{}", config.host, config.port);
    tokio::spawn(async move {
        loop {
            match event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    tracing::info!("Connected to MQTT broker {}", host);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("MQTT connection to {} failed: {}", host, e);
                    tokio::time::sleep(RECONNECT_DELAY).await;
                }
            }
        }
    });

    client
}

/// Announces each meter through MQTT discovery and publishes its state.
pub struct MqttPublisher<T: MqttTransport> {
    transport: T,
}

impl<T: MqttTransport> MqttPublisher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: MqttTransport> ReadingPublisher for MqttPublisher<T> {
    async fn publish(&self, reading: &MeterReading) -> Result<(), PublishError> {
        let descriptor = SensorDescriptor::for_reading(reading);
        let topics = SensorTopics::for_object(&descriptor.object_id);

        let config = serde_json::to_vec(&DiscoveryConfig::new(&descriptor, &topics))?;
        let attributes = serde_json::to_vec(&SensorAttributes::new(reading, &descriptor))?;

        self.transport.publish_retained(&topics.config, config).await?;
        self.transport
            .publish_retained(&topics.state, reading.balance.to_string().into_bytes())
            .await?;
        self.transport
            .publish_retained(&topics.attributes, attributes)
            .await?;

        tracing::info!(
            "Published {} = {} {} over MQTT",
            descriptor.entity_id,
            reading.balance,
            descriptor.unit_of_measurement
        );
        Ok(())
    }
}
