use crate::config::HomeAssistantConfig;
use crate::error::PublishError;
use crate::model::{MeterReading, ReadingPublisher, SensorAttributes, SensorDescriptor};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_derive::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct StateUpdate<'a> {
    state: f64,
    attributes: &'a SensorAttributes,
}

/// Writes sensor state through the Home Assistant REST API.
pub struct RestPublisher {
    http_client: HttpClient,
    config: HomeAssistantConfig,
}

impl RestPublisher {
    pub fn new(config: HomeAssistantConfig) -> Result<Self, PublishError> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl ReadingPublisher for RestPublisher {
    async fn publish(&self, reading: &MeterReading) -> Result<(), PublishError> {
        let descriptor = SensorDescriptor::for_reading(reading);
        let attributes = SensorAttributes::new(reading, &descriptor);
        let url = format!("{}/states/{}", self.config.url, descriptor.entity_id);
        tracing::debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(&StateUpdate {
                state: reading.balance,
                attributes: &attributes,
            })
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::OK | StatusCode::CREATED) {
            tracing::info!(
                "Updated sensor {} = {} {}",
                descriptor.entity_id,
                reading.balance,
                descriptor.unit_of_measurement
            );
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(PublishError::rejected(descriptor.entity_id, status, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MeterType;
    use crate::test_utils::builders::MeterReadingBuilder;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn publisher_for(server: &MockServer) -> RestPublisher {
        RestPublisher::new(HomeAssistantConfig {
            url: format!("{}/api", server.uri()),
            token: "test-token".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_publish_posts_state_and_attributes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/states/sensor.midcity_electricity_04123456789"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_partial_json(serde_json::json!({
                "state": 145.65,
                "attributes": {
                    "meter_number": "04123456789",
                    "meter_type": "electricity",
                    "unit_of_measurement": "kWh",
                    "device_class": "energy",
                    "icon": "mdi:lightning-bolt",
                    "attribution": "Data from MidCity Utilities",
                    "predicted_zero_date": "2025-12-13"
                }
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let reading = MeterReadingBuilder::new()
            .meter_number("04123456789")
            .balance(145.65)
            .predicted_zero_date("2025-12-13")
            .build();

        publisher_for(&server).publish(&reading).await.unwrap();
    }

    #[tokio::test]
    async fn test_publish_accepts_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/states/sensor.midcity_water_12_345"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let reading = MeterReadingBuilder::new()
            .meter_number("12 345")
            .meter_type(MeterType::Water)
            .build();

        assert!(publisher_for(&server).publish(&reading).await.is_ok());
    }

    #[tokio::test]
    async fn test_publish_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("401: Unauthorized"))
            .mount(&server)
            .await;

        let reading = MeterReadingBuilder::new().meter_number("11111111").build();
        let err = publisher_for(&server).publish(&reading).await.unwrap_err();

        match err {
            PublishError::Rejected {
                entity_id,
                status,
                message,
            } => {
                assert_eq!(entity_id, "sensor.midcity_electricity_11111111");
                assert_eq!(status, 401);
                assert_eq!(message, "401: Unauthorized");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_other_success_codes_are_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let reading = MeterReadingBuilder::new().build();
        let err = publisher_for(&server).publish(&reading).await.unwrap_err();
        assert!(matches!(err, PublishError::Rejected { status: 204, .. }));
    }
}
