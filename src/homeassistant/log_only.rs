use crate::error::PublishError;
use crate::model::{MeterReading, ReadingPublisher, SensorDescriptor};
use async_trait::async_trait;

/// Stand-in used when no Home Assistant token is available.
///
/// Readings are still scraped every cycle so the log shows what would have
/// been written once a token is configured.
#[derive(Debug, Default)]
pub struct LogOnlyPublisher;

#[async_trait]
impl ReadingPublisher for LogOnlyPublisher {
    async fn publish(&self, reading: &MeterReading) -> Result<(), PublishError> {
        let descriptor = SensorDescriptor::for_reading(reading);
        tracing::info!(
            "No Home Assistant token, not writing {}: meter {} = {} {}",
            descriptor.entity_id,
            reading.meter_number,
            reading.balance,
            reading.unit
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::publish_all;
    use crate::test_utils::builders::MeterReadingBuilder;

    #[tokio::test]
    async fn test_log_only_always_succeeds() {
        let readings = vec![
            MeterReadingBuilder::new().meter_number("11111111").build(),
            MeterReadingBuilder::new().meter_number("22222222").build(),
        ];

        let summary = publish_all(&LogOnlyPublisher, &readings).await;

        assert_eq!(summary.published, 2);
        assert_eq!(summary.failed, 0);
    }
}
