use super::reading::MeterReading;
use super::sensor::entity_id;
use super::traits::ReadingPublisher;

/// Outcome of publishing one batch of readings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishSummary {
    pub published: usize,
    pub failed: usize,
}

/// Publishes every reading in order.
///
/// A failure is logged against its entity and the remaining readings are still
/// published.
///
/// # Arguments
/// * `publisher` - The sink to publish through
/// * `readings` - Readings extracted in this cycle
///
/// # Returns
/// How many readings were published and how many failed
pub async fn publish_all(
    publisher: &dyn ReadingPublisher,
    readings: &[MeterReading],
) -> PublishSummary {
    let mut summary = PublishSummary::default();

    for reading in readings {
        match publisher.publish(reading).await {
            Ok(()) => summary.published += 1,
            Err(e) => {
                summary.failed += 1;
                tracing::error!(
                    "Failed to publish {}: {}",
                    entity_id(reading.meter_type, &reading.meter_number),
                    e
                );
            }
        }
    }

    summary
}
