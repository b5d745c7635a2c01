use crate::error::{PortalError, PublishError};
use async_trait::async_trait;

use super::reading::MeterReading;

/// Source of the meters page.
///
/// The poll loop logs in and fetches through this trait so tests can stand in
/// for the live portal.
#[async_trait]
pub trait MeterSource: Send + Sync {
    /// Authenticates the session.
    ///
    /// # Returns
    /// - `Ok(())` when the portal accepted the credentials
    /// - `Err(PortalError::AuthFailed)` for any other answer
    async fn login(&self) -> Result<(), PortalError>;

    /// Fetches the raw HTML of the meters page on the authenticated session.
    async fn fetch_meters_page(&self) -> Result<String, PortalError>;
}

/// Sink that turns a reading into Home Assistant sensor state.
#[async_trait]
pub trait ReadingPublisher: Send + Sync {
    /// Publishes one reading. Failures are per reading and never abort a batch.
    async fn publish(&self, reading: &MeterReading) -> Result<(), PublishError>;
}
