//! Poll loop: login → fetch → extract → publish, then wait.
//!
//! Every cycle runs in its own task so a panic anywhere in scraping or
//! publishing costs one cycle, not the process.

use crate::error::PortalError;
use crate::midcity;
use crate::model::{publish_all, MeterSource, PublishSummary, ReadingPublisher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{sleep, timeout, Duration};

/// Wait after a rejected login or a crashed cycle.
pub const RETRY_DELAY: Duration = Duration::from_secs(60);

/// Longest a single cycle may run before it is abandoned.
pub const CYCLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Why a cycle stopped before publishing.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("login failed: {0}")]
    Auth(#[source] PortalError),

    #[error("failed to fetch meters page: {0}")]
    Fetch(#[source] PortalError),

    #[error("cycle timed out after {} seconds", .0.as_secs())]
    TimedOut(Duration),
}

pub type CycleResult = Result<PublishSummary, CycleError>;

pub struct Poller {
    source: Arc<dyn MeterSource>,
    publisher: Arc<dyn ReadingPublisher>,
    scan_interval: Duration,
    cycle_timeout: Duration,
    debug_html_path: Option<PathBuf>,
}

impl Poller {
    pub fn new(
        source: Arc<dyn MeterSource>,
        publisher: Arc<dyn ReadingPublisher>,
        scan_interval: Duration,
    ) -> Self {
        Self {
            source,
            publisher,
            scan_interval,
            cycle_timeout: CYCLE_TIMEOUT,
            debug_html_path: None,
        }
    }

    pub fn with_cycle_timeout(mut self, timeout: Duration) -> Self {
        self.cycle_timeout = timeout;
        self
    }

    /// Writes every fetched page to `path` before extraction.
    pub fn with_debug_html_path(mut self, path: Option<PathBuf>) -> Self {
        self.debug_html_path = path;
        self
    }

    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    /// Runs one login → fetch → extract → publish pass.
    ///
    /// An empty page is a completed cycle, not an error.
    pub async fn run_cycle(&self) -> CycleResult {
        tracing::info!("Fetching meter data...");
        self.source.login().await.map_err(CycleError::Auth)?;
        let html = self
            .source
            .fetch_meters_page()
            .await
            .map_err(CycleError::Fetch)?;

        if let Some(path) = &self.debug_html_path {
            match write_debug_page(path, &html) {
                Ok(()) => tracing::debug!("Saved meters page to {}", path.display()),
                Err(e) => tracing::warn!("Could not save meters page to {}: {}", path.display(), e),
            }
        }

        let readings = midcity::extract(&html);
        if readings.is_empty() {
            tracing::warn!("No meter data retrieved");
        }

        let summary = publish_all(self.publisher.as_ref(), &readings).await;
        tracing::info!(
            "Cycle finished: {} published, {} failed",
            summary.published,
            summary.failed
        );
        Ok(summary)
    }

    /// Runs one cycle, giving up once the cycle timeout has passed.
    pub async fn run_cycle_with_timeout(&self) -> CycleResult {
        match timeout(self.cycle_timeout, self.run_cycle()).await {
            Ok(result) => result,
            Err(_) => Err(CycleError::TimedOut(self.cycle_timeout)),
        }
    }

    /// Spawns a cycle that starts after `delay`.
    pub fn spawn_cycle(self: &Arc<Self>, delay: Duration) -> JoinHandle<CycleResult> {
        let poller = Arc::clone(self);
        tokio::spawn(async move {
            sleep(delay).await;
            poller.run_cycle_with_timeout().await
        })
    }

    /// Logs how a cycle task ended and picks the wait before the next one.
    ///
    /// # Returns
    /// * `RETRY_DELAY` - after a failed login or a panicked cycle
    /// * the scan interval - otherwise, including failed fetches and timeouts
    pub fn handle_cycle_result(&self, result: Result<CycleResult, JoinError>) -> Duration {
        match result {
            Ok(Ok(_)) => {
                tracing::info!(
                    "Waiting {} seconds until next update...",
                    self.scan_interval.as_secs()
                );
                self.scan_interval
            }
            Ok(Err(e @ CycleError::Auth(_))) => {
                tracing::error!("{}. Retrying in {} seconds...", e, RETRY_DELAY.as_secs());
                RETRY_DELAY
            }
            Ok(Err(e @ (CycleError::Fetch(_) | CycleError::TimedOut(_)))) => {
                tracing::error!("{}", e);
                self.scan_interval
            }
            Err(e) => {
                tracing::error!(
                    "Cycle task failed: {:?}. Retrying in {} seconds...",
                    e,
                    RETRY_DELAY.as_secs()
                );
                RETRY_DELAY
            }
        }
    }
}

fn write_debug_page(path: &Path, html: &str) -> Result<(), PortalError> {
    std::fs::write(path, html)?;
    Ok(())
}
