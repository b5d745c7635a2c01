//! Mock implementations for testing.
//!
//! This module provides stand-ins for the portal, the publishers and the MQTT
//! transport, each recording what was asked of it.

use crate::error::{PortalError, PublishError};
use crate::homeassistant::MqttTransport;
use crate::model::{MeterReading, MeterSource, ReadingPublisher};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy)]
enum SourceBehavior {
    Serve,
    RejectLogin,
    FailFetch(u16),
    Hang,
    Panic,
}

/// A portal stand-in that serves a fixed page or fails on demand.
pub struct MockMeterSource {
    page: String,
    behavior: SourceBehavior,
    login_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockMeterSource {
    fn with_behavior(page: String, behavior: SourceBehavior) -> Self {
        Self {
            page,
            behavior,
            login_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Creates a source that logs in and serves `page`.
    pub fn new(page: impl Into<String>) -> Self {
        Self::with_behavior(page.into(), SourceBehavior::Serve)
    }

    /// Creates a source whose login is always rejected.
    pub fn login_failure() -> Self {
        Self::with_behavior(String::new(), SourceBehavior::RejectLogin)
    }

    /// Creates a source whose meters page answers with `status`.
    pub fn fetch_failure(status: u16) -> Self {
        Self::with_behavior(String::new(), SourceBehavior::FailFetch(status))
    }

    /// Creates a source whose meters page never answers.
    pub fn hanging() -> Self {
        Self::with_behavior(String::new(), SourceBehavior::Hang)
    }

    /// Creates a source that panics while fetching.
    pub fn panicking() -> Self {
        Self::with_behavior(String::new(), SourceBehavior::Panic)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MeterSource for MockMeterSource {
    async fn login(&self) -> Result<(), PortalError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            SourceBehavior::RejectLogin => Err(PortalError::AuthFailed { status: 200 }),
            _ => Ok(()),
        }
    }

    async fn fetch_meters_page(&self) -> Result<String, PortalError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            SourceBehavior::FailFetch(status) => Err(PortalError::ServerError {
                status,
                message: "Service Unavailable".to_string(),
            }),
            SourceBehavior::Hang => std::future::pending().await,
            SourceBehavior::Panic => panic!("Mock meter source panicked"),
            _ => Ok(self.page.clone()),
        }
    }
}

/// A publisher that records readings and fails for chosen meters.
#[derive(Debug, Default)]
pub struct MockPublisher {
    failing: Vec<String>,
    published: Mutex<Vec<MeterReading>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a publisher that rejects the given meter numbers.
    pub fn failing_for(meter_numbers: &[&str]) -> Self {
        Self {
            failing: meter_numbers.iter().map(|m| m.to_string()).collect(),
            published: Mutex::new(Vec::new()),
        }
    }

    /// Meter numbers published successfully, in order.
    pub fn published_meter_numbers(&self) -> Vec<String> {
        self.published
            .lock()
            .expect("Mock publisher lock poisoned")
            .iter()
            .map(|r| r.meter_number.clone())
            .collect()
    }
}

#[async_trait]
impl ReadingPublisher for MockPublisher {
    async fn publish(&self, reading: &MeterReading) -> Result<(), PublishError> {
        if self.failing.contains(&reading.meter_number) {
            return Err(PublishError::Rejected {
                entity_id: reading.meter_number.clone(),
                status: 500,
                message: "Mock publish failure".to_string(),
            });
        }
        self.published
            .lock()
            .expect("Mock publisher lock poisoned")
            .push(reading.clone());
        Ok(())
    }
}

/// An MQTT transport that records retained messages instead of sending them.
///
/// Clones share the same message log.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    fail: bool,
    messages: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that refuses every publish.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Recorded (topic, payload) pairs, in publish order.
    pub fn messages(&self) -> Vec<(String, Vec<u8>)> {
        self.messages
            .lock()
            .expect("Recording transport lock poisoned")
            .clone()
    }
}

#[async_trait]
impl MqttTransport for RecordingTransport {
    async fn publish_retained(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::mqtt("request channel closed"));
        }
        self.messages
            .lock()
            .expect("Recording transport lock poisoned")
            .push((topic.to_string(), payload));
        Ok(())
    }
}
