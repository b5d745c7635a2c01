//! Model definitions for MidCity meter readings and their Home Assistant sensors.
//!
//! This module provides the core data structures and traits shared by the
//! portal client, the extraction pipeline and the publishers.

pub mod reading;
pub mod sensor;
pub mod traits;
pub mod types;
pub mod utilities;

// Re-export commonly used items at the module level
pub use reading::MeterReading;
pub use sensor::{entity_id, SensorAttributes, SensorDescriptor};
pub use traits::{MeterSource, ReadingPublisher};
pub use types::{MeterType, Unit};
pub use utilities::{publish_all, PublishSummary};
