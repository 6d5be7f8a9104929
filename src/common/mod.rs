//! Common utilities and types shared across the application.

pub mod error;
pub mod messages;
pub mod segment;

// Re-export event types
pub use messages::{BroadcastInfo, EventType, ProcessedInfo};
pub use segment::Segment;
