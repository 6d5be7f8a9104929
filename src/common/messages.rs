//! Canonical event types flowing through the bridge.
//!
//! `BroadcastInfo` is what the ingestion side observed on one platform;
//! `ProcessedInfo` is what gets handed to connectors for delivery.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::Span;

use crate::common::segment::Segment;

/// Kind of inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Message,
    Notice,
    Request,
    MetaEvent,
    #[serde(other)]
    Other,
}

/// Where an event came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSource {
    /// Name of the originating platform instance (e.g. "QQ", "Minecraft").
    pub origin: String,
}

impl EventSource {
    #[allow(dead_code)]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

/// One message observed on either platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastInfo {
    pub event_type: EventType,
    #[serde(default)]
    pub event_sub_type: String,
    /// Message body.
    #[serde(default)]
    pub message: Vec<Segment>,
    pub source: EventSource,
    /// Receiver-side source name, preferred over `source.origin` when set.
    #[serde(default)]
    pub receiver_source: Option<String>,
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub sender_id: String,
    /// Platform payload as received.
    #[serde(default)]
    pub raw: Value,
    /// Server tag.
    #[serde(default)]
    pub server: Option<String>,
    /// Logging handle for everything done on behalf of this event.
    #[serde(skip, default = "Span::none")]
    pub logger: Span,
}

impl BroadcastInfo {
    /// Logical source of the event.
    ///
    /// An empty receiver-side override counts as absent.
    pub fn source_name(&self) -> &str {
        self.receiver_source
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.source.origin)
    }
}

/// A message ready for delivery through a connector.
///
/// Carries the rewritten body plus the metadata of the event it was derived
/// from, copied as-is.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedInfo {
    pub processed_message: Vec<Segment>,
    pub source: EventSource,
    pub source_id: String,
    pub sender: String,
    pub sender_id: String,
    pub raw: Value,
    pub server: Option<String>,
    pub event_sub_type: String,
    #[serde(skip)]
    pub logger: Span,
}

impl ProcessedInfo {
    /// Build an outbound event from an inbound one and a new message body.
    pub fn from_broadcast(info: &BroadcastInfo, processed_message: Vec<Segment>) -> Self {
        Self {
            processed_message,
            source: info.source.clone(),
            source_id: info.source_id.clone(),
            sender: info.sender.clone(),
            sender_id: info.sender_id.clone(),
            raw: info.raw.clone(),
            server: info.server.clone(),
            event_sub_type: info.event_sub_type.clone(),
            logger: info.logger.clone(),
        }
    }
}
