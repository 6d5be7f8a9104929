//! Message segments.
//!
//! A message body is an ordered list of segments in the OneBot wire shape:
//! `{"type": "text", "data": {"text": "hello"}}`. Only the `text` kind is
//! interpreted here; every other kind is carried through exactly as received,
//! including data fields this crate knows nothing about.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Segment kind for plain text.
pub const TEXT_SEGMENT: &str = "text";

/// A single unit of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment kind (`text`, `image`, `at`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind-specific payload. A missing or `null` payload reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Segment {
    /// Create a plain text segment.
    pub fn text(text: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("text".to_string(), Value::String(text.into()));
        Self {
            kind: TEXT_SEGMENT.to_string(),
            data,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == TEXT_SEGMENT
    }

    /// Returns the text of a `text` segment.
    ///
    /// A text segment without a string `text` field reads as empty.
    pub fn as_text(&self) -> Option<&str> {
        if !self.is_text() {
            return None;
        }
        Some(self.data.get("text").and_then(Value::as_str).unwrap_or(""))
    }

    /// Returns a copy of this segment with its `text` field replaced.
    ///
    /// The kind and every other data field are kept as they are.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        let mut data = self.data.clone();
        data.insert("text".to_string(), Value::String(text.into()));
        Self {
            kind: self.kind.clone(),
            data,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "[{}]", self.kind),
        }
    }
}

/// Render a message body for logging.
pub fn display_message(segments: &[Segment]) -> String {
    segments.iter().map(ToString::to_string).collect()
}
