//! Forced-broadcast command detection.

use crate::common::{BroadcastInfo, EventType};

/// Source names and command tokens the classifier matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSettings {
    pub qq_source: String,
    pub mc_source: String,
    /// Full QQ -> Minecraft command, prefix included (e.g. `#mc`).
    pub mc_command: String,
    /// Full Minecraft -> QQ command (e.g. `!!qq`).
    pub qq_command: String,
}

/// Routing decision for one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not a text message; nothing to look at.
    Ignore,
    /// QQ message forced into Minecraft. Carries the matched command.
    ToMinecraft { command: String },
    /// Minecraft message forced into QQ. Carries the matched command.
    ToQq { command: String },
    /// A text message without a forced-broadcast command.
    PassThrough,
}

impl Classification {
    /// Matched command token, if the event is a forced broadcast.
    pub fn command(&self) -> Option<&str> {
        match self {
            Classification::ToMinecraft { command } | Classification::ToQq { command } => {
                Some(command.as_str())
            }
            Classification::Ignore | Classification::PassThrough => None,
        }
    }
}

/// Classify an inbound event.
///
/// Only the first segment is inspected, and it must be text. Matching is a
/// case-sensitive prefix test on its trimmed text.
pub fn classify(info: &BroadcastInfo, settings: &CommandSettings) -> Classification {
    if info.event_type != EventType::Message {
        return Classification::Ignore;
    }

    let text = match info.message.first().and_then(|seg| seg.as_text()) {
        Some(text) => text.trim(),
        None => return Classification::Ignore,
    };

    let source = info.source_name();

    if source == settings.qq_source && text.starts_with(settings.mc_command.as_str()) {
        return Classification::ToMinecraft {
            command: settings.mc_command.clone(),
        };
    }

    if source == settings.mc_source && text.starts_with(settings.qq_command.as_str()) {
        return Classification::ToQq {
            command: settings.qq_command.clone(),
        };
    }

    Classification::PassThrough
}
