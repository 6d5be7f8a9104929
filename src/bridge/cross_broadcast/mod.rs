//! Forced cross-platform broadcasts.
//!
//! Lets a user push one message to exactly one platform, bypassing that
//! platform's general broadcast setting:
//!
//! - QQ: `#mc <message>` goes to Minecraft only
//! - Minecraft: `!!qq <message>` goes to the fixed QQ group only
//!
//! Handling is split into three steps: [`classify`] decides what an event
//! is, [`strip_command`] builds the outgoing body, and [`dispatch`] hands it
//! to a single connector. Anything that does not match, or whose target is
//! missing or disabled, is reported as not handled.

pub mod classifier;
pub mod dispatcher;
pub mod rewrite;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::common::error::ConnectorResult;
use crate::common::BroadcastInfo;
use crate::config::types::Config;
use crate::connector::ConnectorRegistry;

use super::orchestrator::BasicSystem;

pub use classifier::{classify, Classification, CommandSettings};
pub use dispatcher::dispatch;
pub use rewrite::strip_command;

/// QQ group every `!!qq` broadcast is delivered to.
///
/// Deliberately not taken from the connector settings, so the command keeps
/// reaching this group whatever the QQ connector is renamed to.
pub const QQ_GROUP_TARGET: &str = "817621853";

/// System name used for registration and logging.
pub const SYSTEM_NAME: &str = "cross_broadcast";

/// The forced-broadcast router.
pub struct CrossBroadcastSystem {
    enabled: bool,
    settings: CommandSettings,
    /// Connector receiving `#mc` broadcasts.
    mc_target: String,
    /// Connector receiving `!!qq` broadcasts.
    qq_target: String,
    registry: Arc<dyn ConnectorRegistry>,
}

impl CrossBroadcastSystem {
    /// Create the system from configuration.
    pub fn new(config: &Config, registry: Arc<dyn ConnectorRegistry>) -> Self {
        let cross = &config.system.cross_broadcast;
        let settings = CommandSettings {
            qq_source: config.connector.qq.source_name.clone(),
            mc_source: config.connector.minecraft.source_name.clone(),
            mc_command: format!("{}{}", config.bridge.command_prefix, cross.mc_command),
            qq_command: cross.qq_command.clone(),
        };

        Self {
            enabled: cross.enable,
            mc_target: config.connector.minecraft.source_name.clone(),
            qq_target: cross
                .qq_target
                .clone()
                .unwrap_or_else(|| QQ_GROUP_TARGET.to_string()),
            settings,
            registry,
        }
    }

    #[allow(dead_code)]
    pub fn settings(&self) -> &CommandSettings {
        &self.settings
    }

    /// Connector a classified event would be delivered to.
    pub fn target_for(&self, classification: &Classification) -> Option<&str> {
        match classification {
            Classification::ToMinecraft { .. } => Some(self.mc_target.as_str()),
            Classification::ToQq { .. } => Some(self.qq_target.as_str()),
            Classification::Ignore | Classification::PassThrough => None,
        }
    }
}

#[async_trait]
impl BasicSystem for CrossBroadcastSystem {
    fn name(&self) -> &str {
        SYSTEM_NAME
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn process_broadcast_info(&self, info: &BroadcastInfo) -> ConnectorResult<bool> {
        if !self.enabled {
            trace!("Cross broadcast disabled, skipping event");
            return Ok(false);
        }

        let classification = classify(info, &self.settings);
        let (command, target) = match (classification.command(), self.target_for(&classification))
        {
            (Some(command), Some(target)) => (command, target),
            _ => {
                trace!(?classification, "Not a forced broadcast");
                return Ok(false);
            }
        };

        debug!(
            source = info.source_name(),
            command,
            target_connector = target,
            "Forced broadcast command matched"
        );

        let message = strip_command(&info.message, command);
        dispatch(self.registry.as_ref(), info, target, message).await
    }
}
