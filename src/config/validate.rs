//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    // Connector names double as source names; both must be set and distinct
    let qq_source = &config.connector.qq.source_name;
    let mc_source = &config.connector.minecraft.source_name;
    if qq_source.is_empty() {
        errors.push("connector.qq.source_name is required".to_string());
    }
    if mc_source.is_empty() {
        errors.push("connector.minecraft.source_name is required".to_string());
    }
    if !qq_source.is_empty() && qq_source == mc_source {
        errors.push(format!(
            "connector.qq.source_name and connector.minecraft.source_name must differ (both '{}')",
            qq_source
        ));
    }

    // An empty command would turn every message into a forced broadcast
    let cross = &config.system.cross_broadcast;
    if config.bridge.command_prefix.is_empty() && cross.mc_command.is_empty() {
        errors.push(
            "bridge.command_prefix and system.cross_broadcast.mc_command are both empty"
                .to_string(),
        );
    }
    if cross.qq_command.is_empty() {
        errors.push("system.cross_broadcast.qq_command is required".to_string());
    }
    if let Some(ref target) = cross.qq_target {
        if target.is_empty() {
            errors.push("system.cross_broadcast.qq_target must not be empty when set".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}
