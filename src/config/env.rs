//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `CROSSCAST_COMMAND_PREFIX` - Global command prefix
//! - `CROSSCAST_QQ_SOURCE` - Logical source name of the QQ side
//! - `CROSSCAST_MC_SOURCE` - Logical source name of the Minecraft side
//! - `CROSSCAST_CROSS_BROADCAST` - `true`/`false` to toggle forced broadcasts

use std::env;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "CROSSCAST";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(prefix) = env::var(format!("{}_COMMAND_PREFIX", ENV_PREFIX)) {
        config.bridge.command_prefix = prefix;
    }

    // Source names
    if let Ok(name) = env::var(format!("{}_QQ_SOURCE", ENV_PREFIX)) {
        config.connector.qq.source_name = name;
    }
    if let Ok(name) = env::var(format!("{}_MC_SOURCE", ENV_PREFIX)) {
        config.connector.minecraft.source_name = name;
    }

    if let Ok(enable) = env::var(format!("{}_CROSS_BROADCAST", ENV_PREFIX)) {
        if let Ok(enable) = enable.parse() {
            config.system.cross_broadcast.enable = enable;
        }
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `CROSSCAST_CONFIG` environment variable, otherwise returns "crosscast.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "crosscast.conf".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_prefix() {
        assert_eq!(ENV_PREFIX, "CROSSCAST");
    }

    #[test]
    fn test_get_config_path_default() {
        env::remove_var("CROSSCAST_CONFIG");
        assert_eq!(get_config_path(), "crosscast.conf");
    }

    #[test]
    fn test_apply_env_overrides_no_vars() {
        env::remove_var("CROSSCAST_COMMAND_PREFIX");
        env::remove_var("CROSSCAST_QQ_SOURCE");
        env::remove_var("CROSSCAST_MC_SOURCE");
        env::remove_var("CROSSCAST_CROSS_BROADCAST");

        let result = apply_env_overrides(Config::default());

        // Should remain unchanged
        assert_eq!(result.bridge.command_prefix, "#");
        assert_eq!(result.connector.qq.source_name, "QQ");
        assert_eq!(result.connector.minecraft.source_name, "Minecraft");
        assert!(result.system.cross_broadcast.enable);
    }
}
