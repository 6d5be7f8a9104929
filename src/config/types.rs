//! Configuration type definitions.

use serde::Deserialize;

/// Default global command prefix.
pub const DEFAULT_COMMAND_PREFIX: &str = "#";
/// Default logical source name of the QQ side.
pub const DEFAULT_QQ_SOURCE: &str = "QQ";
/// Default logical source name of the Minecraft side.
pub const DEFAULT_MC_SOURCE: &str = "Minecraft";
/// Default token (after the prefix) forcing a QQ message into Minecraft.
pub const DEFAULT_MC_COMMAND: &str = "mc";
/// Default command forcing a Minecraft message into QQ.
pub const DEFAULT_QQ_COMMAND: &str = "!!qq";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub connector: ConnectorsConfig,
    #[serde(default)]
    pub system: SystemsConfig,
}

/// Bridge-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Prefix for bridge commands typed in QQ.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
        }
    }
}

/// Per-platform connector settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectorsConfig {
    #[serde(default)]
    pub qq: QqConnectorConfig,
    #[serde(default)]
    pub minecraft: MinecraftConnectorConfig,
}

/// QQ connector settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QqConnectorConfig {
    /// Logical source name; also the name the connector is registered under.
    pub source_name: String,
    /// Whether the connector starts enabled.
    pub enable: bool,
}

impl Default for QqConnectorConfig {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_QQ_SOURCE.to_string(),
            enable: true,
        }
    }
}

/// Minecraft connector settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MinecraftConnectorConfig {
    pub source_name: String,
    pub enable: bool,
}

impl Default for MinecraftConnectorConfig {
    fn default() -> Self {
        Self {
            source_name: DEFAULT_MC_SOURCE.to_string(),
            enable: true,
        }
    }
}

/// Settings for the bridge's processing systems.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemsConfig {
    #[serde(default)]
    pub cross_broadcast: CrossBroadcastConfig,
}

/// Forced cross-platform broadcast settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CrossBroadcastConfig {
    #[serde(default = "default_true")]
    pub enable: bool,
    /// Appended to `bridge.command_prefix` to form the QQ -> Minecraft command.
    #[serde(default = "default_mc_command")]
    pub mc_command: String,
    /// Full Minecraft -> QQ command (no prefix applied).
    #[serde(default = "default_qq_command")]
    pub qq_command: String,
    /// Overrides the built-in QQ group target. Leave unset.
    #[serde(default)]
    pub qq_target: Option<String>,
}

impl Default for CrossBroadcastConfig {
    fn default() -> Self {
        Self {
            enable: true,
            mc_command: default_mc_command(),
            qq_command: default_qq_command(),
            qq_target: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_command_prefix() -> String {
    DEFAULT_COMMAND_PREFIX.to_string()
}

fn default_mc_command() -> String {
    DEFAULT_MC_COMMAND.to_string()
}

fn default_qq_command() -> String {
    DEFAULT_QQ_COMMAND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bridge.command_prefix, "#");
        assert_eq!(config.connector.qq.source_name, "QQ");
        assert_eq!(config.connector.minecraft.source_name, "Minecraft");
        assert!(config.connector.qq.enable);
        assert!(config.system.cross_broadcast.enable);
        assert_eq!(config.system.cross_broadcast.mc_command, "mc");
        assert_eq!(config.system.cross_broadcast.qq_command, "!!qq");
        assert!(config.system.cross_broadcast.qq_target.is_none());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"system": {"cross_broadcast": {"qq_command": "!!group"}}}"#,
        )
        .unwrap();
        assert_eq!(config.system.cross_broadcast.qq_command, "!!group");
        assert_eq!(config.system.cross_broadcast.mc_command, "mc");
        assert_eq!(config.connector.minecraft.source_name, "Minecraft");
    }

    #[test]
    fn test_partial_connector_table_keeps_its_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"connector": {"minecraft": {"enable": false}}}"#).unwrap();
        assert_eq!(config.connector.minecraft.source_name, "Minecraft");
        assert!(!config.connector.minecraft.enable);
        assert_eq!(config.connector.qq.source_name, "QQ");
    }
}
