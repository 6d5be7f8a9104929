//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Errors raised by a connector while delivering an outbound event.
///
/// The router never produces these itself; they come from the registry or the
/// transport behind it and are handed back to the pipeline untouched.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Connector '{name}' failed to send: {message}")]
    SendFailed { name: String, message: String },

    #[error("Failed to serialize outbound event: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for connector operations.
pub type ConnectorResult<T> = std::result::Result<T, ConnectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = ConfigError::ValidationError {
            message: "connector.qq.source_name is required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Config validation failed: connector.qq.source_name is required"
        );
    }

    #[test]
    fn test_send_failed_message_names_connector() {
        let err = ConnectorError::SendFailed {
            name: "Minecraft".to_string(),
            message: "socket closed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Connector 'Minecraft' failed to send: socket closed"
        );
    }
}
