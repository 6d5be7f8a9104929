//! Platform connectors and the registry that owns them.

pub mod console;
pub mod manager;

pub use console::{shared_sink, ConsoleConnector};
pub use manager::{ConnectorManager, ConnectorRegistry};
