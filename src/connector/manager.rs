//! Connector registry.
//!
//! Owns the live connectors by name and fans outbound events out to them.
//! Systems only see the [`ConnectorRegistry`] trait so they can be driven by
//! a recording registry in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::common::error::ConnectorResult;
use crate::common::ProcessedInfo;

/// A named handle to one platform transport.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Name the connector is registered under.
    fn name(&self) -> &str;

    /// Live enabled flag.
    fn is_enabled(&self) -> bool;

    /// Deliver one outbound event.
    async fn send_message(&self, info: &ProcessedInfo) -> ConnectorResult<()>;
}

/// Lookup and broadcast entry points used by the bridge's systems.
#[async_trait]
pub trait ConnectorRegistry: Send + Sync {
    fn get_connector(&self, name: &str) -> Option<Arc<dyn Connector>>;

    /// Send `info` to every enabled connector, or only to those named in
    /// `include` when it is given.
    async fn broadcast_processed_info(
        &self,
        info: &ProcessedInfo,
        include: Option<&[String]>,
    ) -> ConnectorResult<()>;
}

/// Default in-process registry.
#[derive(Default)]
pub struct ConnectorManager {
    connectors: RwLock<HashMap<String, Arc<dyn Connector>>>,
}

impl ConnectorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connector under its own name, replacing any previous one.
    pub fn register(&self, connector: Arc<dyn Connector>) {
        let name = connector.name().to_string();
        if self
            .connectors
            .write()
            .insert(name.clone(), connector)
            .is_some()
        {
            warn!("Replaced existing connector '{}'", name);
        } else {
            debug!("Registered connector '{}'", name);
        }
    }

    #[allow(dead_code)]
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Connector>> {
        self.connectors.write().remove(name)
    }

    /// Names of all registered connectors, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.connectors.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of enabled connectors passing the inclusion filter.
    fn targets(&self, include: Option<&[String]>) -> Vec<Arc<dyn Connector>> {
        self.connectors
            .read()
            .values()
            .filter(|c| c.is_enabled())
            .filter(|c| include.map_or(true, |names| names.iter().any(|n| n == c.name())))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ConnectorRegistry for ConnectorManager {
    fn get_connector(&self, name: &str) -> Option<Arc<dyn Connector>> {
        self.connectors.read().get(name).cloned()
    }

    async fn broadcast_processed_info(
        &self,
        info: &ProcessedInfo,
        include: Option<&[String]>,
    ) -> ConnectorResult<()> {
        // Snapshot first so no lock is held across the sends
        let targets = self.targets(include);
        if targets.is_empty() {
            debug!(include = ?include, "No enabled connector to broadcast to");
            return Ok(());
        }

        let results = join_all(targets.iter().map(|c| c.send_message(info))).await;

        let mut first_error = None;
        for (connector, result) in targets.iter().zip(results) {
            if let Err(e) = result {
                warn!("Broadcast via '{}' failed: {}", connector.name(), e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
