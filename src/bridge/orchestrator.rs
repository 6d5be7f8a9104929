//! Bridge orchestrator that runs inbound events through the processing systems.
//!
//! Systems are consulted in registration order; the first one that reports an
//! event as handled ends processing for that event.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::common::error::ConnectorResult;
use crate::common::BroadcastInfo;

/// One processing stage of the bridge.
#[async_trait]
pub trait BasicSystem: Send + Sync {
    fn name(&self) -> &str;

    fn is_enabled(&self) -> bool;

    /// Process an inbound event.
    ///
    /// Returns `Ok(true)` when the event was fully handled and no later
    /// system should see it.
    async fn process_broadcast_info(&self, info: &BroadcastInfo) -> ConnectorResult<bool>;
}

/// The main bridge that orchestrates event flow.
pub struct Bridge {
    systems: Vec<Box<dyn BasicSystem>>,
}

impl Bridge {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Append a system to the pipeline.
    pub fn with_system(mut self, system: Box<dyn BasicSystem>) -> Self {
        info!(
            system = system.name(),
            enabled = system.is_enabled(),
            "Registered system"
        );
        self.systems.push(system);
        self
    }

    /// Names of the registered systems, in order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Run one inbound event through the pipeline.
    ///
    /// Returns whether any system handled it. A system error stops the
    /// pipeline and is returned to the caller.
    pub async fn process(&self, info: &BroadcastInfo) -> ConnectorResult<bool> {
        for system in &self.systems {
            if system.process_broadcast_info(info).await? {
                debug!(system = system.name(), "Event handled");
                return Ok(true);
            }
        }

        debug!(source = info.source_name(), "Event not handled by any system");
        Ok(false)
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use crate::common::error::ConnectorError;

    struct CountingSystem {
        name: &'static str,
        handles: bool,
        fail: bool,
        seen: Arc<AtomicUsize>,
    }

    impl CountingSystem {
        fn boxed(name: &'static str, handles: bool, seen: Arc<AtomicUsize>) -> Box<Self> {
            Box::new(Self {
                name,
                handles,
                fail: false,
                seen,
            })
        }
    }

    #[async_trait]
    impl BasicSystem for CountingSystem {
        fn name(&self) -> &str {
            self.name
        }

        fn is_enabled(&self) -> bool {
            true
        }

        async fn process_broadcast_info(&self, _info: &BroadcastInfo) -> ConnectorResult<bool> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ConnectorError::SendFailed {
                    name: self.name.to_string(),
                    message: "boom".to_string(),
                });
            }
            Ok(self.handles)
        }
    }

    fn make_info() -> BroadcastInfo {
        serde_json::from_value(json!({
            "event_type": "message",
            "source": {"origin": "QQ"},
            "message": [{"type": "text", "data": {"text": "hello"}}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_first_handler_stops_pipeline() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let third = Arc::new(AtomicUsize::new(0));
        let bridge = Bridge::new()
            .with_system(CountingSystem::boxed("first", false, first.clone()))
            .with_system(CountingSystem::boxed("second", true, second.clone()))
            .with_system(CountingSystem::boxed("third", true, third.clone()));

        assert!(bridge.process(&make_info()).await.unwrap());
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unhandled_event() {
        let seen = Arc::new(AtomicUsize::new(0));
        let bridge = Bridge::new().with_system(CountingSystem::boxed("only", false, seen.clone()));

        assert!(!bridge.process(&make_info()).await.unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(bridge.system_names(), vec!["only"]);
    }

    #[tokio::test]
    async fn test_system_error_propagates() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut failing = CountingSystem::boxed("failing", false, seen.clone());
        failing.fail = true;
        let after = Arc::new(AtomicUsize::new(0));
        let bridge = Bridge::new()
            .with_system(failing)
            .with_system(CountingSystem::boxed("after", true, after.clone()));

        assert!(bridge.process(&make_info()).await.is_err());
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_bridge() {
        assert!(!Bridge::default().process(&make_info()).await.unwrap());
    }
}
