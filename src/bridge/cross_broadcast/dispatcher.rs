//! Single-target delivery of a forced broadcast.

use tracing::{debug, info, Instrument};

use crate::common::error::ConnectorResult;
use crate::common::segment::display_message;
use crate::common::{BroadcastInfo, ProcessedInfo, Segment};
use crate::connector::ConnectorRegistry;

/// Send `message` to the connector named `target` and nowhere else.
///
/// Returns `Ok(false)` without dispatching when the connector is missing or
/// disabled. Errors from the registry are returned untouched.
pub async fn dispatch(
    registry: &dyn ConnectorRegistry,
    info: &BroadcastInfo,
    target: &str,
    message: Vec<Segment>,
) -> ConnectorResult<bool> {
    match registry.get_connector(target) {
        Some(connector) if connector.is_enabled() => {}
        Some(_) => {
            debug!(target_connector = target, "Forced broadcast target is disabled");
            return Ok(false);
        }
        None => {
            debug!(target_connector = target, "Forced broadcast target not registered");
            return Ok(false);
        }
    }

    let processed = ProcessedInfo::from_broadcast(info, message);
    info!(
        target_connector = target,
        sender = %info.sender,
        "Forced broadcast {} -> {}: {}",
        info.source_name(),
        target,
        display_message(&processed.processed_message)
    );

    let include = [target.to_string()];
    registry
        .broadcast_processed_info(&processed, Some(include.as_slice()))
        .instrument(info.logger.clone())
        .await?;
    Ok(true)
}
