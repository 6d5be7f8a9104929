//! Event processing for the QQ / Minecraft bridge.
//!
//! ## Module Structure
//!
//! - `orchestrator`: `BasicSystem` trait and the `Bridge` pipeline
//! - `cross_broadcast`: forced single-platform broadcasts (`#mc`, `!!qq`)

pub mod cross_broadcast;
pub mod orchestrator;

// Re-export main types for convenience
pub use cross_broadcast::CrossBroadcastSystem;
pub use orchestrator::Bridge;
