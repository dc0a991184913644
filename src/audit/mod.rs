// file: src/audit/mod.rs
// description: audit module exports and public api
// reference: audit orchestration

pub mod classifier;
pub mod orchestrator;
pub mod progress;
pub mod stale;

pub use classifier::classify;
pub use orchestrator::{AuditOrchestrator, RunOptions};
pub use progress::{AuditStats, ProgressTracker};
pub use stale::{StaleScan, is_stale, parse_timestamp};
