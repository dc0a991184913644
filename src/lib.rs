// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod audit;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod report;
pub mod utils;

pub use audit::{AuditOrchestrator, AuditStats, ProgressTracker, RunOptions, classify, is_stale};
pub use config::{AuditPolicy, Config, GithubConfig, Overrides, Secret};
pub use error::{AuditError, Result};
pub use gateway::{GithubGateway, RepositoryGateway};
pub use models::{
    ArchiveOutcome, ArchiveStatus, AuditReport, CapabilityMap, ClassifiedCollaborator,
    Collaborator, Designation, Member, Repository, RepositoryAudit, TeamGrant, Visibility,
};
pub use report::{ConsoleReporter, JsonExporter};
pub use utils::Validator;
