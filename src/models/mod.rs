// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod membership;
pub mod permission;
pub mod report;
pub mod repository;

pub use membership::{Collaborator, Member, TeamGrant};
pub use permission::{CapabilityMap, Designation};
pub use report::{
    ArchiveOutcome, ArchiveStatus, AuditReport, ClassifiedCollaborator, RepositoryAudit,
    TimestampFailure,
};
pub use repository::{Repository, Visibility};
