// file: src/models/report.rs
// description: collected audit results handed from the orchestrator to the reporters
// reference: internal data structures

use crate::models::membership::{Collaborator, Member, TeamGrant};
use crate::models::permission::Designation;
use crate::models::repository::Repository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCollaborator {
    #[serde(flatten)]
    pub collaborator: Collaborator,
    pub designation: Designation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryAudit {
    pub repository: Repository,
    pub collaborators: Vec<ClassifiedCollaborator>,
    pub teams: Vec<TeamGrant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArchiveStatus {
    Archived,
    Failed { reason: String },
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveOutcome {
    pub repository: String,
    #[serde(flatten)]
    pub status: ArchiveStatus,
}

impl ArchiveOutcome {
    pub fn archived(repository: &str) -> Self {
        Self {
            repository: repository.to_string(),
            status: ArchiveStatus::Archived,
        }
    }

    pub fn failed(repository: &str, reason: impl Into<String>) -> Self {
        Self {
            repository: repository.to_string(),
            status: ArchiveStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn skipped(repository: &str) -> Self {
        Self {
            repository: repository.to_string(),
            status: ArchiveStatus::Skipped,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.status == ArchiveStatus::Archived
    }
}

/// A repository excluded from stale detection because its timestamp did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampFailure {
    pub repository: String,
    pub value: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub organization: String,
    pub generated_at: DateTime<Utc>,
    pub retention_days: u32,
    pub repositories: Vec<RepositoryAudit>,
    pub members: Vec<Member>,
    pub stale: Vec<String>,
    pub timestamp_failures: Vec<TimestampFailure>,
    pub archive_outcomes: Vec<ArchiveOutcome>,
}

impl AuditReport {
    pub fn archived_count(&self) -> usize {
        self.archive_outcomes
            .iter()
            .filter(|outcome| outcome.is_archived())
            .count()
    }

    pub fn failed_archives(&self) -> impl Iterator<Item = &ArchiveOutcome> {
        self.archive_outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, ArchiveStatus::Failed { .. }))
    }
}
