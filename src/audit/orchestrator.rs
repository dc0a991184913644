// file: src/audit/orchestrator.rs
// description: sequences gateway calls, classification, stale detection and archival
// reference: orchestrates the sequential audit workflow

use crate::audit::classifier::classify;
use crate::audit::progress::{AuditStats, ProgressTracker};
use crate::audit::stale;
use crate::config::AuditPolicy;
use crate::error::Result;
use crate::gateway::RepositoryGateway;
use crate::models::{
    ArchiveOutcome, AuditReport, ClassifiedCollaborator, Repository, RepositoryAudit,
};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute stale repositories but do not archive them.
    pub dry_run: bool,
    /// Draw a progress bar while collecting.
    pub show_progress: bool,
    pub colored: bool,
}

pub struct AuditOrchestrator<'a, G: RepositoryGateway> {
    gateway: &'a G,
    policy: AuditPolicy,
    options: RunOptions,
}

impl<'a, G: RepositoryGateway> AuditOrchestrator<'a, G> {
    pub fn new(gateway: &'a G, policy: AuditPolicy, options: RunOptions) -> Self {
        Self {
            gateway,
            policy,
            options,
        }
    }

    fn archiving_enabled(&self) -> bool {
        self.policy.archive_stale && !self.options.dry_run
    }

    /// Full audit against the wall clock.
    pub async fn run(&self) -> (AuditReport, AuditStats) {
        self.run_at(Utc::now()).await
    }

    /// Full audit: repositories, members, per-repository access, then stale
    /// detection and archival relative to `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> (AuditReport, AuditStats) {
        let org = self.policy.organization.as_str();
        info!("Auditing organization {}", org);

        let repositories = self.fetch_repositories(org).await;
        info!("Total repositories: {}", repositories.len());

        let progress = if self.options.show_progress {
            ProgressTracker::with_color(repositories.len(), self.options.colored)
        } else {
            ProgressTracker::hidden(repositories.len())
        };

        let members = degrade(
            self.gateway.list_members(org).await,
            "list members",
            org,
            &progress,
        );
        info!("Total organization members: {}", members.len());

        let mut audits = Vec::with_capacity(repositories.len());
        for repository in &repositories {
            progress.set_message(repository.name.clone());
            audits.push(self.audit_repository(repository, &progress).await);
            progress.inc_repositories_audited();
        }

        let stats = progress.get_stats();
        progress.finish();

        let mut report = self.sweep_stale(&repositories, now).await;
        report.repositories = audits;
        report.members = members;

        (report, stats)
    }

    /// Stale detection and archival only, without access collection.
    pub async fn run_stale_at(&self, now: DateTime<Utc>) -> AuditReport {
        let repositories = self.fetch_repositories(&self.policy.organization).await;
        info!("Total repositories: {}", repositories.len());
        self.sweep_stale(&repositories, now).await
    }

    async fn fetch_repositories(&self, org: &str) -> Vec<Repository> {
        match self.gateway.list_repositories(org).await {
            Ok(repositories) => repositories,
            Err(e) => {
                warn!("Failed to fetch repositories for {}: {}", org, e);
                Vec::new()
            }
        }
    }

    async fn audit_repository(
        &self,
        repository: &Repository,
        progress: &ProgressTracker,
    ) -> RepositoryAudit {
        let collaborators = degrade(
            self.gateway.list_collaborators(repository).await,
            "list collaborators",
            &repository.name,
            progress,
        );

        let teams = degrade(
            self.gateway.list_teams(repository).await,
            "list teams",
            &repository.name,
            progress,
        );

        let collaborators: Vec<ClassifiedCollaborator> = collaborators
            .into_iter()
            .map(|collaborator| ClassifiedCollaborator {
                designation: classify(&collaborator.permissions),
                collaborator,
            })
            .collect();
        progress.add_collaborators(collaborators.len());

        RepositoryAudit {
            repository: repository.clone(),
            collaborators,
            teams,
        }
    }

    async fn sweep_stale(&self, repositories: &[Repository], now: DateTime<Utc>) -> AuditReport {
        let scan = stale::scan(repositories, now, self.policy.retention_days);
        info!(
            "Stale repositories (not updated in {} days): {}",
            self.policy.retention_days,
            scan.stale.len()
        );

        let mut archive_outcomes = Vec::with_capacity(scan.stale.len());
        for repository in &scan.stale {
            archive_outcomes.push(self.archive(repository).await);
        }

        AuditReport {
            organization: self.policy.organization.clone(),
            generated_at: now,
            retention_days: self.policy.retention_days,
            repositories: Vec::new(),
            members: Vec::new(),
            stale: scan.stale.iter().map(|r| r.name.clone()).collect(),
            timestamp_failures: scan.failures,
            archive_outcomes,
        }
    }

    async fn archive(&self, repository: &Repository) -> ArchiveOutcome {
        if !self.archiving_enabled() {
            info!("Not archiving {} (archival disabled)", repository.name);
            return ArchiveOutcome::skipped(&repository.name);
        }

        if repository.archived {
            info!("{} is already archived", repository.name);
            return ArchiveOutcome::archived(&repository.name);
        }

        match self.gateway.archive(repository).await {
            Ok(()) => {
                info!("Archived repository {}", repository.name);
                ArchiveOutcome::archived(&repository.name)
            }
            Err(e) => {
                error!("Failed to archive repository {}: {}", repository.name, e);
                ArchiveOutcome::failed(&repository.name, e.to_string())
            }
        }
    }
}

/// Turn a failed list call into "no data", logging operation and target.
fn degrade<T>(
    result: Result<Vec<T>>,
    operation: &str,
    target: &str,
    progress: &ProgressTracker,
) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) if e.is_not_found() => {
            info!("{} for {}: not found, treating as empty", operation, target);
            Vec::new()
        }
        Err(e) => {
            progress.inc_failed_calls();
            warn!("{} for {} failed: {}", operation, target, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuditError;
    use crate::models::{CapabilityMap, Collaborator, Designation, Member, TeamGrant};
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubGateway {
        repositories: Vec<Repository>,
        fail_members: bool,
        archived: Mutex<Vec<String>>,
    }

    impl RepositoryGateway for StubGateway {
        async fn list_repositories(&self, _org: &str) -> Result<Vec<Repository>> {
            Ok(self.repositories.clone())
        }

        async fn list_collaborators(&self, repository: &Repository) -> Result<Vec<Collaborator>> {
            if repository.name == "secret" {
                return Err(AuditError::NotFound(repository.collaborators_url()));
            }
            Ok(vec![Collaborator {
                login: "reader".to_string(),
                permissions: CapabilityMap::new().with("pull", true).with("push", false),
            }])
        }

        async fn list_teams(&self, _repository: &Repository) -> Result<Vec<TeamGrant>> {
            Ok(vec![TeamGrant {
                name: "core".to_string(),
                permission: "push".to_string(),
            }])
        }

        async fn list_members(&self, org: &str) -> Result<Vec<Member>> {
            if self.fail_members {
                return Err(AuditError::Transport {
                    target: org.to_string(),
                    message: "connection reset".to_string(),
                });
            }
            Ok(vec![Member {
                login: "reader".to_string(),
            }])
        }

        async fn archive(&self, repository: &Repository) -> Result<()> {
            self.archived.lock().unwrap().push(repository.name.clone());
            Ok(())
        }
    }

    fn repo(name: &str, updated_at: &str, archived: bool) -> Repository {
        Repository {
            id: 1,
            name: name.to_string(),
            private: true,
            updated_at: Some(updated_at.to_string()),
            url: format!("https://api.github.com/repos/acme/{}", name),
            archived,
        }
    }

    fn policy() -> AuditPolicy {
        AuditPolicy {
            organization: "acme".to_string(),
            retention_days: 90,
            archive_stale: true,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_collaborators_are_classified() {
        let gateway = StubGateway {
            repositories: vec![repo("app", "2024-05-30T00:00:00Z", false)],
            ..StubGateway::default()
        };

        let orchestrator = AuditOrchestrator::new(&gateway, policy(), RunOptions::default());
        let (report, stats) = orchestrator.run_at(now()).await;

        assert_eq!(report.repositories.len(), 1);
        let audit = &report.repositories[0];
        assert_eq!(audit.collaborators[0].designation, Designation::ReadOnly);
        assert_eq!(audit.teams[0].name, "core");
        assert_eq!(stats.repositories_audited, 1);
        assert_eq!(stats.collaborators_classified, 1);
        assert!(report.stale.is_empty());
    }

    #[tokio::test]
    async fn test_failed_calls_degrade_to_empty() {
        let gateway = StubGateway {
            repositories: vec![repo("secret", "2024-05-30T00:00:00Z", false)],
            fail_members: true,
            ..StubGateway::default()
        };

        let orchestrator = AuditOrchestrator::new(&gateway, policy(), RunOptions::default());
        let (report, stats) = orchestrator.run_at(now()).await;

        assert!(report.members.is_empty());
        assert!(report.repositories[0].collaborators.is_empty());
        assert_eq!(report.repositories[0].teams.len(), 1);
        // not-found is treated as absent data, not a failed call
        assert_eq!(stats.failed_calls, 1);
    }

    #[tokio::test]
    async fn test_dry_run_skips_archival() {
        let gateway = StubGateway {
            repositories: vec![repo("legacy", "2023-01-01T00:00:00Z", false)],
            ..StubGateway::default()
        };

        let options = RunOptions {
            dry_run: true,
            ..RunOptions::default()
        };
        let orchestrator = AuditOrchestrator::new(&gateway, policy(), options);
        let report = orchestrator.run_stale_at(now()).await;

        assert_eq!(report.stale, vec!["legacy".to_string()]);
        assert_eq!(report.archive_outcomes, vec![ArchiveOutcome::skipped("legacy")]);
        assert!(gateway.archived.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_already_archived_repository_is_not_patched() {
        let gateway = StubGateway {
            repositories: vec![repo("frozen", "2023-01-01T00:00:00Z", true)],
            ..StubGateway::default()
        };

        let orchestrator = AuditOrchestrator::new(&gateway, policy(), RunOptions::default());
        let report = orchestrator.run_stale_at(now()).await;

        assert_eq!(report.archived_count(), 1);
        assert!(gateway.archived.lock().unwrap().is_empty());
    }
}
