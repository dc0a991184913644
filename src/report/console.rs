// file: src/report/console.rs
// description: console rendering of a collected audit report
// reference: https://docs.rs/colored

use crate::audit::progress::AuditStats;
use crate::models::{ArchiveStatus, AuditReport, RepositoryAudit};
use crate::report::table::Table;
use crate::utils::logging::{format_error, format_info, format_success, format_warning};
use colored::Colorize;
use std::fmt::Write;

const SECTION_RULE: &str = "*************************************************************";
const BLOCK_RULE: &str = "###########################################################";

pub struct ConsoleReporter {
    colored: bool,
}

impl ConsoleReporter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn print(&self, report: &AuditReport) {
        print!("{}", self.render(report));
    }

    pub fn print_stale(&self, report: &AuditReport) {
        print!("{}", self.render_stale(report));
    }

    /// Full report: totals, one block per repository, then the stale summary.
    pub fn render(&self, report: &AuditReport) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Organization: {}", self.heading(&report.organization));
        let _ = writeln!(out, "Total repositories: {}", report.repositories.len());
        let _ = writeln!(out, "Total organization members: {}", report.members.len());

        for audit in &report.repositories {
            out.push_str(&self.render_repository(audit, report));
        }

        let _ = writeln!(out, "{}", BLOCK_RULE);
        out.push_str(&self.render_stale(report));
        out
    }

    fn render_repository(&self, audit: &RepositoryAudit, report: &AuditReport) -> String {
        let mut out = String::new();
        let repository = &audit.repository;

        let _ = writeln!(out, "{}", SECTION_RULE);
        let _ = writeln!(out, "Repository: {}", self.heading(&repository.name));
        let _ = writeln!(out, "  - Type: {}", repository.visibility());
        let _ = writeln!(out, "{}", BLOCK_RULE);
        let _ = writeln!(out, "  - Collaborators:");
        let _ = writeln!(out, "{}", BLOCK_RULE);

        let mut table = Table::new(["Collaborator", "Permissions", "Designation"]);
        for entry in &audit.collaborators {
            table.add_row(vec![
                entry.collaborator.login.clone(),
                entry.collaborator.permissions.to_string(),
                entry.designation.to_string(),
            ]);
        }
        out.push_str(&table.render());

        let _ = writeln!(out, "  - Teams:");
        if audit.teams.is_empty() {
            let _ = writeln!(out, "    (none)");
        }
        for team in &audit.teams {
            let _ = writeln!(out, "    - {} (Permission: {})", team.name, team.permission);
        }

        let _ = writeln!(out, "{}", BLOCK_RULE);
        let _ = writeln!(out, "  - Organization Members:");
        for member in &report.members {
            let _ = writeln!(out, "    - {}", member.login);
        }

        out
    }

    /// Stale count, unparseable timestamps and per-repository archive outcomes.
    pub fn render_stale(&self, report: &AuditReport) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Stale repositories (no update in {} days): {}",
            report.retention_days,
            report.stale.len()
        );

        for failure in &report.timestamp_failures {
            let _ = writeln!(
                out,
                "{}",
                self.warning(&format!(
                    "Skipped {}: bad updated_at {:?} ({})",
                    failure.repository, failure.value, failure.message
                ))
            );
        }

        if report.stale.is_empty() {
            let _ = writeln!(out, "{}", self.info("No stale repositories to archive."));
            return out;
        }

        for outcome in &report.archive_outcomes {
            let line = match &outcome.status {
                ArchiveStatus::Archived => {
                    self.success(&format!("Successfully archived repository: {}", outcome.repository))
                }
                ArchiveStatus::Failed { reason } => self.error(&format!(
                    "Failed to archive repository: {} ({})",
                    outcome.repository, reason
                )),
                ArchiveStatus::Skipped => self.info(&format!(
                    "Would archive repository: {} (archival disabled)",
                    outcome.repository
                )),
            };
            let _ = writeln!(out, "{}", line);
        }

        out
    }

    pub fn render_stats(&self, stats: &AuditStats) -> String {
        format!(
            "Audited {} repositories, {} collaborators in {}s ({:.2} repos/sec, {} failed calls)\n",
            stats.repositories_audited,
            stats.collaborators_classified,
            stats.duration_secs,
            stats.repositories_per_second(),
            stats.failed_calls
        )
    }

    fn heading(&self, text: &str) -> String {
        if self.colored {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&self, msg: &str) -> String {
        if self.colored {
            format_success(msg)
        } else {
            format!("OK {}", msg)
        }
    }

    fn error(&self, msg: &str) -> String {
        if self.colored {
            format_error(msg)
        } else {
            format!("FAILED {}", msg)
        }
    }

    fn warning(&self, msg: &str) -> String {
        if self.colored {
            format_warning(msg)
        } else {
            format!("WARN {}", msg)
        }
    }

    fn info(&self, msg: &str) -> String {
        if self.colored {
            format_info(msg)
        } else {
            msg.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ArchiveOutcome, CapabilityMap, ClassifiedCollaborator, Collaborator, Designation, Member,
        Repository, TeamGrant, TimestampFailure,
    };
    use chrono::{TimeZone, Utc};

    fn report() -> AuditReport {
        AuditReport {
            organization: "acme".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            retention_days: 90,
            repositories: vec![RepositoryAudit {
                repository: Repository {
                    id: 1,
                    name: "api".to_string(),
                    private: true,
                    updated_at: Some("2024-05-01T00:00:00Z".to_string()),
                    url: "https://api.github.com/repos/acme/api".to_string(),
                    archived: false,
                },
                collaborators: vec![ClassifiedCollaborator {
                    collaborator: Collaborator {
                        login: "octocat".to_string(),
                        permissions: CapabilityMap::new().with("pull", true).with("push", false),
                    },
                    designation: Designation::ReadOnly,
                }],
                teams: vec![TeamGrant {
                    name: "platform".to_string(),
                    permission: "maintain".to_string(),
                }],
            }],
            members: vec![Member {
                login: "octocat".to_string(),
            }],
            stale: vec!["legacy".to_string(), "old-site".to_string()],
            timestamp_failures: vec![TimestampFailure {
                repository: "weird".to_string(),
                value: "yesterday".to_string(),
                message: "input contains invalid characters".to_string(),
            }],
            archive_outcomes: vec![
                ArchiveOutcome::archived("legacy"),
                ArchiveOutcome::failed("old-site", "status 403"),
            ],
        }
    }

    #[test]
    fn test_render_repository_block() {
        let out = ConsoleReporter::new(false).render(&report());

        assert!(out.contains("Total repositories: 1"));
        assert!(out.contains("Total organization members: 1"));
        assert!(out.contains("Repository: api"));
        assert!(out.contains("  - Type: Private"));
        assert!(out.contains("| octocat      | {pull: true, push: false} | read only   |"));
        assert!(out.contains("    - platform (Permission: maintain)"));
        assert!(out.contains("  - Organization Members:\n    - octocat\n"));
    }

    #[test]
    fn test_render_stale_outcomes() {
        let out = ConsoleReporter::new(false).render_stale(&report());

        assert!(out.contains("Stale repositories (no update in 90 days): 2"));
        assert!(out.contains("OK Successfully archived repository: legacy"));
        assert!(out.contains("FAILED Failed to archive repository: old-site (status 403)"));
        assert!(out.contains("WARN Skipped weird"));
    }

    #[test]
    fn test_render_without_stale_repositories() {
        let mut report = report();
        report.stale.clear();
        report.archive_outcomes.clear();
        report.timestamp_failures.clear();

        let out = ConsoleReporter::new(false).render_stale(&report);
        assert!(out.contains("No stale repositories to archive."));
    }
}
