// file: src/audit/stale.rs
// description: retention window checks over repository update timestamps
// reference: https://docs.rs/chrono

use crate::error::{AuditError, Result};
use crate::models::{Repository, TimestampFailure};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::{debug, warn};

const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// True iff `last_updated` is strictly earlier than `now - retention_days`.
///
/// A window whose cutoff falls outside the representable range never
/// makes anything stale.
pub fn is_stale(last_updated: DateTime<Utc>, now: DateTime<Utc>, retention_days: u32) -> bool {
    Duration::try_days(i64::from(retention_days))
        .and_then(|window| now.checked_sub_signed(window))
        .is_some_and(|cutoff| last_updated < cutoff)
}

/// Parse an API timestamp (`2024-01-31T12:00:00Z`). Full RFC 3339 with an
/// offset is accepted as well.
pub fn parse_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, API_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc)))
}

/// A missing or null `updated_at` is reported like an unparseable one.
pub fn last_updated(repository: &Repository) -> Result<DateTime<Utc>> {
    let Some(value) = repository.updated_at.as_deref() else {
        return Err(AuditError::Timestamp {
            repository: repository.name.clone(),
            value: String::new(),
            message: "updated_at is missing".to_string(),
        });
    };

    parse_timestamp(value).map_err(|e| AuditError::Timestamp {
        repository: repository.name.clone(),
        value: value.to_string(),
        message: e.to_string(),
    })
}

#[derive(Debug, Default)]
pub struct StaleScan<'a> {
    pub stale: Vec<&'a Repository>,
    pub failures: Vec<TimestampFailure>,
}

/// Apply [`is_stale`] across a batch, keeping the input order. Records whose
/// timestamp does not parse are excluded and reported in `failures`.
pub fn scan(repositories: &[Repository], now: DateTime<Utc>, retention_days: u32) -> StaleScan<'_> {
    let mut result = StaleScan::default();

    for repository in repositories {
        match last_updated(repository) {
            Ok(updated) if is_stale(updated, now, retention_days) => {
                debug!("{} last updated {} (stale)", repository.name, updated);
                result.stale.push(repository);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Skipping stale check: {}", e);
                if let AuditError::Timestamp {
                    repository,
                    value,
                    message,
                } = e
                {
                    result.failures.push(TimestampFailure {
                        repository,
                        value,
                        message,
                    });
                }
            }
        }
    }

    result
}
