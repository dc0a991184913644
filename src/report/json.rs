// file: src/report/json.rs
// description: json export of a collected audit report

use crate::error::{AuditError, Result};
use crate::models::AuditReport;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedReport<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    #[serde(flatten)]
    pub report: &'a AuditReport,
}

impl JsonExporter {
    /// Creates the parent directory of `output_path` when it is missing.
    pub fn new(output_path: impl Into<PathBuf>) -> Result<Self> {
        let output_path = output_path.into();
        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| AuditError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Self { output_path })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, report: &AuditReport, pretty: bool) -> Result<()> {
        info!("Writing audit report to {}", self.output_path.display());

        let exported = ExportedReport {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            report,
        };

        let body = if pretty {
            serde_json::to_string_pretty(&exported)?
        } else {
            serde_json::to_string(&exported)?
        };

        fs::write(&self.output_path, body).map_err(|source| AuditError::FileOperation {
            path: self.output_path.clone(),
            source,
        })?;

        info!(
            "Export complete: {} repositories, {} stale",
            report.repositories.len(),
            report.stale.len()
        );
        Ok(())
    }
}
