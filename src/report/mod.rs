//! Report persistence.
//!
//! Snapshot-style audits replace the previous report whole; the polling-style
//! series appends entries to a growing JSON array. Both write through a temp
//! file and rename, so a crash mid-write never truncates what was already
//! committed.

pub mod series;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error_handling::ReportError;
use crate::models::AuditReport;

/// Writes the audit report as pretty-printed JSON, replacing any prior
/// report at `path` atomically.
pub fn write_snapshot(path: &Path, report: &AuditReport) -> Result<(), ReportError> {
    let payload = serde_json::to_vec_pretty(report)?;
    write_atomic(path, &payload)
}

/// Reads back a snapshot report. Mostly useful for consumers and tests;
/// the auditing run itself never reads its own output.
pub fn read_snapshot(path: &Path) -> Result<AuditReport, ReportError> {
    let contents = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

pub(crate) fn write_atomic(path: &Path, payload: &[u8]) -> Result<(), ReportError> {
    let tmp = temp_sibling(path);
    fs::write(&tmp, payload).map_err(|source| ReportError::Io {
        path: tmp.display().to_string(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

// The temp file must live on the same filesystem as the target for the
// rename to be atomic, so it goes next to the target rather than in /tmp.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "report.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
