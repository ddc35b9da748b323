//! Append-mode series persistence for polling-style snapshots.
//!
//! A series file is a JSON array of entries, one per poll. Appending is a
//! read-modify-write through the atomic snapshot machinery; a corrupt or
//! empty existing file resets to an empty series instead of failing the run,
//! so the next successful poll starts a fresh single-element series. Only a
//! file that was actually read back is ever reset: a read error other than
//! not-found propagates, never rewriting entries that may still be intact on
//! disk.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error_handling::ReportError;

/// One polling snapshot in a series file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// When the snapshot was taken, UTC.
    pub timestamp: DateTime<Utc>,
    /// Where the data was sampled (free-form, collaborator-defined).
    pub location: Value,
    /// The sampled data itself.
    pub data: Value,
}

impl SeriesEntry {
    /// Builds an entry stamped with the current time.
    pub fn now(location: Value, data: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            location,
            data,
        }
    }
}

/// Loads the committed entries from a series file.
///
/// A missing file is an empty series; a file that reads back as invalid JSON
/// is reset to an empty series with a warning. Any other read failure
/// (permissions, I/O, undecodable bytes) is an error: the file may still hold
/// committed entries, so it must not be treated as empty.
pub fn load_entries(path: &Path) -> Result<Vec<SeriesEntry>, ReportError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(read_err) if read_err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Vec::new());
        }
        Err(read_err) => {
            warn!("series file {} could not be read: {read_err}", path.display());
            return Err(ReportError::Io {
                path: path.display().to_string(),
                source: read_err,
            });
        }
    };
    match serde_json::from_str(&contents) {
        Ok(entries) => Ok(entries),
        Err(parse_err) => {
            warn!(
                "series file {} is corrupt ({parse_err}); resetting to an empty series",
                path.display()
            );
            Ok(Vec::new())
        }
    }
}

/// Appends one entry to the series and commits the whole array atomically.
///
/// Returns the number of entries now committed. An unreadable existing file
/// fails the append rather than overwriting whatever is on disk.
pub fn append_entry(path: &Path, entry: SeriesEntry) -> Result<usize, ReportError> {
    let mut entries = load_entries(path)?;
    entries.push(entry);
    let payload = serde_json::to_vec_pretty(&entries)?;
    super::write_atomic(path, &payload)?;
    Ok(entries.len())
}
