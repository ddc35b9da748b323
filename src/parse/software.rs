//! Installed-software parsing for dpkg output and the Windows registry payload.

use serde_json::Value;

use crate::error_handling::CollectorError;
use crate::models::AuditRecord;

/// Parses `dpkg-query -W -f '${binary:Package}\t${Version}\n'` lines.
///
/// A line without exactly one tab-separated name/version pair is skipped;
/// a single malformed entry never discards the rest of the inventory.
pub fn parse_dpkg_lines(lines: &[String]) -> Vec<AuditRecord> {
    lines
        .iter()
        .filter_map(|line| {
            let (name, version) = line.split_once('\t')?;
            if name.is_empty() || version.is_empty() || version.contains('\t') {
                return None;
            }
            Some(AuditRecord::SoftwareEntry {
                name: name.to_string(),
                version: version.to_string(),
            })
        })
        .collect()
}

/// Parses the uninstall-registry enumeration PowerShell renders as JSON.
///
/// Entries missing either `DisplayName` or `DisplayVersion` are skipped one
/// at a time, mirroring how registry subkeys without those values are
/// ignored rather than failing the whole scan.
pub fn parse_registry_payload(payload: &str) -> Result<Vec<AuditRecord>, CollectorError> {
    let parsed: Value = serde_json::from_str(payload).map_err(|e| CollectorError::PayloadParse {
        payload: "PowerShell registry".to_string(),
        message: e.to_string(),
    })?;

    let entries = match parsed {
        Value::Array(entries) => entries,
        single @ Value::Object(_) => vec![single],
        other => {
            return Err(CollectorError::PayloadParse {
                payload: "PowerShell registry".to_string(),
                message: format!("expected object or array, got {other}"),
            })
        }
    };

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("DisplayName").and_then(Value::as_str)?;
            let version = entry.get("DisplayVersion").and_then(Value::as_str)?;
            Some(AuditRecord::SoftwareEntry {
                name: name.to_string(),
                version: version.to_string(),
            })
        })
        .collect())
}
