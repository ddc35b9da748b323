//! Firewall rule normalization.
//!
//! The Windows path gets pre-shaped rule objects from PowerShell and passes
//! them through with a `firewall_type` tag. The Linux path treats the chosen
//! tool's text lines as opaque strings; the frontend's own format is the wire
//! format persisted.

use serde_json::Value;

use crate::error_handling::CollectorError;
use crate::models::AuditRecord;

/// Wraps pre-formatted rule lines as opaque tagged records.
pub fn wrap_rule_lines(firewall_type: &str, lines: &[String]) -> Vec<AuditRecord> {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| AuditRecord::FirewallRule {
            firewall_type: firewall_type.to_string(),
            rule: Value::String(line.clone()),
        })
        .collect()
}

/// Parses a `Get-NetFirewallRule ... | ConvertTo-Json` payload into tagged
/// rule records. A single rule comes back as one object, several as an array.
pub fn parse_rule_payload(
    firewall_type: &str,
    payload: &str,
) -> Result<Vec<AuditRecord>, CollectorError> {
    let parsed: Value = serde_json::from_str(payload).map_err(|e| CollectorError::PayloadParse {
        payload: "PowerShell firewall".to_string(),
        message: e.to_string(),
    })?;

    let rules = match parsed {
        Value::Array(rules) => rules,
        single @ Value::Object(_) => vec![single],
        other => {
            return Err(CollectorError::PayloadParse {
                payload: "PowerShell firewall".to_string(),
                message: format!("expected object or array, got {other}"),
            })
        }
    };

    Ok(rules
        .into_iter()
        .map(|rule| AuditRecord::FirewallRule {
            firewall_type: firewall_type.to_string(),
            rule,
        })
        .collect())
}
