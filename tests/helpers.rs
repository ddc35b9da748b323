// Shared test helpers for building sample reports and series entries.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use host_audit::report::series::SeriesEntry;
use host_audit::{AuditDomain, AuditRecord, AuditReport, CollectionResult, Exposure};

/// Builds a small but representative audit report: one domain with records,
/// one degraded domain, one clean-but-empty domain.
#[allow(dead_code)] // Used by other test files
pub fn sample_report() -> AuditReport {
    AuditReport {
        timestamp: chrono::Utc::now(),
        hostname: "test-host".to_string(),
        os: "Linux".to_string(),
        results: vec![
            CollectionResult {
                domain: AuditDomain::Ports,
                os: "Linux".to_string(),
                records: vec![AuditRecord::PortBinding {
                    protocol: "tcp".to_string(),
                    port: 22,
                    bind: "0.0.0.0".to_string(),
                    exposure: Exposure::Public,
                }],
                error: None,
                note: None,
            },
            CollectionResult {
                domain: AuditDomain::Firewall,
                os: "Linux".to_string(),
                records: Vec::new(),
                error: Some("iptables not found".to_string()),
                note: None,
            },
            CollectionResult {
                domain: AuditDomain::Logins,
                os: "Linux".to_string(),
                records: Vec::new(),
                error: None,
                note: Some("no failed login attempts found".to_string()),
            },
        ],
    }
}

/// Builds one weather-style polling snapshot.
#[allow(dead_code)] // Used by other test files
pub fn sample_entry(reading: i64) -> SeriesEntry {
    SeriesEntry::now(
        serde_json::json!({ "name": "Tokyo", "latitude": 35.652832, "longitude": 139.839478 }),
        serde_json::json!({ "temperature": reading }),
    )
}
