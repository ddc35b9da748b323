//! Error type definitions.
//!
//! This module defines the failure taxonomy used throughout the application.
//! Collector failures degrade a single domain's result and never abort the
//! run; report failures are fatal, since an audit that cannot be recorded has
//! no value.

use thiserror::Error;

use crate::models::AuditDomain;

/// Failures that degrade one domain's result to an error.
///
/// The rendered message lands in `CollectionResult::error`, so every variant's
/// display text is written for a report consumer, not a developer.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// The probe binary is not on PATH.
    #[error("{tool} not found")]
    ProbeUnavailable {
        /// Executable the collector tried to run.
        tool: String,
    },

    /// The probe exceeded its time budget.
    #[error("{tool} timed out after {seconds}s")]
    ProbeTimeout {
        /// Executable or file the collector was waiting on.
        tool: String,
        /// The budget that was exceeded.
        seconds: u64,
    },

    /// The whole domain exceeded its overall time budget.
    #[error("{domain} collection timed out after {seconds}s")]
    DomainTimeout {
        /// Domain that stalled.
        domain: AuditDomain,
        /// The budget that was exceeded.
        seconds: u64,
    },

    /// The probe ran but exited non-zero.
    #[error("probe failed: {0}")]
    ProbeFailed(String),

    /// A structured payload (JSON) was invalid as a whole. Not line-recoverable.
    #[error("failed to parse {payload} output: {message}")]
    PayloadParse {
        /// What produced the payload (e.g. `PowerShell JSON`).
        payload: String,
        /// The underlying parse error.
        message: String,
    },

    /// A log file or directory the collector reads is missing or unreadable.
    #[error("{path} not found or inaccessible")]
    LogUnavailable {
        /// The path that could not be read.
        path: String,
    },

    /// No collector implementation exists for this domain on the current OS.
    #[error("unsupported OS for {domain} audit: {os}")]
    UnsupportedPlatform {
        /// Domain that has no implementation.
        domain: AuditDomain,
        /// The detected platform name.
        os: String,
    },
}

/// Error types for report persistence.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Filesystem write or rename failure.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Report could not be serialized to JSON.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_unavailable_names_the_tool() {
        let err = CollectorError::ProbeUnavailable {
            tool: "iptables".into(),
        };
        assert_eq!(err.to_string(), "iptables not found");
    }

    #[test]
    fn unsupported_platform_names_the_os() {
        let err = CollectorError::UnsupportedPlatform {
            domain: AuditDomain::Services,
            os: "Linux".into(),
        };
        assert_eq!(err.to_string(), "unsupported OS for services audit: Linux");
    }

    #[test]
    fn timeout_messages_carry_the_budget() {
        let err = CollectorError::ProbeTimeout {
            tool: "ss".into(),
            seconds: 10,
        };
        assert_eq!(err.to_string(), "ss timed out after 10s");

        let err = CollectorError::DomainTimeout {
            domain: AuditDomain::Ports,
            seconds: 40,
        };
        assert_eq!(err.to_string(), "ports collection timed out after 40s");
    }

    #[test]
    fn log_unavailable_matches_report_wording() {
        let err = CollectorError::LogUnavailable {
            path: "/var/log/auth.log".into(),
        };
        assert_eq!(
            err.to_string(),
            "/var/log/auth.log not found or inaccessible"
        );
    }
}
