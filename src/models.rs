//! Core data model: tagged audit records, per-domain results, and the report envelope.
//!
//! Every collector normalizes its probe output into [`AuditRecord`] variants so a
//! report consumer can deserialize without guessing shape from field presence.

use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// An audit category. Each domain pairs one probe invocation with one parser.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum AuditDomain {
    /// Listening sockets on the watched ports (22, 3389).
    Ports,
    /// Failed login attempts from the auth log or Security event log.
    Logins,
    /// Firewall rules (Windows Defender, ufw, or iptables).
    Firewall,
    /// Installed software inventory.
    Software,
    /// Per-user authorized SSH public keys.
    SshKeys,
    /// Status of a fixed set of Windows server services.
    Services,
}

impl AuditDomain {
    /// Returns the wire name of the domain, as it appears in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditDomain::Ports => "ports",
            AuditDomain::Logins => "logins",
            AuditDomain::Firewall => "firewall",
            AuditDomain::Software => "software",
            AuditDomain::SshKeys => "ssh-keys",
            AuditDomain::Services => "services",
        }
    }

    /// All domains, in report order.
    pub fn all() -> Vec<AuditDomain> {
        AuditDomain::iter().collect()
    }
}

impl fmt::Display for AuditDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The host operating system, detected once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOs {
    /// A Linux host.
    Linux,
    /// A Windows host.
    Windows,
    /// Any other platform; collectors report it as unsupported by name.
    Other(String),
}

impl HostOs {
    /// Detects the operating system the process is running on.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "linux" => HostOs::Linux,
            "windows" => HostOs::Windows,
            other => HostOs::Other(other.to_string()),
        }
    }

    /// Returns the OS name used in reports.
    pub fn name(&self) -> &str {
        match self {
            HostOs::Linux => "Linux",
            HostOs::Windows => "Windows",
            HostOs::Other(name) => name,
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a listening port is reachable from any interface or only a specific one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exposure {
    /// Bound to a wildcard address (`0.0.0.0` or `::`).
    Public,
    /// Bound to loopback or a specific interface.
    Private,
}

impl Exposure {
    /// Classifies a bind address string.
    pub fn from_bind_addr(bind: &str) -> Self {
        if bind == "0.0.0.0" || bind == "::" {
            Exposure::Public
        } else {
            Exposure::Private
        }
    }
}

/// One normalized fact produced by a parser, tagged by variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditRecord {
    /// A socket listening on one of the watched ports.
    PortBinding {
        /// Transport protocol as reported by the tool (e.g. `tcp`).
        protocol: String,
        /// The listening port.
        port: u16,
        /// The bind address the socket is attached to.
        bind: String,
        /// Wildcard binds are public, everything else private.
        exposure: Exposure,
    },
    /// One failed login attempt.
    LoginAttempt {
        /// Timestamp in the log's native format; not re-parsed.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        timestamp: Option<String>,
        /// The account the attempt targeted.
        username: String,
        /// Source IP (Linux) or the event log name (Windows).
        source: String,
    },
    /// One firewall rule, kept in the producing tool's own format.
    FirewallRule {
        /// Which firewall produced the rule (`Windows Defender Firewall`, `UFW`, `iptables`).
        firewall_type: String,
        /// Rule object (Windows) or opaque rule line (Linux).
        rule: serde_json::Value,
    },
    /// One installed software package.
    SoftwareEntry {
        /// Package or display name.
        name: String,
        /// Package or display version.
        version: String,
    },
    /// The authorized_keys audit for one user.
    SshKeyEntry {
        /// Account name (home directory owner).
        username: String,
        /// Home directory the key file was found under.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        home: Option<String>,
        /// Number of public keys in the file.
        authorized_keys_count: usize,
        /// Last-modified time of the key file, RFC 3339.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        last_modified: Option<String>,
        /// The raw public key lines.
        keys: Vec<String>,
        /// Set when this user's key file could not be read; other users are unaffected.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        error: Option<String>,
    },
    /// The queried status of one named service.
    ServiceState {
        /// Service name as known to the service manager.
        service: String,
        /// `Running`, `Not Running`, or `Error: <reason>` when the query failed.
        status: String,
    },
}

/// The outcome of one collector run for one domain.
///
/// Invariant: `error` and non-empty `records` are mutually exclusive, and `note`
/// is only present when `records` is empty and no error occurred. A consumer can
/// therefore distinguish "checked, clean", "checked, found issues", and "could
/// not check, here's why".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResult {
    /// The audit domain this result belongs to.
    pub domain: AuditDomain,
    /// OS name the collector ran on.
    pub os: String,
    /// Normalized records; empty when `error` is set.
    pub records: Vec<AuditRecord>,
    /// Why the domain could not be collected, if it could not.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    /// Human-readable "ran, found nothing" marker.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
}

impl CollectionResult {
    /// Builds a successful result. When `records` is empty, `empty_note` is
    /// attached so the result is never ambiguous between "not run" and "ran,
    /// found nothing".
    pub fn success(
        domain: AuditDomain,
        os: &HostOs,
        records: Vec<AuditRecord>,
        empty_note: &str,
    ) -> Self {
        let note = records.is_empty().then(|| empty_note.to_string());
        Self {
            domain,
            os: os.name().to_string(),
            records,
            error: None,
            note,
        }
    }

    /// Builds a degraded result carrying only the failure reason.
    pub fn failure(domain: AuditDomain, os: &HostOs, error: impl fmt::Display) -> Self {
        Self {
            domain,
            os: os.name().to_string(),
            records: Vec::new(),
            error: Some(error.to_string()),
            note: None,
        }
    }

    /// True when the domain degraded to an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The top-level persisted document for one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// When the run started, UTC.
    pub timestamp: DateTime<Utc>,
    /// Host name of the audited machine.
    pub hostname: String,
    /// Detected operating system.
    pub os: String,
    /// One result per requested domain, in request order.
    pub results: Vec<CollectionResult>,
}
