//! Per-domain collectors.
//!
//! Each domain has one capability interface implementation per supported OS,
//! selected once at dispatch time, so OS-detection logic never leaks into the
//! parsers. A collector pairs exactly one probe invocation (a command, a log
//! read, or a directory scan) with one parser and owns its domain's
//! partial-failure policy.

mod firewall;
mod logins;
mod ports;
mod services;
mod software;
mod ssh_keys;

use std::time::Duration;

use async_trait::async_trait;

use crate::error_handling::CollectorError;
use crate::models::{AuditDomain, CollectionResult, HostOs};
use crate::probe::{ProbeOutput, EXIT_TIMED_OUT, EXIT_UNAVAILABLE};

/// Shared collector inputs: the detected OS and the per-probe time budget.
#[derive(Debug, Clone)]
pub struct CollectorContext {
    /// Operating system detected at dispatch time.
    pub os: HostOs,
    /// Budget for each individual probe invocation or file read.
    pub probe_timeout: Duration,
}

/// One audit domain's collection capability.
#[async_trait]
pub trait Collector: Send + Sync {
    /// The domain this collector reports under.
    fn domain(&self) -> AuditDomain;

    /// Runs the probe, parses its output, and returns the domain's result.
    /// Never panics and never returns a partially-valid, partially-errored
    /// result.
    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult;
}

impl std::fmt::Debug for dyn Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("domain", &self.domain())
            .finish()
    }
}

/// Selects the collector implementation for a domain on the given OS.
///
/// Returns `UnsupportedPlatform` when the domain has no implementation there;
/// the dispatcher turns that into an explicit error result rather than a
/// silent no-op.
pub fn collector_for(
    domain: AuditDomain,
    os: &HostOs,
) -> Result<Box<dyn Collector>, CollectorError> {
    match domain {
        AuditDomain::Ports => ports::for_os(os),
        AuditDomain::Logins => logins::for_os(os),
        AuditDomain::Firewall => firewall::for_os(os),
        AuditDomain::Software => software::for_os(os),
        AuditDomain::SshKeys => ssh_keys::for_os(os),
        AuditDomain::Services => services::for_os(os),
    }
}

fn unsupported(domain: AuditDomain, os: &HostOs) -> CollectorError {
    CollectorError::UnsupportedPlatform {
        domain,
        os: os.name().to_string(),
    }
}

/// Maps a failed probe capture onto the error taxonomy.
fn probe_error(tool: &str, output: &ProbeOutput, time_limit: Duration) -> CollectorError {
    match output.exit_code {
        EXIT_UNAVAILABLE => CollectorError::ProbeUnavailable {
            tool: tool.to_string(),
        },
        EXIT_TIMED_OUT => CollectorError::ProbeTimeout {
            tool: tool.to_string(),
            seconds: time_limit.as_secs(),
        },
        _ => CollectorError::ProbeFailed(output.joined()),
    }
}
