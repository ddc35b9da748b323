//! Installed-software collectors: dpkg on Linux, the uninstall registry on
//! Windows. Only the probes' output contract matters here; the enumeration
//! itself belongs to the host.

use async_trait::async_trait;

use super::{probe_error, unsupported, Collector, CollectorContext};
use crate::error_handling::CollectorError;
use crate::models::{AuditDomain, CollectionResult, HostOs};
use crate::parse::software::{parse_dpkg_lines, parse_registry_payload};
use crate::probe::run_probe;

const EMPTY_NOTE: &str = "no installed software found";

// System-wide (both registry views) plus per-user uninstall entries, shaped
// into the {DisplayName, DisplayVersion} contract the parser expects.
const REGISTRY_QUERY: &str = "Get-ItemProperty \
     HKLM:\\Software\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\*, \
     HKLM:\\Software\\WOW6432Node\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\*, \
     HKCU:\\Software\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\* \
     -ErrorAction SilentlyContinue | \
     Select-Object DisplayName, DisplayVersion | ConvertTo-Json";

pub(super) fn for_os(os: &HostOs) -> Result<Box<dyn Collector>, CollectorError> {
    match os {
        HostOs::Linux => Ok(Box::new(LinuxSoftwareCollector)),
        HostOs::Windows => Ok(Box::new(WindowsSoftwareCollector)),
        other => Err(unsupported(AuditDomain::Software, other)),
    }
}

struct LinuxSoftwareCollector;

#[async_trait]
impl Collector for LinuxSoftwareCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Software
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let output = run_probe(
            &["dpkg-query", "-W", "-f", "${binary:Package}\\t${Version}\\n"],
            false,
            ctx.probe_timeout,
        )
        .await;
        if !output.succeeded() {
            let error = probe_error("dpkg-query", &output, ctx.probe_timeout);
            return CollectionResult::failure(self.domain(), &ctx.os, error);
        }
        let records = parse_dpkg_lines(&output.lines);
        CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE)
    }
}

struct WindowsSoftwareCollector;

#[async_trait]
impl Collector for WindowsSoftwareCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Software
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let output = run_probe(
            &["powershell", "-Command", REGISTRY_QUERY],
            false,
            ctx.probe_timeout,
        )
        .await;
        if !output.succeeded() {
            let error = probe_error("powershell", &output, ctx.probe_timeout);
            return CollectionResult::failure(self.domain(), &ctx.os, error);
        }

        match parse_registry_payload(&output.joined()) {
            Ok(records) => CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE),
            Err(error) => CollectionResult::failure(self.domain(), &ctx.os, error),
        }
    }
}
