//! Open-port collectors: `ss -tuln` on Linux, `netstat -an` on Windows.

use async_trait::async_trait;

use super::{probe_error, unsupported, Collector, CollectorContext};
use crate::error_handling::CollectorError;
use crate::models::{AuditDomain, CollectionResult, HostOs};
use crate::parse::ports::parse_port_lines;
use crate::probe::run_probe;

const EMPTY_NOTE: &str = "No port 22 or 3389 open";

pub(super) fn for_os(os: &HostOs) -> Result<Box<dyn Collector>, CollectorError> {
    match os {
        HostOs::Linux => Ok(Box::new(LinuxPortCollector)),
        HostOs::Windows => Ok(Box::new(WindowsPortCollector)),
        other => Err(unsupported(AuditDomain::Ports, other)),
    }
}

struct LinuxPortCollector;

#[async_trait]
impl Collector for LinuxPortCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Ports
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let output = run_probe(&["ss", "-tuln"], false, ctx.probe_timeout).await;
        if !output.succeeded() {
            let error = probe_error("ss", &output, ctx.probe_timeout);
            return CollectionResult::failure(self.domain(), &ctx.os, error);
        }
        let records = parse_port_lines(&output.lines);
        CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE)
    }
}

struct WindowsPortCollector;

#[async_trait]
impl Collector for WindowsPortCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Ports
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let output = run_probe(&["netstat", "-an"], false, ctx.probe_timeout).await;
        if !output.succeeded() {
            let error = probe_error("netstat", &output, ctx.probe_timeout);
            return CollectionResult::failure(self.domain(), &ctx.os, error);
        }
        let records = parse_port_lines(&output.lines);
        CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE)
    }
}
