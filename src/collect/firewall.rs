//! Firewall rule collectors.
//!
//! Linux prefers the rule-based frontend (ufw) over the packet-filter tool
//! (iptables) purely by presence; which one answered is recorded on every
//! rule via `firewall_type` so the report shows why the other was skipped.

use async_trait::async_trait;

use super::{probe_error, unsupported, Collector, CollectorContext};
use crate::error_handling::CollectorError;
use crate::models::{AuditDomain, CollectionResult, HostOs};
use crate::parse::firewall::{parse_rule_payload, wrap_rule_lines};
use crate::probe::run_probe;

const EMPTY_NOTE: &str = "no firewall rules reported";

const WINDOWS_FIREWALL: &str = "Windows Defender Firewall";

const FIREWALL_RULE_QUERY: &str = "Get-NetFirewallRule | \
     Select-Object DisplayName, Direction, Action, Enabled, Profile | ConvertTo-Json";

pub(super) fn for_os(os: &HostOs) -> Result<Box<dyn Collector>, CollectorError> {
    match os {
        HostOs::Linux => Ok(Box::new(LinuxFirewallCollector)),
        HostOs::Windows => Ok(Box::new(WindowsFirewallCollector)),
        other => Err(unsupported(AuditDomain::Firewall, other)),
    }
}

struct LinuxFirewallCollector;

#[async_trait]
impl Collector for LinuxFirewallCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Firewall
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let ufw_present = run_probe(&["which", "ufw"], false, ctx.probe_timeout)
            .await
            .succeeded();

        let (tool, command): (&str, &[&str]) = if ufw_present {
            ("ufw", &["ufw", "status", "numbered"])
        } else {
            ("iptables", &["iptables", "-S"])
        };

        let output = run_probe(command, false, ctx.probe_timeout).await;
        if !output.succeeded() {
            let error = probe_error(tool, &output, ctx.probe_timeout);
            return CollectionResult::failure(self.domain(), &ctx.os, error);
        }

        let firewall_type = if ufw_present { "UFW" } else { "iptables" };
        let records = wrap_rule_lines(firewall_type, &output.lines);
        CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE)
    }
}

struct WindowsFirewallCollector;

#[async_trait]
impl Collector for WindowsFirewallCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Firewall
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let output = run_probe(
            &["powershell", "-Command", FIREWALL_RULE_QUERY],
            false,
            ctx.probe_timeout,
        )
        .await;
        if !output.succeeded() {
            let error = probe_error("powershell", &output, ctx.probe_timeout);
            return CollectionResult::failure(self.domain(), &ctx.os, error);
        }

        match parse_rule_payload(WINDOWS_FIREWALL, &output.joined()) {
            Ok(records) => CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE),
            Err(error) => CollectionResult::failure(self.domain(), &ctx.os, error),
        }
    }
}
