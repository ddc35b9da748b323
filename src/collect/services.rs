//! Service status collector for the fixed Windows server set (AD DS, DNS,
//! DHCP). Windows-only; a failed query yields an explicit per-service error
//! string rather than aborting the batch.

use async_trait::async_trait;

use super::{unsupported, Collector, CollectorContext};
use crate::config::{SERVICE_RUNNING_CODE, WATCHED_SERVICES};
use crate::error_handling::CollectorError;
use crate::models::{AuditDomain, AuditRecord, CollectionResult, HostOs};
use crate::parse::services::parse_service_state;
use crate::probe::run_probe;

pub(super) fn for_os(os: &HostOs) -> Result<Box<dyn Collector>, CollectorError> {
    match os {
        HostOs::Windows => Ok(Box::new(WindowsServiceCollector)),
        other => Err(unsupported(AuditDomain::Services, other)),
    }
}

struct WindowsServiceCollector;

#[async_trait]
impl Collector for WindowsServiceCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Services
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let mut records = Vec::with_capacity(WATCHED_SERVICES.len());
        for &service in WATCHED_SERVICES {
            let output = run_probe(&["sc", "query", service], false, ctx.probe_timeout).await;
            let status = if output.succeeded() {
                match parse_service_state(&output.lines) {
                    Some(SERVICE_RUNNING_CODE) => "Running".to_string(),
                    _ => "Not Running".to_string(),
                }
            } else {
                format!("Error: {}", output.joined())
            };
            records.push(AuditRecord::ServiceState {
                service: service.to_string(),
                status,
            });
        }
        // The fixed service set means this result is never empty.
        CollectionResult::success(self.domain(), &ctx.os, records, "no services checked")
    }
}
