//! Failed-login collectors: the auth log on Linux, the Security event log on
//! Windows.

use async_trait::async_trait;

use super::{probe_error, unsupported, Collector, CollectorContext};
use crate::config::AUTH_LOG_PATH;
use crate::error_handling::CollectorError;
use crate::models::{AuditDomain, CollectionResult, HostOs};
use crate::parse::logins::{parse_auth_log_lines, parse_security_events};
use crate::probe::run_probe;

const EMPTY_NOTE: &str = "no failed login attempts found";

// Pulls the 50 most recent 4625 (logon failure) events with their message
// bodies; ConvertTo-Json keeps the multi-line messages intact.
const EVENT_LOG_QUERY: &str = "Get-WinEvent -FilterHashtable @{LogName=\"Security\"; Id=4625} | \
     Select-Object -First 50 -Property @{Name=\"TimeCreated\";Expression={($_.TimeCreated).ToString(\"s\")}}, Message | \
     ConvertTo-Json -Depth 3";

pub(super) fn for_os(os: &HostOs) -> Result<Box<dyn Collector>, CollectorError> {
    match os {
        HostOs::Linux => Ok(Box::new(LinuxLoginCollector)),
        HostOs::Windows => Ok(Box::new(WindowsLoginCollector)),
        other => Err(unsupported(AuditDomain::Logins, other)),
    }
}

struct LinuxLoginCollector;

#[async_trait]
impl Collector for LinuxLoginCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Logins
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let read = tokio::time::timeout(
            ctx.probe_timeout,
            tokio::fs::read_to_string(AUTH_LOG_PATH),
        )
        .await;

        let contents = match read {
            Ok(Ok(contents)) => contents,
            Ok(Err(_)) => {
                let error = CollectorError::LogUnavailable {
                    path: AUTH_LOG_PATH.to_string(),
                };
                return CollectionResult::failure(self.domain(), &ctx.os, error);
            }
            Err(_) => {
                let error = CollectorError::ProbeTimeout {
                    tool: AUTH_LOG_PATH.to_string(),
                    seconds: ctx.probe_timeout.as_secs(),
                };
                return CollectionResult::failure(self.domain(), &ctx.os, error);
            }
        };

        let lines: Vec<String> = contents.lines().map(str::to_string).collect();
        let records = parse_auth_log_lines(&lines);
        CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE)
    }
}

struct WindowsLoginCollector;

#[async_trait]
impl Collector for WindowsLoginCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::Logins
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let output = run_probe(
            &["powershell", "-Command", EVENT_LOG_QUERY],
            false,
            ctx.probe_timeout,
        )
        .await;
        if !output.succeeded() {
            let error = probe_error("powershell", &output, ctx.probe_timeout);
            return CollectionResult::failure(self.domain(), &ctx.os, error);
        }
        if output.lines.is_empty() {
            let error = CollectorError::ProbeFailed("Unable to read Windows Event Logs".into());
            return CollectionResult::failure(self.domain(), &ctx.os, error);
        }

        match parse_security_events(&output.joined()) {
            Ok(records) => CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE),
            Err(error) => CollectionResult::failure(self.domain(), &ctx.os, error),
        }
    }
}
