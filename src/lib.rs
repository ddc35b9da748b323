//! host_audit library: cross-platform host security auditing
//!
//! This library runs a set of independent audit collectors (open ports,
//! failed logins, firewall rules, installed software, SSH keys, service
//! status) against the current host, normalizes their heterogeneous probe
//! output into one stable schema, and persists a timestamped JSON report.
//! One collector's failure never aborts the others; every requested domain
//! always appears in the report, either with records or with the reason it
//! could not be checked.
//!
//! # Example
//!
//! ```no_run
//! use host_audit::{run_audit, AuditDomain, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domains: vec![AuditDomain::Ports, AuditDomain::Firewall],
//!     timeout_seconds: 5,
//!     ..Default::default()
//! };
//!
//! let summary = run_audit(config).await?;
//! println!(
//!     "{} domains audited, {} degraded",
//!     summary.domains_run, summary.failed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod collect;
pub mod config;
mod dispatcher;
mod error_handling;
pub mod initialization;
mod models;
mod parse;
mod probe;
pub mod report;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{CollectorError, ReportError};
pub use models::{
    AuditDomain, AuditRecord, AuditReport, CollectionResult, Exposure, HostOs,
};
pub use run::{run_audit, AuditSummary};

// Internal run module (contains the main audit logic)
mod run {
    use std::path::PathBuf;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use chrono::Utc;
    use log::{info, warn};

    use crate::collect::CollectorContext;
    use crate::config::{Config, DOMAIN_PROBE_BUDGET_FACTOR};
    use crate::dispatcher::collect_all;
    use crate::models::{AuditDomain, AuditReport, HostOs};
    use crate::report;

    /// Results of one audit run.
    ///
    /// Contains summary statistics and metadata about the completed audit.
    #[derive(Debug, Clone)]
    pub struct AuditSummary {
        /// Number of domains that were audited
        pub domains_run: usize,
        /// Number of domains that produced a result without error
        pub succeeded: usize,
        /// Number of domains that degraded to an error result
        pub failed: usize,
        /// Path the snapshot report was written to
        pub report_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a host audit with the provided configuration.
    ///
    /// This is the main entry point for the library. It detects the host OS,
    /// runs the requested collectors concurrently, and persists the merged
    /// report.
    ///
    /// # Errors
    ///
    /// A degraded domain is not an error here; it is recorded inside the
    /// report. This function only fails when the report itself cannot be
    /// persisted, since an audit that cannot be recorded has no value.
    pub async fn run_audit(config: Config) -> Result<AuditSummary> {
        let start_time = std::time::Instant::now();

        let os = HostOs::detect();
        let hostname = sys_info::hostname().unwrap_or_else(|_| "unknown".to_string());
        info!("starting host audit on {hostname} ({os})");

        let domains = requested_domains(&config);
        let probe_timeout = Duration::from_secs(config.timeout_seconds);
        let domain_budget = probe_timeout * DOMAIN_PROBE_BUDGET_FACTOR;
        let ctx = CollectorContext {
            os: os.clone(),
            probe_timeout,
        };

        let results = collect_all(&domains, &ctx, domain_budget).await;

        let failed = results.iter().filter(|r| r.is_error()).count();
        let succeeded = results.len() - failed;
        for result in &results {
            if let Some(error) = &result.error {
                warn!("{} audit degraded: {error}", result.domain);
            }
        }

        let report = AuditReport {
            timestamp: Utc::now(),
            hostname,
            os: os.name().to_string(),
            results,
        };
        report::write_snapshot(&config.report_path, &report).with_context(|| {
            format!(
                "failed to persist audit report to {}",
                config.report_path.display()
            )
        })?;
        info!("audit report written to {}", config.report_path.display());

        Ok(AuditSummary {
            domains_run: domains.len(),
            succeeded,
            failed,
            report_path: config.report_path,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    // An empty selection means "audit everything"; duplicates are collapsed
    // while preserving the first occurrence's position.
    fn requested_domains(config: &Config) -> Vec<AuditDomain> {
        if config.domains.is_empty() {
            return AuditDomain::all();
        }
        let mut domains: Vec<AuditDomain> = Vec::with_capacity(config.domains.len());
        for &domain in &config.domains {
            if !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        domains
    }

}
