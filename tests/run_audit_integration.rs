// End-to-end audit run: every requested domain appears in the report, in
// request order, with the result-shape invariants intact. These tests run the
// real collectors against whatever the host provides, so they assert on
// structure rather than on record contents.

mod helpers;

use host_audit::report::read_snapshot;
use host_audit::{run_audit, AuditDomain, Config};

#[tokio::test]
async fn full_audit_always_produces_a_complete_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report_path = dir.path().join("report.json");

    let config = Config {
        report_path: report_path.clone(),
        timeout_seconds: 5,
        ..Default::default()
    };

    // Degraded domains are part of a normal run; only persistence can fail.
    let summary = run_audit(config).await.expect("audit run");
    assert_eq!(summary.domains_run, AuditDomain::all().len());
    assert_eq!(summary.succeeded + summary.failed, summary.domains_run);
    assert_eq!(summary.report_path, report_path);

    let report = read_snapshot(&report_path).expect("report is readable");
    assert!(!report.hostname.is_empty());
    assert_eq!(report.results.len(), AuditDomain::all().len());

    // Results come back in request order.
    let domains: Vec<AuditDomain> = report.results.iter().map(|r| r.domain).collect();
    assert_eq!(domains, AuditDomain::all());

    for result in &report.results {
        if result.error.is_some() {
            assert!(
                result.records.is_empty(),
                "{} carries records alongside an error",
                result.domain
            );
            assert!(
                result.note.is_none(),
                "{} carries a note alongside an error",
                result.domain
            );
        }
        if result.note.is_some() {
            assert!(
                result.records.is_empty(),
                "{} carries a note alongside records",
                result.domain
            );
        }
    }
}

#[tokio::test]
async fn subset_selection_audits_only_those_domains() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report_path = dir.path().join("report.json");

    let config = Config {
        domains: vec![AuditDomain::Firewall, AuditDomain::Ports],
        report_path: report_path.clone(),
        timeout_seconds: 5,
        ..Default::default()
    };

    let summary = run_audit(config).await.expect("audit run");
    assert_eq!(summary.domains_run, 2);

    let report = read_snapshot(&report_path).expect("report is readable");
    let domains: Vec<AuditDomain> = report.results.iter().map(|r| r.domain).collect();
    assert_eq!(domains, vec![AuditDomain::Firewall, AuditDomain::Ports]);
}

#[tokio::test]
async fn unwritable_report_path_fails_the_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report_path = dir.path().join("no-such-subdir").join("report.json");

    let config = Config {
        domains: vec![AuditDomain::Ports],
        report_path,
        timeout_seconds: 5,
        ..Default::default()
    };

    let err = run_audit(config).await.expect_err("run must fail");
    assert!(format!("{err:#}").contains("failed to persist audit report"));
}
