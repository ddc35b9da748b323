// Snapshot report persistence: schema shape, field-presence invariants, and
// whole-file replacement.

mod helpers;

use host_audit::report::{read_snapshot, write_snapshot};

use helpers::sample_report;

#[test]
fn snapshot_schema_is_stable_and_field_presence_holds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");

    let report = sample_report();
    write_snapshot(&path, &report).expect("write snapshot");

    let raw = std::fs::read_to_string(&path).expect("read report back");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("report is valid JSON");

    // Envelope fields.
    assert!(json["timestamp"].is_string());
    assert_eq!(json["os"], "Linux");
    assert_eq!(json["hostname"], "test-host");
    let results = json["results"].as_array().expect("results array");
    assert_eq!(results.len(), 3);

    // error and records are mutually exclusive; note only on clean-and-empty.
    for result in results {
        let records = result["records"].as_array().expect("records array");
        let has_error = result.get("error").is_some();
        let has_note = result.get("note").is_some();
        if has_error {
            assert!(records.is_empty(), "errored result must carry no records");
            assert!(!has_note, "errored result must carry no note");
        }
        if has_note {
            assert!(records.is_empty(), "note only appears on empty results");
        }
    }
}

#[test]
fn snapshot_round_trips_through_serde() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");

    let report = sample_report();
    write_snapshot(&path, &report).expect("write snapshot");
    let reloaded = read_snapshot(&path).expect("read snapshot");

    assert_eq!(reloaded.results.len(), report.results.len());
    assert_eq!(reloaded.hostname, report.hostname);
    assert_eq!(reloaded.results[0].records, report.results[0].records);
    assert_eq!(
        reloaded.results[1].error.as_deref(),
        Some("iptables not found")
    );
}

#[test]
fn rewriting_replaces_the_previous_snapshot_whole() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");

    let mut report = sample_report();
    write_snapshot(&path, &report).expect("first write");

    report.results.truncate(1);
    report.hostname = "renamed-host".to_string();
    write_snapshot(&path, &report).expect("second write");

    let reloaded = read_snapshot(&path).expect("read snapshot");
    assert_eq!(reloaded.hostname, "renamed-host");
    assert_eq!(reloaded.results.len(), 1);
}

#[test]
fn unwritable_report_path_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing-subdir").join("report.json");

    let err = write_snapshot(&path, &sample_report()).expect_err("write must fail");
    assert!(err.to_string().contains("failed to write"));
}
