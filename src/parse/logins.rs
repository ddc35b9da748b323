//! Failed-login parsing for the Linux auth log and the Windows Security event log.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error_handling::CollectorError;
use crate::models::AuditRecord;

/// Source label attached to records extracted from the Windows Security log.
pub const WINDOWS_EVENT_SOURCE: &str = "Windows Security Log";

// Anchored on the literal sshd marker: "<timestamp> <host> sshd[<pid>]:
// Failed password for <user> from <ip>". The timestamp is kept as the raw
// first token of the line, not re-parsed.
static FAILED_PASSWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+\S+\s+sshd\[\d+\]: Failed password for (\w+) from (\d+\.\d+\.\d+\.\d+)")
        .expect("failed password pattern is valid")
});

// The 4625 event message is a multi-line block; (?s) lets the lazy gap match
// across the embedded newlines up to the "Account Name:" label.
static ACCOUNT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Account For Which Logon Failed:\s+Security ID:\s+.*?\s+Account Name:\s+(\S+)")
        .expect("account name pattern is valid")
});

/// Extracts failed SSH password attempts from auth log lines.
///
/// Non-matching lines are skipped; one garbled line never discards the rest.
pub fn parse_auth_log_lines(lines: &[String]) -> Vec<AuditRecord> {
    lines
        .iter()
        .filter(|line| line.contains("Failed password"))
        .filter_map(|line| {
            let captures = FAILED_PASSWORD_RE.captures(line)?;
            Some(AuditRecord::LoginAttempt {
                timestamp: Some(captures[1].to_string()),
                username: captures[2].to_string(),
                source: captures[3].to_string(),
            })
        })
        .collect()
}

/// Extracts failed logons from a `Get-WinEvent ... | ConvertTo-Json` payload.
///
/// PowerShell emits a single object for one event and an array for several;
/// both shapes are accepted. A malformed payload degrades the whole domain,
/// since a broken JSON document is not recoverable line by line.
pub fn parse_security_events(payload: &str) -> Result<Vec<AuditRecord>, CollectorError> {
    let parsed: Value = serde_json::from_str(payload).map_err(|e| CollectorError::PayloadParse {
        payload: "PowerShell event".to_string(),
        message: e.to_string(),
    })?;

    let events: Vec<Value> = match parsed {
        Value::Array(events) => events,
        single @ Value::Object(_) => vec![single],
        other => {
            return Err(CollectorError::PayloadParse {
                payload: "PowerShell event".to_string(),
                message: format!("expected object or array, got {other}"),
            })
        }
    };

    let mut attempts = Vec::new();
    for event in &events {
        let timestamp = event
            .get("TimeCreated")
            .and_then(Value::as_str)
            .map(str::to_string);
        let message = event.get("Message").and_then(Value::as_str).unwrap_or("");
        if let Some(captures) = ACCOUNT_NAME_RE.captures(message) {
            attempts.push(AuditRecord::LoginAttempt {
                timestamp,
                username: captures[1].to_string(),
                source: WINDOWS_EVENT_SOURCE.to_string(),
            });
        }
    }
    Ok(attempts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extracts_timestamp_user_and_ip() {
        let input = lines(&[
            "2025-07-07T12:34:56.789012+00:00 bastion sshd[812]: Failed password for root from 203.0.113.7 port 22 ssh2",
        ]);
        let records = parse_auth_log_lines(&input);
        assert_eq!(
            records,
            vec![AuditRecord::LoginAttempt {
                timestamp: Some("2025-07-07T12:34:56.789012+00:00".into()),
                username: "root".into(),
                source: "203.0.113.7".into(),
            }]
        );
    }

    #[test]
    fn malformed_line_is_skipped_and_order_preserved() {
        let input = lines(&[
            "2025-07-07T12:00:01+00:00 bastion sshd[812]: Failed password for alice from 198.51.100.4 port 22 ssh2",
            "Failed password garbage that matches no pattern",
            "2025-07-07T12:00:02+00:00 bastion sshd[813]: Failed password for bob from 198.51.100.5 port 22 ssh2",
        ]);
        let records = parse_auth_log_lines(&input);
        let names: Vec<_> = records
            .iter()
            .map(|r| match r {
                AuditRecord::LoginAttempt { username, .. } => username.clone(),
                other => panic!("unexpected record: {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn unrelated_sshd_lines_produce_nothing() {
        let input = lines(&[
            "2025-07-07T12:00:01+00:00 bastion sshd[812]: Accepted publickey for deploy from 10.0.0.4",
            "2025-07-07T12:00:03+00:00 bastion CRON[99]: session opened for user root",
        ]);
        assert!(parse_auth_log_lines(&input).is_empty());
    }

    fn event_message(account: &str) -> String {
        format!(
            "An account failed to log on.\r\n\r\nSubject:\r\n\tSecurity ID:\t\tS-1-0-0\r\n\r\n\
             Account For Which Logon Failed:\r\n\tSecurity ID:\t\tS-1-0-0\r\n\t\
             Account Name:\t\t{account}\r\n\tAccount Domain:\t\tWORKGROUP\r\n"
        )
    }

    #[test]
    fn single_event_object_is_accepted() {
        let payload = serde_json::json!({
            "TimeCreated": "2025-07-07T12:34:56",
            "Message": event_message("administrator"),
        })
        .to_string();
        let records = parse_security_events(&payload).unwrap();
        assert_eq!(
            records,
            vec![AuditRecord::LoginAttempt {
                timestamp: Some("2025-07-07T12:34:56".into()),
                username: "administrator".into(),
                source: WINDOWS_EVENT_SOURCE.into(),
            }]
        );
    }

    #[test]
    fn event_array_yields_one_record_per_matching_event() {
        let payload = serde_json::json!([
            { "TimeCreated": "2025-07-07T12:00:01", "Message": event_message("svc_backup") },
            { "TimeCreated": "2025-07-07T12:00:02", "Message": "no account block here" },
            { "TimeCreated": "2025-07-07T12:00:03", "Message": event_message("guest") },
        ])
        .to_string();
        let records = parse_security_events(&payload).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn malformed_payload_degrades_the_whole_domain() {
        let err = parse_security_events("{ not json").unwrap_err();
        assert!(matches!(err, CollectorError::PayloadParse { .. }));
    }

    #[test]
    fn scalar_payload_is_rejected() {
        let err = parse_security_events("42").unwrap_err();
        assert!(matches!(err, CollectorError::PayloadParse { .. }));
    }
}
