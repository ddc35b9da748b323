//! Listening-socket parsing for `ss -tuln` (Linux) and `netstat -an` (Windows).
//!
//! The local-address column moves around depending on which tool produced the
//! line, so instead of a fixed column index the parser looks for the first
//! token whose last colon-delimited segment parses as a port. That handles
//! `0.0.0.0:22`, `:::3389`, and bracketed peers alike with one code path.

use crate::config::WATCHED_PORTS;
use crate::models::{AuditRecord, Exposure};

/// Parses listening-socket lines into [`AuditRecord::PortBinding`] records.
///
/// Only ports 22 and 3389 are ever emitted; everything else is dropped by the
/// closed port-set rule. Lines without a listening-state marker, and lines
/// that don't expose a recognizable `host:port` token, are skipped.
pub fn parse_port_lines(lines: &[String]) -> Vec<AuditRecord> {
    lines.iter().filter_map(|line| parse_port_line(line)).collect()
}

fn parse_port_line(line: &str) -> Option<AuditRecord> {
    // "LISTEN" covers both ss's LISTEN and netstat's LISTENING.
    if !line.contains("LISTEN") {
        return None;
    }

    let mut tokens = line.split_whitespace();
    let protocol = tokens.next()?.to_lowercase();
    let (bind, port) = tokens.find_map(split_host_port)?;

    if !WATCHED_PORTS.contains(&port) {
        return None;
    }

    let exposure = Exposure::from_bind_addr(&bind);
    Some(AuditRecord::PortBinding {
        protocol,
        port,
        bind,
        exposure,
    })
}

/// Splits a `host:port` token at its last colon. Returns `None` unless the
/// final segment is a valid port number, which filters out peer wildcards
/// like `0.0.0.0:*` and process annotations like `users:(...)`.
fn split_host_port(token: &str) -> Option<(String, u16)> {
    let (host, port) = token.rsplit_once(':')?;
    let port: u16 = port.parse().ok()?;
    let host = if host.is_empty() {
        "0.0.0.0".to_string()
    } else {
        host.to_string()
    };
    Some((host, port))
}
