//! Probe-output parsers.
//!
//! Each parser consumes raw probe lines (or file contents) and produces zero
//! or more [`crate::models::AuditRecord`]s of one variant. Two uniform rules:
//!
//! - Line-tolerant parsers skip a malformed line silently; one garbled line
//!   never discards the records around it.
//! - Payload-level parsers (JSON from PowerShell) degrade the whole domain to
//!   a single error when the payload itself is invalid.

pub mod firewall;
pub mod logins;
pub mod ports;
pub mod services;
pub mod software;
pub mod ssh_keys;
