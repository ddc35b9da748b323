//! SSH key audit collector: one entry per user home under `/home`.
//!
//! Linux-only. A user whose key file cannot be read gets an entry carrying
//! the error; every other user's entry is unaffected. A failure enumerating
//! the home directories themselves degrades the whole domain, since a
//! truncated user list would read as "checked, clean" for the missing users.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{unsupported, Collector, CollectorContext};
use crate::config::HOME_ROOT;
use crate::error_handling::CollectorError;
use crate::models::{AuditDomain, AuditRecord, CollectionResult, HostOs};
use crate::parse::ssh_keys::extract_public_keys;

const EMPTY_NOTE: &str = "no authorized_keys files found";

pub(super) fn for_os(os: &HostOs) -> Result<Box<dyn Collector>, CollectorError> {
    match os {
        HostOs::Linux => Ok(Box::new(LinuxSshKeyCollector)),
        other => Err(unsupported(AuditDomain::SshKeys, other)),
    }
}

struct LinuxSshKeyCollector;

#[async_trait]
impl Collector for LinuxSshKeyCollector {
    fn domain(&self) -> AuditDomain {
        AuditDomain::SshKeys
    }

    async fn collect(&self, ctx: &CollectorContext) -> CollectionResult {
        let scan = tokio::time::timeout(ctx.probe_timeout, scan_home_dirs(Path::new(HOME_ROOT)));
        match scan.await {
            Ok(Ok(records)) => {
                CollectionResult::success(self.domain(), &ctx.os, records, EMPTY_NOTE)
            }
            Ok(Err(error)) => CollectionResult::failure(self.domain(), &ctx.os, error),
            Err(_) => {
                let error = CollectorError::ProbeTimeout {
                    tool: HOME_ROOT.to_string(),
                    seconds: ctx.probe_timeout.as_secs(),
                };
                CollectionResult::failure(self.domain(), &ctx.os, error)
            }
        }
    }
}

async fn scan_home_dirs(root: &Path) -> Result<Vec<AuditRecord>, CollectorError> {
    let unavailable = || CollectorError::LogUnavailable {
        path: root.display().to_string(),
    };
    let mut homes = tokio::fs::read_dir(root).await.map_err(|_| unavailable())?;

    let mut records = Vec::new();
    loop {
        let entry = match homes.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            // An iteration failure means an unknown number of users were
            // never examined; that cannot pass as a clean result.
            Err(_) => return Err(unavailable()),
        };
        let username = entry.file_name().to_string_lossy().to_string();
        let home = entry.path();
        let key_path = home.join(".ssh").join("authorized_keys");

        // Users without a key file are simply absent from the report.
        let Ok(metadata) = tokio::fs::metadata(&key_path).await else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let record = match tokio::fs::read_to_string(&key_path).await {
            Ok(contents) => {
                let keys = extract_public_keys(&contents);
                let last_modified = metadata
                    .modified()
                    .ok()
                    .map(|mtime| DateTime::<Utc>::from(mtime).to_rfc3339());
                AuditRecord::SshKeyEntry {
                    username,
                    home: Some(home.to_string_lossy().to_string()),
                    authorized_keys_count: keys.len(),
                    last_modified,
                    keys,
                    error: None,
                }
            }
            Err(read_err) => AuditRecord::SshKeyEntry {
                username,
                home: Some(home.to_string_lossy().to_string()),
                authorized_keys_count: 0,
                last_modified: None,
                keys: Vec::new(),
                error: Some(read_err.to_string()),
            },
        };
        records.push(record);
    }

    // Deterministic report order regardless of directory iteration order.
    records.sort_by(|a, b| {
        let name = |r: &AuditRecord| match r {
            AuditRecord::SshKeyEntry { username, .. } => username.clone(),
            _ => String::new(),
        };
        name(a).cmp(&name(b))
    });
    Ok(records)
}
