//! Configuration constants.

/// Ports the audit cares about. Anything outside this set is never reported;
/// this is an intentional scope restriction, not a defect.
pub const WATCHED_PORTS: [u16; 2] = [22, 3389];

/// Windows services whose status the services domain checks.
pub const WATCHED_SERVICES: &[&str] = &["NTDS", "DNS", "DHCPServer"];

/// Service manager state code meaning "running".
pub const SERVICE_RUNNING_CODE: u32 = 4;

/// Default per-probe subprocess budget, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// A domain runs at most this many probes, so its overall budget is the probe
/// timeout multiplied by this factor.
pub const DOMAIN_PROBE_BUDGET_FACTOR: u32 = 4;

/// Linux authentication log consumed by the logins domain.
pub const AUTH_LOG_PATH: &str = "/var/log/auth.log";

/// Directory scanned for per-user authorized_keys files.
pub const HOME_ROOT: &str = "/home";

/// Default snapshot report location.
pub const DEFAULT_REPORT_PATH: &str = "./host_audit_report.json";
