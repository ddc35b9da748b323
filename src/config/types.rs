//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_REPORT_PATH};
use crate::models::AuditDomain;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Audit run configuration.
///
/// Doubles as the CLI surface and the library-level configuration struct; all
/// recognized options are enumerated here rather than read from the ambient
/// environment at arbitrary points.
///
/// # Examples
///
/// ```no_run
/// use host_audit::{AuditDomain, Config};
/// use std::path::PathBuf;
///
/// let config = Config {
///     domains: vec![AuditDomain::Ports, AuditDomain::Firewall],
///     report_path: PathBuf::from("./audit.json"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "host_audit", version, about = "Audits host security facts into a timestamped JSON report")]
pub struct Config {
    /// Audit domains to run; defaults to all of them
    #[arg(long = "domains", value_enum, value_delimiter = ',')]
    pub domains: Vec<AuditDomain>,

    /// Per-probe timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Where to write the snapshot report
    #[arg(long = "report", default_value = DEFAULT_REPORT_PATH)]
    pub report_path: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            timeout_seconds: DEFAULT_PROBE_TIMEOUT_SECS,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
