//! Error handling: the failure taxonomy for collectors and report persistence.

mod types;

pub use types::{CollectorError, ReportError};
