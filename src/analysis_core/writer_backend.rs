//! Writer backend trait for derived reports
//!
//! Defines the interface for emitting a finished report table to a sink.

use super::report::ReportTable;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ReportWriterError {
    Io(std::io::Error),
    Csv(csv::Error),
    Serialization(serde_json::Error),
}

impl From<std::io::Error> for ReportWriterError {
    fn from(err: std::io::Error) -> Self {
        ReportWriterError::Io(err)
    }
}

impl From<csv::Error> for ReportWriterError {
    fn from(err: csv::Error) -> Self {
        ReportWriterError::Csv(err)
    }
}

impl From<serde_json::Error> for ReportWriterError {
    fn from(err: serde_json::Error) -> Self {
        ReportWriterError::Serialization(err)
    }
}

impl std::fmt::Display for ReportWriterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportWriterError::Io(e) => write!(f, "IO error: {}", e),
            ReportWriterError::Csv(e) => write!(f, "CSV error: {}", e),
            ReportWriterError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ReportWriterError {}

/// Backend trait for writing report tables
#[async_trait]
pub trait ReportWriterBackend: Send {
    /// Write one complete report, replacing any previous output for it.
    /// Returns the location written to.
    async fn write_report(&mut self, table: &ReportTable) -> Result<PathBuf, ReportWriterError>;

    /// Flush pending writes to storage
    async fn flush(&mut self) -> Result<(), ReportWriterError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
