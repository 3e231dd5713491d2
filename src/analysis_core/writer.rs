//! Unified writer interface for report tables
//!
//! Routes writes to either the CSV or JSONL backend based on configuration.

use super::csv_writer::CsvReportWriter;
use super::jsonl_writer::JsonlReportWriter;
use super::report::ReportTable;
use super::writer_backend::{ReportWriterBackend, ReportWriterError};
use crate::config::BackendType;
use std::path::PathBuf;

pub enum ReportWriter {
    Csv(CsvReportWriter),
    Jsonl(JsonlReportWriter),
}

impl ReportWriter {
    /// Create a report writer rooted at `output_dir`
    pub fn new(backend: BackendType, output_dir: PathBuf) -> Result<Self, ReportWriterError> {
        match backend {
            BackendType::Csv => Ok(ReportWriter::Csv(CsvReportWriter::new(output_dir)?)),
            BackendType::Jsonl => Ok(ReportWriter::Jsonl(JsonlReportWriter::new(output_dir)?)),
        }
    }

    pub async fn write_report(
        &mut self,
        table: &ReportTable,
    ) -> Result<PathBuf, ReportWriterError> {
        match self {
            ReportWriter::Csv(w) => w.write_report(table).await,
            ReportWriter::Jsonl(w) => w.write_report(table).await,
        }
    }

    pub async fn flush(&mut self) -> Result<(), ReportWriterError> {
        match self {
            ReportWriter::Csv(w) => w.flush().await,
            ReportWriter::Jsonl(w) => w.flush().await,
        }
    }

    /// Get backend type for logging
    pub fn backend_type(&self) -> &'static str {
        match self {
            ReportWriter::Csv(w) => w.backend_type(),
            ReportWriter::Jsonl(w) => w.backend_type(),
        }
    }
}
