//! JSONL writer for report tables - one JSON object per row, keyed by column

use super::report::ReportTable;
use super::writer_backend::{ReportWriterBackend, ReportWriterError};
use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct JsonlReportWriter {
    base_path: PathBuf,
}

impl JsonlReportWriter {
    pub fn new(base_path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        log::info!("📝 Writing JSONL reports to: {}", base_path.display());
        Ok(Self { base_path })
    }

    pub fn write_table(&self, table: &ReportTable) -> Result<PathBuf, ReportWriterError> {
        let path = self.base_path.join(format!("{}.jsonl", table.report.as_str()));
        let tmp_path = path.with_extension("jsonl.tmp");

        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        for row in &table.rows {
            let object: serde_json::Map<String, serde_json::Value> = table
                .columns
                .iter()
                .zip(row)
                .map(|(column, cell)| (column.to_string(), cell.to_json()))
                .collect();
            serde_json::to_writer(&mut writer, &object)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp_path, &path)?;

        log::debug!("📝 {}: {} rows → {}", table.report, table.len(), path.display());
        Ok(path)
    }
}

#[async_trait]
impl ReportWriterBackend for JsonlReportWriter {
    async fn write_report(&mut self, table: &ReportTable) -> Result<PathBuf, ReportWriterError> {
        self.write_table(table)
    }

    async fn flush(&mut self) -> Result<(), ReportWriterError> {
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "JSONL"
    }
}
