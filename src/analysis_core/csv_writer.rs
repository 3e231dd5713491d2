//! CSV writer - one `<report>.csv` file per report with a header row

use super::report::{Cell, ReportTable};
use super::writer_backend::{ReportWriterBackend, ReportWriterError};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvReportWriter {
    base_path: PathBuf,
}

impl CsvReportWriter {
    pub fn new(base_path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        log::info!("📝 Writing CSV reports to: {}", base_path.display());
        Ok(Self { base_path })
    }

    pub fn report_path(&self, table: &ReportTable) -> PathBuf {
        self.base_path.join(format!("{}.csv", table.report.as_str()))
    }

    /// Writes to a temporary file and renames it over the target, so readers
    /// never see a half-written report
    pub fn write_table(&self, table: &ReportTable) -> Result<PathBuf, ReportWriterError> {
        let path = self.report_path(table);
        let tmp_path = path.with_extension("csv.tmp");

        write_csv(&tmp_path, table)?;
        fs::rename(&tmp_path, &path)?;

        log::debug!("📝 {}: {} rows → {}", table.report, table.len(), path.display());
        Ok(path)
    }
}

fn write_csv(path: &Path, table: &ReportTable) -> Result<(), ReportWriterError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(Cell::render))?;
    }
    writer.flush()?;
    Ok(())
}

#[async_trait]
impl ReportWriterBackend for CsvReportWriter {
    async fn write_report(&mut self, table: &ReportTable) -> Result<PathBuf, ReportWriterError> {
        self.write_table(table)
    }

    async fn flush(&mut self) -> Result<(), ReportWriterError> {
        // Every report is flushed and renamed as it is written
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "CSV"
    }
}
