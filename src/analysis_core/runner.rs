//! Report runner
//!
//! Computes the requested reports concurrently against one shared snapshot,
//! then writes them in request order. Each report succeeds or fails on its
//! own: a failed report produces no output and does not stop the others.

use super::catalog::SchemaError;
use super::records::Dataset;
use super::regional::compute_regional_variance;
use super::report::{Report, ReportTable};
use super::savings::compute_brand_generic_savings;
use super::trend::compute_yoy_trend;
use super::writer::ReportWriter;
use super::writer_backend::ReportWriterError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
pub enum ReportFailure {
    Schema(SchemaError),
    Write(ReportWriterError),
    Task(String),
}

impl std::fmt::Display for ReportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFailure::Schema(e) => write!(f, "Schema error: {}", e),
            ReportFailure::Write(e) => write!(f, "Write error: {}", e),
            ReportFailure::Task(e) => write!(f, "Task error: {}", e),
        }
    }
}

impl std::error::Error for ReportFailure {}

#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub report: Report,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
    pub written: Vec<WrittenReport>,
    pub failed: Vec<(Report, ReportFailure)>,
}

impl RunSummary {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            elapsed_ms: 0,
            written: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Compute one report into its table form
pub fn compute_report(report: Report, dataset: &Dataset) -> Result<ReportTable, SchemaError> {
    let table = match report {
        Report::BrandGenericSavings => {
            let rows = compute_brand_generic_savings(&dataset.claims, &dataset.drugs)?;
            ReportTable::from_rows(report, &rows)
        }
        Report::RegionalVariance => {
            let rows =
                compute_regional_variance(&dataset.claims, &dataset.drugs, &dataset.providers)?;
            ReportTable::from_rows(report, &rows)
        }
        Report::ShortageTrendsYoy => {
            let rows = compute_yoy_trend(&dataset.claims, &dataset.drugs)?;
            ReportTable::from_rows(report, &rows)
        }
    };
    Ok(table)
}

pub async fn run_reports(
    dataset: Arc<Dataset>,
    reports: &[Report],
    writer: &mut ReportWriter,
) -> RunSummary {
    let mut summary = RunSummary::new(Utc::now());

    log::info!(
        "⏱️  Computing {} report(s) over {} claims, {} drugs, {} providers",
        reports.len(),
        dataset.claims.len(),
        dataset.drugs.len(),
        dataset.providers.len()
    );

    let handles: Vec<_> = reports
        .iter()
        .map(|&report| {
            let dataset = Arc::clone(&dataset);
            let handle = tokio::task::spawn_blocking(move || compute_report(report, &dataset));
            (report, handle)
        })
        .collect();

    for (report, handle) in handles {
        let outcome = match handle.await {
            Ok(Ok(table)) => {
                let rows = table.len();
                writer
                    .write_report(&table)
                    .await
                    .map(|path| WrittenReport { report, path, rows })
                    .map_err(ReportFailure::Write)
            }
            Ok(Err(e)) => Err(ReportFailure::Schema(e)),
            Err(e) => Err(ReportFailure::Task(e.to_string())),
        };

        match outcome {
            Ok(written) => {
                log::info!(
                    "✅ {}: {} rows → {}",
                    report,
                    written.rows,
                    written.path.display()
                );
                summary.written.push(written);
            }
            Err(failure) => {
                log::error!("❌ {} failed: {}", report, failure);
                summary.failed.push((report, failure));
            }
        }
    }

    if let Err(e) = writer.flush().await {
        log::warn!("Failed to flush {} writer: {}", writer.backend_type(), e);
    }

    summary.elapsed_ms = (Utc::now() - summary.started_at).num_milliseconds();
    summary
}
