//! Cost Analysis Binary - Prescription Cost Reports
//!
//! Reads the prescription database and writes the brand vs generic savings,
//! regional variance and year-over-year trend reports.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin cost_analysis
//! cargo run --release --bin cost_analysis -- --backend jsonl --report regional_variance
//! ```
//!
//! ## Environment Variables
//!
//! - DATABASE_URL - SQLite database (default: sqlite:///data/medicare_partd.db)
//! - OUTDIR - Output directory for report files (default: outputs)
//! - RUST_LOG - Logging level (optional, default: info)

use partd_cost::analysis_core::{
    run_reports, schema::apply_schema, ClaimSource, ReportWriter, SqliteClaimReader,
};
use partd_cost::config::AnalysisConfig;
use rusqlite::Connection;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = AnalysisConfig::from_env()?;

    log::info!("🚀 Starting cost analysis");
    log::info!("   Database: {}", config.db_path.display());
    log::info!("   Output: {}", config.output_dir.display());
    log::info!("   Backend: {:?}", config.backend);
    log::info!(
        "   Reports: {}",
        config
            .reports
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if config.init_schema {
        if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&config.db_path)?;
        apply_schema(&conn)?;
    }

    let reader = SqliteClaimReader::open(&config.db_path)?;
    let dataset = Arc::new(reader.load_snapshot()?);
    drop(reader);

    if dataset.is_empty() {
        log::warn!("⚠️  No prescription rows found; reports will only contain headers");
    }

    let mut writer = ReportWriter::new(config.backend, config.output_dir.clone())?;
    log::info!("📊 Backend: {}", writer.backend_type());

    let summary = run_reports(dataset, &config.reports, &mut writer).await;

    let paths: Vec<String> = summary
        .written
        .iter()
        .map(|w| w.path.display().to_string())
        .collect();
    println!("Wrote: {}", paths.join(", "));

    log::info!(
        "✅ Finished in {}ms ({} written, {} failed)",
        summary.elapsed_ms,
        summary.written.len(),
        summary.failed.len()
    );

    if !summary.is_success() {
        let failed: Vec<&str> = summary.failed.iter().map(|(r, _)| r.as_str()).collect();
        return Err(format!("Reports failed: {}", failed.join(", ")).into());
    }

    Ok(())
}
