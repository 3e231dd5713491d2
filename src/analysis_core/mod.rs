//! Analysis Core - Prescription Cost Derivation Engine
//!
//! Turns raw prescription claim rows into three derived reports: brand vs
//! generic savings, per-state cost variance, and year-over-year cost trend.
//!
//! # Architecture
//!
//! ```text
//! SQLite Database → SqliteClaimReader → Dataset (read-only snapshot)
//!     ↓
//! Catalog (drug / provider joins) + group_by (multi-key sums)
//!     ↓
//! savings | regional | trend   (Measure: null-safe ratios)
//!     ↓
//! ReportTable → ReportWriter → CSV or JSONL backend
//! ```

pub mod catalog;
pub mod csv_writer;
pub mod group;
pub mod jsonl_writer;
pub mod measure;
pub mod records;
pub mod regional;
pub mod report;
pub mod runner;
pub mod savings;
pub mod schema;
pub mod sqlite_reader;
pub mod trend;
pub mod writer;
pub mod writer_backend;

pub use catalog::{Catalog, SchemaError};
pub use csv_writer::CsvReportWriter;
pub use group::{group_by, sum_claims_by, ClaimTotals};
pub use jsonl_writer::JsonlReportWriter;
pub use measure::Measure;
pub use records::{Claim, Dataset, Drug, Provider};
pub use regional::{compute_regional_variance, RegionalRow};
pub use report::{Cell, Report, ReportRow, ReportTable};
pub use runner::{compute_report, run_reports, ReportFailure, RunSummary, WrittenReport};
pub use savings::{compute_brand_generic_savings, SavingsRow};
pub use sqlite_reader::{ClaimSource, ReaderError, SqliteClaimReader};
pub use trend::{compute_yoy_trend, TrendRow};
pub use writer::ReportWriter;
pub use writer_backend::{ReportWriterBackend, ReportWriterError};
