use std::env;
use std::path::PathBuf;

use crate::analysis_core::Report;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///data/medicare_partd.db";
pub const DEFAULT_OUTDIR: &str = "outputs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Csv,
    Jsonl,
}

impl BackendType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(BackendType::Csv),
            "jsonl" => Some(BackendType::Jsonl),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for one report run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// SQLite database file holding Prescriptions, Drugs and Providers
    pub db_path: PathBuf,

    /// Directory the report files are written to
    pub output_dir: PathBuf,

    pub backend: BackendType,

    /// Reports to run, in output order, without duplicates
    pub reports: Vec<Report>,

    /// Create the tables before reading
    pub init_schema: bool,
}

impl AnalysisConfig {
    /// Load configuration from the process environment and command line
    ///
    /// Environment variables:
    /// - `DATABASE_URL` (default: sqlite:///data/medicare_partd.db)
    /// - `OUTDIR` (default: outputs)
    ///
    /// Arguments:
    /// - `--backend csv|jsonl` (default: csv)
    /// - `--report <name>`, repeatable (default: all reports)
    /// - `--init-schema`
    pub fn from_env() -> Result<Self, ConfigError> {
        let args: Vec<String> = env::args().skip(1).collect();
        Self::from_lookup(|key| env::var(key).ok(), &args)
    }

    pub fn from_lookup<F>(lookup: F, args: &[String]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let db_path = parse_database_url(database_url.trim())?;

        let output_dir: PathBuf = lookup("OUTDIR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUTDIR.to_string())
            .into();

        let mut backend = BackendType::Csv;
        let mut reports: Vec<Report> = Vec::new();
        let mut init_schema = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--backend" => {
                    let value = iter.next().ok_or_else(|| {
                        ConfigError::InvalidValue("--backend requires a value".to_string())
                    })?;
                    backend = BackendType::from_str(value).ok_or_else(|| {
                        ConfigError::InvalidValue(format!(
                            "Unknown backend '{}' (expected csv or jsonl)",
                            value
                        ))
                    })?;
                }
                "--report" => {
                    let value = iter.next().ok_or_else(|| {
                        ConfigError::InvalidValue("--report requires a value".to_string())
                    })?;
                    let report = Report::from_str(value).ok_or_else(|| {
                        ConfigError::InvalidValue(format!("Unknown report '{}'", value))
                    })?;
                    if !reports.contains(&report) {
                        reports.push(report);
                    }
                }
                "--init-schema" => init_schema = true,
                other => {
                    return Err(ConfigError::InvalidValue(format!(
                        "Unknown argument '{}'",
                        other
                    )))
                }
            }
        }

        if reports.is_empty() {
            reports = Report::all().to_vec();
        }

        Ok(Self {
            db_path,
            output_dir,
            backend,
            reports,
            init_schema,
        })
    }
}

/// Resolve a SQLAlchemy-style SQLite URL (or a bare path) to a file path
///
/// `sqlite:///rel/path` is relative, `sqlite:////abs/path` is absolute.
pub fn parse_database_url(url: &str) -> Result<PathBuf, ConfigError> {
    if let Some(path) = url.strip_prefix("sqlite:///") {
        if path.is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "DATABASE_URL '{}' has no database path",
                url
            )));
        }
        return Ok(PathBuf::from(path));
    }

    if url.starts_with("sqlite:") {
        return Err(ConfigError::InvalidValue(format!(
            "DATABASE_URL '{}' must name a database file (sqlite:///path)",
            url
        )));
    }

    if url.contains("://") {
        return Err(ConfigError::InvalidValue(format!(
            "DATABASE_URL '{}' is not a SQLite URL",
            url
        )));
    }

    Ok(PathBuf::from(url))
}
