//! Report identities and the tabular form handed to writer backends

use super::measure::Measure;
use super::regional::RegionalRow;
use super::savings::SavingsRow;
use super::trend::TrendRow;
use rust_decimal::prelude::ToPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Report {
    BrandGenericSavings,
    RegionalVariance,
    ShortageTrendsYoy,
}

impl Report {
    /// Destination name, also used as the output file stem
    pub fn as_str(&self) -> &'static str {
        match self {
            Report::BrandGenericSavings => "brand_generic_savings",
            Report::RegionalVariance => "regional_variance",
            Report::ShortageTrendsYoy => "shortage_trends_yoy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "brand_generic_savings" => Some(Report::BrandGenericSavings),
            "regional_variance" => Some(Report::RegionalVariance),
            "shortage_trends_yoy" => Some(Report::ShortageTrendsYoy),
            _ => None,
        }
    }

    pub fn all() -> [Report; 3] {
        [
            Report::BrandGenericSavings,
            Report::RegionalVariance,
            Report::ShortageTrendsYoy,
        ]
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Report::BrandGenericSavings => SavingsRow::COLUMNS,
            Report::RegionalVariance => RegionalRow::COLUMNS,
            Report::ShortageTrendsYoy => TrendRow::COLUMNS,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single output value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(Option<String>),
    /// `None` renders empty, like an undefined number
    Int(Option<i64>),
    Number(Measure),
}

impl Cell {
    /// Plain text rendering; absent values render as an empty string
    pub fn render(&self) -> String {
        match self {
            Cell::Text(value) => value.clone().unwrap_or_default(),
            Cell::Int(value) => value.map(|v| v.to_string()).unwrap_or_default(),
            Cell::Number(measure) => measure.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Cell::Text(Some(value)) => serde_json::Value::String(value.clone()),
            Cell::Text(None) => serde_json::Value::Null,
            Cell::Int(Some(value)) => serde_json::Value::from(*value),
            Cell::Int(None) => serde_json::Value::Null,
            Cell::Number(measure) => measure
                .value()
                .and_then(|v| v.to_f64())
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

/// A row with a fixed column set
pub trait ReportRow {
    const COLUMNS: &'static [&'static str];

    /// One cell per entry of `COLUMNS`, in the same order
    fn cells(&self) -> Vec<Cell>;
}

impl ReportRow for SavingsRow {
    const COLUMNS: &'static [&'static str] = &[
        "generic_name",
        "brand_name",
        "brand_total_claims",
        "brand_total_cost",
        "generic_avg_cost_per_claim",
        "hypothetical_generic_cost",
        "potential_savings",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(Some(self.generic_name.clone())),
            Cell::Text(Some(self.brand_name.clone())),
            Cell::Int(self.brand_total_claims),
            Cell::Number(self.brand_total_cost),
            Cell::Number(self.generic_avg_cost_per_claim),
            Cell::Number(self.hypothetical_generic_cost),
            Cell::Number(self.potential_savings),
        ]
    }
}

impl ReportRow for RegionalRow {
    const COLUMNS: &'static [&'static str] = &[
        "state",
        "generic_name",
        "total_cost",
        "total_claims",
        "avg_cost_per_claim",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(Some(self.state.clone())),
            Cell::Text(Some(self.generic_name.clone())),
            Cell::Number(self.total_cost),
            Cell::Int(self.total_claims),
            Cell::Number(self.avg_cost_per_claim),
        ]
    }
}

impl ReportRow for TrendRow {
    const COLUMNS: &'static [&'static str] = &[
        "generic_name",
        "brand_name",
        "year",
        "avg_cost_per_claim",
        "prev_avg_cost_per_claim",
        "yoy_change",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(Some(self.generic_name.clone())),
            Cell::Text(self.brand_name.clone()),
            Cell::Int(Some(self.year)),
            Cell::Number(self.avg_cost_per_claim),
            Cell::Number(self.prev_avg_cost_per_claim),
            Cell::Number(self.yoy_change),
        ]
    }
}

/// Ordered, homogeneous row set for one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub report: Report,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn from_rows<R: ReportRow>(report: Report, rows: &[R]) -> Self {
        Self {
            report,
            columns: R::COLUMNS,
            rows: rows.iter().map(|row| row.cells()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
