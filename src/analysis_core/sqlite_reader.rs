//! SQLite schema accessor
//!
//! Reads the `Prescriptions`, `Drugs` and `Providers` tables into an
//! in-memory `Dataset`. The connection is put in `query_only` mode so a
//! report run can never modify the source database.

use super::records::{Claim, Dataset, Drug, Provider};
use crate::sqlite_pragma::apply_read_pragmas;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::path::Path;

#[derive(Debug)]
pub enum ReaderError {
    Database(rusqlite::Error),
    InvalidRecord(String),
}

impl From<rusqlite::Error> for ReaderError {
    fn from(err: rusqlite::Error) -> Self {
        ReaderError::Database(err)
    }
}

impl std::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReaderError::Database(e) => write!(f, "Database error: {}", e),
            ReaderError::InvalidRecord(msg) => write!(f, "Invalid record: {}", msg),
        }
    }
}

impl std::error::Error for ReaderError {}

/// Source of the three record streams the reports are computed from
pub trait ClaimSource {
    fn load_claims(&self) -> Result<Vec<Claim>, ReaderError>;

    fn load_drugs(&self) -> Result<Vec<Drug>, ReaderError>;

    fn load_providers(&self) -> Result<Vec<Provider>, ReaderError>;

    /// Load all three streams into one snapshot
    fn load_snapshot(&self) -> Result<Dataset, ReaderError> {
        let drugs = self.load_drugs()?;
        let providers = self.load_providers()?;
        let claims = self.load_claims()?;
        Ok(Dataset::new(claims, drugs, providers))
    }
}

pub struct SqliteClaimReader {
    conn: Connection,
}

impl SqliteClaimReader {
    /// Open an existing database read-only
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        log::info!("📥 SQLite reader opened: {}", db_path.display());
        Self::from_connection(conn)
    }

    /// Wrap an already-open connection (e.g. in-memory databases in tests)
    pub fn from_connection(conn: Connection) -> Result<Self, ReaderError> {
        apply_read_pragmas(&conn)?;

        // Must come after the PRAGMAs
        conn.execute("PRAGMA query_only = ON", [])?;

        Ok(Self { conn })
    }
}

impl ClaimSource for SqliteClaimReader {
    fn load_claims(&self) -> Result<Vec<Claim>, ReaderError> {
        let mut stmt = self.conn.prepare(
            "SELECT drug_id, provider_id, year, total_cost, claims_count
             FROM Prescriptions
             ORDER BY rowid ASC",
        )?;

        let raw_iter = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, Value>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;

        let mut claims = Vec::new();
        for (position, result) in raw_iter.enumerate() {
            let (drug_ref, provider_ref, year, cost, claims_count) = result?;
            let total_cost = decimal_from_value(&cost).ok_or_else(|| {
                ReaderError::InvalidRecord(format!(
                    "Prescriptions row {}: total_cost {:?} is not numeric",
                    position, cost
                ))
            })?;

            claims.push(Claim {
                drug_ref,
                provider_ref,
                year,
                total_cost,
                claims_count,
            });
        }

        log::debug!("📥 Loaded {} prescription rows", claims.len());
        Ok(claims)
    }

    fn load_drugs(&self) -> Result<Vec<Drug>, ReaderError> {
        let mut stmt = self.conn.prepare(
            "SELECT drug_id, brand_name, generic_name FROM Drugs ORDER BY drug_id ASC",
        )?;

        let drugs = stmt
            .query_map([], |row| {
                Ok(Drug {
                    drug_id: row.get(0)?,
                    brand_name: row.get(1)?,
                    generic_name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("📥 Loaded {} drugs", drugs.len());
        Ok(drugs)
    }

    fn load_providers(&self) -> Result<Vec<Provider>, ReaderError> {
        let mut stmt = self
            .conn
            .prepare("SELECT provider_id, state FROM Providers ORDER BY provider_id ASC")?;

        let providers = stmt
            .query_map([], |row| {
                Ok(Provider {
                    provider_id: row.get(0)?,
                    state: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("📥 Loaded {} providers", providers.len());
        Ok(providers)
    }
}

/// SQLite stores NUMERIC columns as INTEGER, REAL or TEXT depending on the value
fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(i) => Some(Decimal::from(*i)),
        Value::Real(f) => Decimal::from_f64(*f),
        Value::Text(s) => s.trim().parse().ok(),
        Value::Null | Value::Blob(_) => None,
    }
}
