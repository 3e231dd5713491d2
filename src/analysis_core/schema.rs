//! Table definitions for the prescription database

use rusqlite::Connection;

/// DDL for `Drugs`, `Providers` and `Prescriptions`
pub const PARTD_SCHEMA: &str = include_str!("../../sql/00_partd_schema.sql");

/// Create the report tables if they do not exist yet
pub fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(PARTD_SCHEMA)?;
    log::info!("🔧 Prescription schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        apply_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('Drugs', 'Providers', 'Prescriptions')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }
}
