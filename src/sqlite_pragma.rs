//! Shared SQLite connection tuning

use rusqlite::Connection;

/// Read-heavy PRAGMAs for report queries
///
/// Only settings that do not write to the database file, so they are safe on
/// a connection that is switched to `query_only` afterwards.
pub fn apply_read_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA temp_store = MEMORY;
         PRAGMA cache_size = -65536;
         PRAGMA mmap_size = 268435456;",
    )
}
