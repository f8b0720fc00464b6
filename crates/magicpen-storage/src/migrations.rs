//! Schema migrations
//!
//! The schema version lives in SQLite's `user_version` header field.
//! Each entry in `MIGRATIONS` moves the schema up by one version.

use rusqlite::Connection;

use crate::error::StorageError;
use crate::Result;

const MIGRATIONS: &[&str] = &[
    // v1: key/value settings
    "CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );",
];

pub fn schema_version(conn: &Connection) -> Result<i64> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let supported = MIGRATIONS.len() as i64;
    let found = schema_version(conn)?;

    if found > supported {
        return Err(StorageError::UnsupportedSchema { found, supported });
    }

    for (index, sql) in MIGRATIONS.iter().enumerate().skip(found as usize) {
        let target = index + 1;
        tracing::info!(version = target, "Applying storage migration");

        // Schema change and version bump commit together
        conn.execute_batch(&format!(
            "BEGIN;\n{}\nPRAGMA user_version = {};\nCOMMIT;",
            sql, target
        ))?;
    }

    Ok(())
}
