//! SQLite schema definition and version check.

use rusqlite::Connection;
use thiserror::Error;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Schema version {found} is newer than supported {supported}")]
    VersionTooNew { found: i32, supported: i32 },

    #[error("Schema version {0} is invalid")]
    InvalidVersion(i32),
}

/// Create the schema on a fresh database and check the version of an existing one.
pub fn init_schema(conn: &Connection) -> Result<(), SchemaError> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if version < 0 {
        return Err(SchemaError::InvalidVersion(version));
    } else if version > SCHEMA_VERSION {
        return Err(SchemaError::VersionTooNew {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    Ok(())
}

pub(crate) fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 =
        conn.query_row("SELECT version FROM schema_version", [], |row| row.get(0))?;

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?1)",
        [version],
    )?;
    Ok(())
}

fn create_schema_v1(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(
        r#"
        CREATE TABLE schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL
        );

        -- Paper registry
        CREATE TABLE papers (
            key TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );

        -- One row per weekday (0 = Monday) per paper
        CREATE TABLE paper_days (
            paper_key TEXT NOT NULL REFERENCES papers(key) ON DELETE CASCADE,
            day_id INTEGER NOT NULL CHECK (day_id BETWEEN 0 AND 6),
            delivered INTEGER NOT NULL,
            price REAL NOT NULL,
            PRIMARY KEY (paper_key, day_id)
        );

        -- Raw undelivered strings; paper_key 'all' applies to every paper
        CREATE TABLE undelivered_strings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            paper_key TEXT NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            string TEXT NOT NULL
        );

        CREATE INDEX idx_undelivered_period ON undelivered_strings(year, month);

        -- Calculated costs; paper_key NULL marks the total
        CREATE TABLE cost_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            paper_key TEXT,
            name TEXT NOT NULL,
            cost REAL NOT NULL
        );

        CREATE INDEX idx_cost_period ON cost_records(year, month);

        -- Resolved undelivered dates at the time of calculation
        CREATE TABLE undelivered_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            paper_key TEXT NOT NULL,
            dates TEXT NOT NULL
        );

        CREATE INDEX idx_undelivered_records_period ON undelivered_records(year, month);
        "#,
    )?;

    Ok(())
}
