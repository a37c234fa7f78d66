//! Database schema and versioned migrations
//!
//! Each migration runs once, in order, inside its own transaction. The
//! applied version is recorded in `schema_version`.

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::error::StorageError;

/// Ordered migration list. Append only; never edit an applied entry.
pub const MIGRATIONS: &[(i32, &str)] = &[
    (1, ACCOUNTS_AND_PROTOCOLS),
    (2, ACCOUNT_ENTITLEMENTS),
    (3, ADMIN_AUDIT_AND_INDEXES),
];

/// Latest schema version.
pub fn latest_version() -> i32 {
    MIGRATIONS.last().map(|(v, _)| *v).unwrap_or(0)
}

/// Bring the database up to the latest version.
pub fn migrate(conn: &mut Connection) -> Result<(), StorageError> {
    let current = get_schema_version(conn)?;
    let latest = latest_version();

    if current >= latest {
        info!("Database schema is up to date (v{})", current);
        return Ok(());
    }

    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        info!("Applying schema migration v{}", version);
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.execute("DELETE FROM schema_version", [])?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
        tx.commit()?;
    }

    Ok(())
}

/// Current schema version (0 if not initialized).
pub fn get_schema_version(conn: &Connection) -> Result<i32, StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0))
        .optional()?;

    Ok(version.unwrap_or(0))
}

const ACCOUNTS_AND_PROTOCOLS: &str = r#"
CREATE TABLE accounts (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE protocols (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    disease_name TEXT NOT NULL,
    keywords TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL,
    estim_type TEXT NOT NULL,
    estim_params TEXT NOT NULL,
    estim_placement TEXT,
    estim_role TEXT NOT NULL,
    us_indication TEXT NOT NULL,
    us_params TEXT NOT NULL,
    us_placement TEXT,
    us_role TEXT NOT NULL,
    exercises_list TEXT NOT NULL,
    treatment_duration TEXT,
    expected_recovery TEXT,
    reference TEXT NOT NULL,
    illustration TEXT
);
"#;

const ACCOUNT_ENTITLEMENTS: &str = r#"
ALTER TABLE accounts ADD COLUMN is_admin INTEGER NOT NULL DEFAULT 0;
ALTER TABLE accounts ADD COLUMN subscription_end TEXT;
"#;

const ADMIN_AUDIT_AND_INDEXES: &str = r#"
CREATE TABLE admin_audit (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    actor TEXT NOT NULL,
    action TEXT NOT NULL,
    target TEXT NOT NULL,
    detail TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX idx_protocols_disease_name ON protocols(disease_name);
CREATE INDEX idx_protocols_keywords ON protocols(keywords);
CREATE INDEX idx_admin_audit_target ON admin_audit(target);
"#;
