//! Protocol CRUD operations

use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use physio_core::{Modality, ProtocolRecord};

use crate::error::StorageError;

const SELECT_COLUMNS: &str = "id, disease_name, keywords, description, \
     estim_type, estim_params, estim_placement, estim_role, \
     us_indication, us_params, us_placement, us_role, \
     exercises_list, treatment_duration, expected_recovery, reference, illustration";

fn from_row(row: &Row) -> Result<ProtocolRecord, rusqlite::Error> {
    Ok(ProtocolRecord {
        id: Some(row.get("id")?),
        disease_name: row.get("disease_name")?,
        keywords: row.get("keywords")?,
        description: row.get("description")?,
        electrotherapy: Modality {
            kind: row.get("estim_type")?,
            parameters: row.get("estim_params")?,
            placement: row.get("estim_placement")?,
            purpose: row.get("estim_role")?,
        },
        ultrasound: Modality {
            kind: row.get("us_indication")?,
            parameters: row.get("us_params")?,
            placement: row.get("us_placement")?,
            purpose: row.get("us_role")?,
        },
        exercises: row.get("exercises_list")?,
        treatment_duration: row.get("treatment_duration")?,
        expected_recovery: row.get("expected_recovery")?,
        reference: row.get("reference")?,
        illustration: row.get("illustration")?,
    })
}

/// SQL function: case-insensitive substring test with full Unicode folding.
pub const CONTAINS_FN: &str = "physio_contains";

/// Register the SQL functions search relies on. Call once per connection.
pub fn register_functions(conn: &Connection) -> Result<(), StorageError> {
    conn.create_scalar_function(
        CONTAINS_FN,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: String = ctx.get(0)?;
            let needle: String = ctx.get(1)?;
            Ok(haystack.to_lowercase().contains(&needle.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Records whose name or keywords contain `query`, ordered by id.
///
/// SQLite `LIKE` folds ASCII only, so matching goes through
/// [`CONTAINS_FN`]; wildcard characters in `query` have no special meaning.
pub fn search_protocols(conn: &Connection, query: &str) -> Result<Vec<ProtocolRecord>, StorageError> {
    let sql = format!(
        "SELECT {cols} FROM protocols \
         WHERE {f}(disease_name, ?1) OR {f}(keywords, ?1) \
         ORDER BY id ASC",
        cols = SELECT_COLUMNS,
        f = CONTAINS_FN,
    );
    debug!(query, "Searching protocols");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![query], from_row)?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Get a protocol by id
pub fn get_protocol(conn: &Connection, id: i64) -> Result<Option<ProtocolRecord>, StorageError> {
    let sql = format!("SELECT {} FROM protocols WHERE id = ?1", SELECT_COLUMNS);
    Ok(conn.query_row(&sql, params![id], from_row).optional()?)
}

/// All protocols ordered by id
pub fn list_protocols(conn: &Connection) -> Result<Vec<ProtocolRecord>, StorageError> {
    let sql = format!("SELECT {} FROM protocols ORDER BY id ASC", SELECT_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn count_protocols(conn: &Connection) -> Result<u64, StorageError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM protocols", [], |row| row.get(0))?;
    Ok(count as u64)
}

/// Insert a protocol, ignoring any id it carries. Returns the new id.
pub fn insert_protocol(conn: &Connection, record: &ProtocolRecord) -> Result<i64, StorageError> {
    if record.disease_name.trim().is_empty() {
        return Err(StorageError::InvalidInput(
            "disease_name must not be empty".to_string(),
        ));
    }

    conn.execute(
        "INSERT INTO protocols (
            disease_name, keywords, description,
            estim_type, estim_params, estim_placement, estim_role,
            us_indication, us_params, us_placement, us_role,
            exercises_list, treatment_duration, expected_recovery, reference, illustration
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            record.disease_name,
            record.keywords,
            record.description,
            record.electrotherapy.kind,
            record.electrotherapy.parameters,
            record.electrotherapy.placement,
            record.electrotherapy.purpose,
            record.ultrasound.kind,
            record.ultrasound.parameters,
            record.ultrasound.placement,
            record.ultrasound.purpose,
            record.exercises,
            record.treatment_duration,
            record.expected_recovery,
            record.reference,
            record.illustration,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Delete a protocol by id.
pub fn delete_protocol(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let deleted = conn.execute("DELETE FROM protocols WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(StorageError::ProtocolNotFound(id));
    }
    Ok(())
}
