//! Account rows, entitlements and the admin audit trail

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use uuid::Uuid;

use physio_core::{normalize_email, Account, AccountId};

use crate::error::StorageError;

const SELECT_COLUMNS: &str = "id, email, password_hash, created_at, is_admin, subscription_end";

/// Raw account row before id and timestamp parsing
struct AccountRow {
    id: String,
    email: String,
    password_hash: String,
    created_at: String,
    is_admin: bool,
    subscription_end: Option<String>,
}

impl AccountRow {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            created_at: row.get("created_at")?,
            is_admin: row.get("is_admin")?,
            subscription_end: row.get("subscription_end")?,
        })
    }

    fn into_account(self) -> Result<Account, StorageError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StorageError::Corrupt(format!("account id {:?}: {}", self.id, e)))?;

        Ok(Account {
            id: AccountId(id),
            email: self.email,
            password_hash: self.password_hash,
            created_at: parse_timestamp(&self.created_at)?,
            is_admin: self.is_admin,
            subscription_end: self
                .subscription_end
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
        })
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt(format!("timestamp {:?}: {}", value, e)))
}

/// Insert a new account. The email must already be normalized.
pub fn insert_account(conn: &Connection, account: &Account) -> Result<(), StorageError> {
    let result = conn.execute(
        "INSERT INTO accounts (id, email, password_hash, created_at, is_admin, subscription_end)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            account.id.to_string(),
            account.email,
            account.password_hash,
            account.created_at.to_rfc3339(),
            account.is_admin,
            account.subscription_end.map(|t| t.to_rfc3339()),
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(StorageError::EmailTaken(account.email.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn get_account_by_id(conn: &Connection, id: AccountId) -> Result<Option<Account>, StorageError> {
    let sql = format!("SELECT {} FROM accounts WHERE id = ?1", SELECT_COLUMNS);
    conn.query_row(&sql, params![id.to_string()], AccountRow::from_row)
        .optional()?
        .map(AccountRow::into_account)
        .transpose()
}

/// Lookup by email; the input is normalized first.
pub fn get_account_by_email(conn: &Connection, email: &str) -> Result<Option<Account>, StorageError> {
    let sql = format!("SELECT {} FROM accounts WHERE email = ?1", SELECT_COLUMNS);
    conn.query_row(&sql, params![normalize_email(email)], AccountRow::from_row)
        .optional()?
        .map(AccountRow::into_account)
        .transpose()
}

pub fn count_admins(conn: &Connection) -> Result<u64, StorageError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM accounts WHERE is_admin = 1",
        [],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

pub fn set_admin(conn: &Connection, id: AccountId, is_admin: bool) -> Result<(), StorageError> {
    let updated = conn.execute(
        "UPDATE accounts SET is_admin = ?1 WHERE id = ?2",
        params![is_admin, id.to_string()],
    )?;
    if updated == 0 {
        return Err(StorageError::AccountNotFound(id.to_string()));
    }
    Ok(())
}

pub fn set_subscription_end(
    conn: &Connection,
    id: AccountId,
    end: DateTime<Utc>,
) -> Result<(), StorageError> {
    let updated = conn.execute(
        "UPDATE accounts SET subscription_end = ?1 WHERE id = ?2",
        params![end.to_rfc3339(), id.to_string()],
    )?;
    if updated == 0 {
        return Err(StorageError::AccountNotFound(id.to_string()));
    }
    Ok(())
}

/// One administrative action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub target: String,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Actor recorded for actions taken outside any account (bootstrap).
pub const SYSTEM_ACTOR: &str = "system";

pub fn insert_audit(conn: &Connection, entry: &AuditEntry) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO admin_audit (actor, action, target, detail, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.actor,
            entry.action,
            entry.target,
            entry.detail,
            entry.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Audit rows for a target, oldest first
pub fn audit_for_target(conn: &Connection, target: &str) -> Result<Vec<AuditEntry>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT actor, action, target, detail, created_at FROM admin_audit
         WHERE target = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map(params![target], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (actor, action, target, detail, created_at) = row?;
        entries.push(AuditEntry {
            actor,
            action,
            target,
            detail,
            created_at: parse_timestamp(&created_at)?,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use chrono::{Duration, TimeZone};

    fn conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::migrate(&mut conn).unwrap();
        conn
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_insert_and_lookup() {
        let conn = conn();
        let account = Account::new("Patient@Example.com", "hash", created())
            .with_subscription_end(created() + Duration::days(60));
        insert_account(&conn, &account).unwrap();

        let by_id = get_account_by_id(&conn, account.id).unwrap().unwrap();
        assert_eq!(by_id, account);

        let by_email = get_account_by_email(&conn, "  PATIENT@example.COM ").unwrap().unwrap();
        assert_eq!(by_email.id, account.id);
        assert_eq!(by_email.email, "patient@example.com");
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let conn = conn();
        insert_account(&conn, &Account::new("a@example.com", "h1", created())).unwrap();

        let result = insert_account(&conn, &Account::new("A@example.com", "h2", created()));
        assert!(matches!(result, Err(StorageError::EmailTaken(email)) if email == "a@example.com"));
    }

    #[test]
    fn test_missing_account() {
        let conn = conn();
        assert!(get_account_by_id(&conn, AccountId::new()).unwrap().is_none());
        assert!(matches!(
            set_admin(&conn, AccountId::new(), true),
            Err(StorageError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_timestamp_is_reported() {
        let conn = conn();
        let account = Account::new("x@example.com", "h", created());
        insert_account(&conn, &account).unwrap();
        conn.execute(
            "UPDATE accounts SET created_at = 'yesterday' WHERE id = ?1",
            params![account.id.to_string()],
        )
        .unwrap();

        assert!(matches!(
            get_account_by_id(&conn, account.id),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn test_admin_flag_and_count() {
        let conn = conn();
        let account = Account::new("x@example.com", "h", created());
        insert_account(&conn, &account).unwrap();
        assert_eq!(count_admins(&conn).unwrap(), 0);

        set_admin(&conn, account.id, true).unwrap();
        assert_eq!(count_admins(&conn).unwrap(), 1);
        assert!(get_account_by_id(&conn, account.id).unwrap().unwrap().is_admin);
    }

    #[test]
    fn test_audit_rows_in_order() {
        let conn = conn();
        for action in ["grant_admin", "extend_subscription"] {
            insert_audit(
                &conn,
                &AuditEntry {
                    actor: SYSTEM_ACTOR.to_string(),
                    action: action.to_string(),
                    target: "t".to_string(),
                    detail: None,
                    created_at: created(),
                },
            )
            .unwrap();
        }

        let entries = audit_for_target(&conn, "t").unwrap();
        let actions: Vec<&str> = entries.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["grant_admin", "extend_subscription"]);
        assert!(audit_for_target(&conn, "other").unwrap().is_empty());
    }
}
