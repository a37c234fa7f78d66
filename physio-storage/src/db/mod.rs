//! SQLite database for accounts and protocols
//!
//! ## Tables
//!
//! - `accounts` - Credentials, trial anchor, admin flag, subscription end
//! - `protocols` - Curated treatment protocols
//! - `admin_audit` - Administrative provisioning trail
//!
//! Administrative writes re-read the acting account from the database
//! before the role check, so a stale in-memory `Account` cannot grant
//! itself anything.

pub mod accounts;
pub mod protocols;
pub mod schema;

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, info, warn};

use physio_core::{
    Account, AccountId, AccountStore, Capability, ProtocolRecord, ProtocolStore, Provenance,
    ResolvedProtocol, RoleGate, StoreError,
};

use crate::error::StorageError;
use crate::password;
use crate::seed;

pub use accounts::{AuditEntry, SYSTEM_ACTOR};

/// SQLite-backed store
pub struct PhysioDb {
    conn: Mutex<Connection>,
    gate: RoleGate,
}

impl PhysioDb {
    /// Open or create the database file and apply pending migrations
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening SQLite database at {:?}", path);

        let conn = Connection::open(path)
            .map_err(|e| StorageError::Internal(format!("Failed to open SQLite: {}", e)))?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| StorageError::Internal(format!("Failed to set PRAGMA: {}", e)))?;

        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        debug!("Opening in-memory SQLite database");

        let conn = Connection::open_in_memory().map_err(|e| {
            StorageError::Internal(format!("Failed to open in-memory SQLite: {}", e))
        })?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        let db = Self {
            conn: Mutex::new(conn),
            gate: RoleGate::new(),
        };
        db.with_conn_mut(schema::migrate)?;
        db.with_conn(protocols::register_functions)?;
        Ok(db)
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Internal(format!("Lock poisoned: {}", e)))?;
        f(&conn)
    }

    /// Execute a write operation with exclusive access
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StorageError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Internal(format!("Lock poisoned: {}", e)))?;
        f(&mut conn)
    }

    pub fn schema_version(&self) -> Result<i32, StorageError> {
        self.with_conn(schema::get_schema_version)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Create an account with an Argon2id password hash.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Account, StorageError> {
        if email.trim().is_empty() {
            return Err(StorageError::InvalidInput("email must not be empty".to_string()));
        }
        if password.is_empty() {
            return Err(StorageError::InvalidInput("password must not be empty".to_string()));
        }

        let hash = password::hash_password(password)?;
        let account = Account::new(email, hash, now);
        self.with_conn(|conn| accounts::insert_account(conn, &account))?;

        info!(account_id = %account.id, email = %account.email, "Account registered");
        Ok(account)
    }

    /// The account if the password matches, `None` otherwise.
    pub fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, StorageError> {
        let Some(account) = self.account_by_email(email)? else {
            debug!("Credential check for unknown email");
            return Ok(None);
        };

        if password::verify_password(password, &account.password_hash)? {
            Ok(Some(account))
        } else {
            debug!(account_id = %account.id, "Credential check failed");
            Ok(None)
        }
    }

    pub fn account_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        self.with_conn(|conn| accounts::get_account_by_id(conn, id))
    }

    pub fn account_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        self.with_conn(|conn| accounts::get_account_by_email(conn, email))
    }

    /// Re-read the actor and check it against the role gate.
    fn require_admin(&self, conn: &Connection, actor: &Account) -> Result<Account, StorageError> {
        let current = accounts::get_account_by_id(conn, actor.id)?
            .ok_or_else(|| StorageError::AccountNotFound(actor.id.to_string()))?;

        if !self.gate.authorize(Some(&current), Capability::AdminOnly) {
            warn!(actor = %actor.id, "Administrative action refused");
            return Err(StorageError::Unauthorized {
                actor: actor.id,
                required: Capability::AdminOnly,
            });
        }
        Ok(current)
    }

    fn require_account(conn: &Connection, id: AccountId) -> Result<Account, StorageError> {
        accounts::get_account_by_id(conn, id)?
            .ok_or_else(|| StorageError::AccountNotFound(id.to_string()))
    }

    /// Promote `target` to administrator. The actor must be an administrator.
    pub fn grant_admin(&self, actor: &Account, target: AccountId) -> Result<Account, StorageError> {
        let granted = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            self.require_admin(&tx, actor)?;
            let mut account = Self::require_account(&tx, target)?;

            accounts::set_admin(&tx, target, true)?;
            accounts::insert_audit(
                &tx,
                &AuditEntry {
                    actor: actor.id.to_string(),
                    action: "grant_admin".to_string(),
                    target: target.to_string(),
                    detail: None,
                    created_at: Utc::now(),
                },
            )?;
            tx.commit()?;

            account.is_admin = true;
            Ok(account)
        })?;

        info!(actor = %actor.id, target = %target, "Administrator granted");
        Ok(granted)
    }

    /// Promote the first administrator. Refused once any administrator exists.
    pub fn bootstrap_admin(&self, target: AccountId) -> Result<Account, StorageError> {
        let granted = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if accounts::count_admins(&tx)? > 0 {
                return Err(StorageError::AlreadyBootstrapped);
            }
            let mut account = Self::require_account(&tx, target)?;

            accounts::set_admin(&tx, target, true)?;
            accounts::insert_audit(
                &tx,
                &AuditEntry {
                    actor: SYSTEM_ACTOR.to_string(),
                    action: "bootstrap_admin".to_string(),
                    target: target.to_string(),
                    detail: None,
                    created_at: Utc::now(),
                },
            )?;
            tx.commit()?;

            account.is_admin = true;
            Ok(account)
        })?;

        info!(target = %target, "First administrator bootstrapped");
        Ok(granted)
    }

    /// Move a subscription end forward. Never shortens or back-dates.
    pub fn extend_subscription(
        &self,
        actor: &Account,
        target: AccountId,
        new_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Account, StorageError> {
        let extended = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            self.require_admin(&tx, actor)?;
            let mut account = Self::require_account(&tx, target)?;

            let floor = account.subscription_end.map_or(now, |end| end.max(now));
            if new_end <= floor {
                return Err(StorageError::SubscriptionRegression {
                    current: floor.to_rfc3339(),
                    requested: new_end.to_rfc3339(),
                });
            }

            accounts::set_subscription_end(&tx, target, new_end)?;
            accounts::insert_audit(
                &tx,
                &AuditEntry {
                    actor: actor.id.to_string(),
                    action: "extend_subscription".to_string(),
                    target: target.to_string(),
                    detail: Some(new_end.to_rfc3339()),
                    created_at: now,
                },
            )?;
            tx.commit()?;

            account.subscription_end = Some(new_end);
            Ok(account)
        })?;

        info!(
            actor = %actor.id,
            target = %target,
            subscription_end = %new_end,
            "Subscription extended"
        );
        Ok(extended)
    }

    /// Administrative actions recorded against an account, oldest first.
    pub fn audit_log(&self, target: AccountId) -> Result<Vec<AuditEntry>, StorageError> {
        self.with_conn(|conn| accounts::audit_for_target(conn, &target.to_string()))
    }

    // =========================================================================
    // Protocols
    // =========================================================================

    pub fn search(&self, query: &str) -> Result<Vec<ProtocolRecord>, StorageError> {
        self.with_conn(|conn| protocols::search_protocols(conn, query))
    }

    pub fn get_protocol(&self, id: i64) -> Result<Option<ProtocolRecord>, StorageError> {
        self.with_conn(|conn| protocols::get_protocol(conn, id))
    }

    pub fn list_protocols(&self) -> Result<Vec<ProtocolRecord>, StorageError> {
        self.with_conn(protocols::list_protocols)
    }

    pub fn protocol_count(&self) -> Result<u64, StorageError> {
        self.with_conn(protocols::count_protocols)
    }

    /// Add a curated protocol. Returns the new id.
    pub fn add_protocol(&self, actor: &Account, record: &ProtocolRecord) -> Result<i64, StorageError> {
        let id = self.with_conn(|conn| {
            self.require_admin(conn, actor)?;
            protocols::insert_protocol(conn, record)
        })?;

        info!(actor = %actor.id, protocol_id = id, disease = %record.disease_name, "Protocol added");
        Ok(id)
    }

    pub fn remove_protocol(&self, actor: &Account, id: i64) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            self.require_admin(conn, actor)?;
            protocols::delete_protocol(conn, id)
        })?;

        info!(actor = %actor.id, protocol_id = id, "Protocol removed");
        Ok(())
    }

    /// Store a fallback-synthesized record so later lookups hit the store.
    pub fn persist_ephemeral(
        &self,
        actor: &Account,
        resolved: &ResolvedProtocol,
    ) -> Result<i64, StorageError> {
        if resolved.source != Provenance::Fallback || resolved.record.is_persisted() {
            return Err(StorageError::InvalidInput(
                "only fallback-synthesized records can be persisted".to_string(),
            ));
        }
        self.add_protocol(actor, &resolved.record)
    }

    /// Insert the built-in catalog into an empty table. Returns rows inserted.
    pub fn seed_catalog(&self) -> Result<usize, StorageError> {
        let inserted = self.with_conn_mut(|conn| {
            if protocols::count_protocols(conn)? > 0 {
                return Ok(0);
            }

            let tx = conn.transaction()?;
            let records = seed::catalog();
            for record in &records {
                protocols::insert_protocol(&tx, record)?;
            }
            tx.commit()?;
            Ok(records.len())
        })?;

        if inserted > 0 {
            info!(count = inserted, "Seeded protocol catalog");
        } else {
            debug!("Protocol table already populated; seed skipped");
        }
        Ok(inserted)
    }
}

#[async_trait]
impl ProtocolStore for PhysioDb {
    async fn search_protocols(&self, pattern: &str) -> Result<Vec<ProtocolRecord>, StoreError> {
        self.search(pattern).map_err(StoreError::from)
    }
}

#[async_trait]
impl AccountStore for PhysioDb {
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        self.account_by_id(id).map_err(StoreError::from)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.account_by_email(email).map_err(StoreError::from)
    }
}
