//! Persistence collaborator contracts.
//!
//! The core only reads through these traits. Any store that offers
//! case-insensitive substring search with a stable order will do.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::types::{normalize_email, Account, AccountId, ProtocolRecord};

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored row could not be decoded
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Protocol lookups.
#[async_trait]
pub trait ProtocolStore: Send + Sync {
    /// Records whose `disease_name` or `keywords` contain `pattern`
    /// (case-insensitive), in a stable order.
    async fn search_protocols(&self, pattern: &str) -> Result<Vec<ProtocolRecord>, StoreError>;
}

/// Account lookups.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// Lookup is case-insensitive.
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}

/// In-process store, ordered by insertion.
#[derive(Default)]
pub struct InMemoryProtocolStore {
    protocols: RwLock<Vec<ProtocolRecord>>,
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryProtocolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, assigning ids where missing.
    pub fn with_protocols(records: impl IntoIterator<Item = ProtocolRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Append a record, returning its id.
    pub fn insert(&self, mut record: ProtocolRecord) -> i64 {
        let mut protocols = self.protocols.write().unwrap_or_else(|e| e.into_inner());
        let id = record
            .id
            .unwrap_or_else(|| protocols.iter().filter_map(|p| p.id).max().unwrap_or(0) + 1);
        record.id = Some(id);
        protocols.push(record);
        id
    }

    pub fn insert_account(&self, account: Account) {
        self.accounts
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(account);
    }

    pub fn len(&self) -> usize {
        self.protocols.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProtocolStore for InMemoryProtocolStore {
    async fn search_protocols(&self, pattern: &str) -> Result<Vec<ProtocolRecord>, StoreError> {
        let protocols = self
            .protocols
            .read()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {}", e)))?;

        Ok(protocols
            .iter()
            .filter(|record| record.matches(pattern))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AccountStore for InMemoryProtocolStore {
    async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {}", e)))?;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let email = normalize_email(email);
        let accounts = self
            .accounts
            .read()
            .map_err(|e| StoreError::Unavailable(format!("Lock poisoned: {}", e)))?;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }
}
