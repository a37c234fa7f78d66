//! Error types for physio-storage

use thiserror::Error;

use physio_core::{AccountId, Capability, StoreError};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Protocol not found: {0}")]
    ProtocolNotFound(i64),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Account {actor} lacks capability {required}")]
    Unauthorized { actor: AccountId, required: Capability },

    #[error("Subscription can only be extended: current end {current}, requested {requested}")]
    SubscriptionRegression { current: String, requested: String },

    #[error("An administrator already exists; use grant instead of bootstrap")]
    AlreadyBootstrapped,

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for StoreError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Corrupt(msg) => StoreError::Corrupt(msg),
            StorageError::Internal(msg) => StoreError::Unavailable(msg),
            other => StoreError::QueryFailed(other.to_string()),
        }
    }
}
