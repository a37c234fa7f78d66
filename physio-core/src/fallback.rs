//! Generative fallback contract.
//!
//! A fallback turns a free-text query into a `ProtocolDraft`. It owns prompt
//! construction and raw-response parsing; the pipeline only checks the shape
//! of what comes back.

use async_trait::async_trait;

use crate::types::ProtocolDraft;

/// Reasons a fallback produced no draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FallbackError {
    /// The query is not a recognizable clinical condition
    #[error("Query is not applicable")]
    NotApplicable,

    /// Backend unreachable or not configured
    #[error("Fallback unavailable: {0}")]
    Unavailable(String),

    /// Backend replied with something that is not a protocol payload
    #[error("Malformed fallback output: {0}")]
    Malformed(String),

    /// Gave up waiting for the backend
    #[error("Fallback timed out after {0}ms")]
    Timeout(u64),
}

#[async_trait]
pub trait GenerativeFallback: Send + Sync {
    /// Identifier for logs.
    fn id(&self) -> &str;

    /// Synthesize a protocol for `query`. One attempt, no retries.
    async fn generate(&self, query: &str) -> Result<ProtocolDraft, FallbackError>;
}

/// Fallback used when no generative backend is configured.
#[derive(Debug, Clone, Default)]
pub struct DisabledFallback;

#[async_trait]
impl GenerativeFallback for DisabledFallback {
    fn id(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _query: &str) -> Result<ProtocolDraft, FallbackError> {
        Err(FallbackError::Unavailable(
            "no generative backend configured".to_string(),
        ))
    }
}
