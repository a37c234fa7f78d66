//! Query resolution: structured store match first, generative fallback second.
//!
//! ```text
//! START ─(blank)──────────────────────────────► NOT_FOUND
//!   └─► STORE_LOOKUP ─ hit ─────────────────────► FOUND (store)
//!            ├─ error ──────────────────────────► NOT_FOUND
//!            └─ miss ─► FALLBACK_CALL ─ valid ──► FOUND (fallback)
//!                            └─ invalid/error ──► NOT_FOUND
//! ```

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::fallback::{FallbackError, GenerativeFallback};
use crate::store::ProtocolStore;
use crate::types::ProtocolRecord;

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provenance {
    /// Persisted record matched by substring search
    Store,
    /// Ephemeral record synthesized by the generative fallback
    Fallback,
}

/// A record together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProtocol {
    pub record: ProtocolRecord,
    pub source: Provenance,
}

/// Outcome of resolving a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Found(ResolvedProtocol),
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn source(&self) -> Option<Provenance> {
        match self {
            Resolution::Found(resolved) => Some(resolved.source),
            Resolution::NotFound => None,
        }
    }

    pub fn record(&self) -> Option<&ProtocolRecord> {
        match self {
            Resolution::Found(resolved) => Some(&resolved.record),
            Resolution::NotFound => None,
        }
    }

    pub fn into_record(self) -> Option<ProtocolRecord> {
        match self {
            Resolution::Found(resolved) => Some(resolved.record),
            Resolution::NotFound => None,
        }
    }
}

/// Configuration for the resolution pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on a single fallback call
    pub fallback_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fallback_timeout: Duration::from_secs(15),
        }
    }
}

/// Resolves free-text queries to protocol records.
pub struct QueryResolutionPipeline {
    store: Arc<dyn ProtocolStore>,
    fallback: Arc<dyn GenerativeFallback>,
    config: PipelineConfig,
}

impl QueryResolutionPipeline {
    pub fn new(store: Arc<dyn ProtocolStore>, fallback: Arc<dyn GenerativeFallback>) -> Self {
        Self {
            store,
            fallback,
            config: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Resolve `query_text`. Never fails; every anomaly becomes `NotFound`.
    pub async fn resolve(&self, query_text: &str) -> Resolution {
        let query = query_text.trim();
        if query.is_empty() {
            debug!("Blank query, skipping lookup");
            return Resolution::NotFound;
        }

        match self.store.search_protocols(query).await {
            Ok(hits) => {
                if let Some(record) = hits.into_iter().next() {
                    debug!(query, disease = %record.disease_name, "Structured match");
                    return Resolution::Found(ResolvedProtocol {
                        record,
                        source: Provenance::Store,
                    });
                }
            }
            Err(e) => {
                warn!(query, error = %e, "Protocol store lookup failed");
                return Resolution::NotFound;
            }
        }

        self.resolve_with_fallback(query).await
    }

    async fn resolve_with_fallback(&self, query: &str) -> Resolution {
        let start = Instant::now();
        let timeout = self.config.fallback_timeout;

        let outcome = match tokio::time::timeout(timeout, self.fallback.generate(query)).await {
            Ok(result) => result,
            Err(_) => Err(FallbackError::Timeout(timeout.as_millis() as u64)),
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let draft = match outcome {
            Ok(draft) => draft,
            Err(FallbackError::NotApplicable) => {
                debug!(query, elapsed_ms, "Fallback declined query");
                return Resolution::NotFound;
            }
            Err(e) => {
                warn!(query, fallback = self.fallback.id(), elapsed_ms, error = %e, "Fallback failed");
                return Resolution::NotFound;
            }
        };

        if draft.not_applicable {
            debug!(query, elapsed_ms, "Fallback declined query");
            return Resolution::NotFound;
        }

        match draft.validate() {
            Ok(record) => {
                info!(query, disease = %record.disease_name, elapsed_ms, "Synthesized protocol");
                Resolution::Found(ResolvedProtocol {
                    record,
                    source: Provenance::Fallback,
                })
            }
            Err(e) => {
                warn!(query, fallback = self.fallback.id(), error = %e, "Rejected fallback output");
                Resolution::NotFound
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod doubles {
    use super::*;
    use crate::store::StoreError;
    use crate::types::ProtocolDraft;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// What the scripted fallback does on each call.
    #[derive(Clone)]
    pub enum Script {
        Draft(ProtocolDraft),
        Fail(FallbackError),
        Hang,
    }

    pub struct ScriptedFallback {
        script: Script,
        calls: AtomicU32,
    }

    impl ScriptedFallback {
        pub fn new(script: Script) -> Self {
            Self {
                script,
                calls: AtomicU32::new(0),
            }
        }

        pub fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerativeFallback for ScriptedFallback {
        fn id(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, _query: &str) -> Result<ProtocolDraft, FallbackError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Draft(draft) => Ok(draft.clone()),
                Script::Fail(e) => Err(e.clone()),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(FallbackError::Unavailable("unreachable".to_string()))
                }
            }
        }
    }

    pub struct BrokenStore;

    #[async_trait]
    impl ProtocolStore for BrokenStore {
        async fn search_protocols(&self, _pattern: &str) -> Result<Vec<ProtocolRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::doubles::*;
    use super::*;
    use crate::store::InMemoryProtocolStore;
    use crate::types::fixtures::{complete_draft, record};

    fn knee_store() -> Arc<InMemoryProtocolStore> {
        Arc::new(InMemoryProtocolStore::with_protocols([
            record(1, "Knee Osteoarthritis", "knee pain, oa, stiffness"),
            record(2, "Lumbar Disc Herniation (Sciatica)", "back pain, sciatica, disc"),
        ]))
    }

    fn pipeline(
        store: Arc<dyn ProtocolStore>,
        fallback: Arc<ScriptedFallback>,
    ) -> QueryResolutionPipeline {
        QueryResolutionPipeline::new(store, fallback)
    }

    #[tokio::test]
    async fn test_blank_query_skips_store_and_fallback() {
        let fallback = Arc::new(ScriptedFallback::new(Script::Draft(complete_draft("X"))));
        let pipeline = pipeline(Arc::new(BrokenStore), fallback.clone());

        assert_eq!(pipeline.resolve("").await, Resolution::NotFound);
        assert_eq!(pipeline.resolve("   ").await, Resolution::NotFound);
        assert_eq!(pipeline.resolve("\t\n").await, Resolution::NotFound);
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn test_store_match_is_case_insensitive_substring() {
        let fallback = Arc::new(ScriptedFallback::new(Script::Fail(FallbackError::NotApplicable)));
        let pipeline = pipeline(knee_store(), fallback.clone());

        for query in ["osteo", "KNEE", "  knee pain  "] {
            let resolution = pipeline.resolve(query).await;
            assert_eq!(resolution.source(), Some(Provenance::Store));
            assert_eq!(
                resolution.record().map(|r| r.disease_name.as_str()),
                Some("Knee Osteoarthritis")
            );
        }
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn test_keyword_match() {
        let fallback = Arc::new(ScriptedFallback::new(Script::Fail(FallbackError::NotApplicable)));
        let pipeline = pipeline(knee_store(), fallback);

        let resolution = pipeline.resolve("sciatica").await;
        assert_eq!(resolution.record().and_then(|r| r.id), Some(2));
    }

    #[tokio::test]
    async fn test_first_of_multiple_hits_is_returned() {
        let store = Arc::new(InMemoryProtocolStore::with_protocols([
            record(1, "Knee Osteoarthritis", "pain"),
            record(2, "Shoulder Impingement", "pain"),
        ]));
        let fallback = Arc::new(ScriptedFallback::new(Script::Fail(FallbackError::NotApplicable)));
        let pipeline = pipeline(store, fallback);

        let resolution = pipeline.resolve("pain").await;
        assert_eq!(resolution.record().and_then(|r| r.id), Some(1));
    }

    #[tokio::test]
    async fn test_miss_uses_fallback() {
        let fallback = Arc::new(ScriptedFallback::new(Script::Draft(complete_draft(
            "Frozen Shoulder",
        ))));
        let pipeline = pipeline(Arc::new(InMemoryProtocolStore::new()), fallback.clone());

        let resolution = pipeline.resolve("Frozen Shoulder").await;
        assert_eq!(resolution.source(), Some(Provenance::Fallback));
        let record = resolution.into_record().unwrap();
        assert_eq!(record.disease_name, "Frozen Shoulder");
        assert!(!record.is_persisted());
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn test_partial_fallback_output_is_not_found() {
        let mut draft = complete_draft("Frozen Shoulder");
        draft.disease_name = None;
        let fallback = Arc::new(ScriptedFallback::new(Script::Draft(draft)));
        let pipeline = pipeline(Arc::new(InMemoryProtocolStore::new()), fallback.clone());

        assert_eq!(pipeline.resolve("Frozen Shoulder").await, Resolution::NotFound);
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn test_not_applicable_flag_is_not_found() {
        let mut draft = complete_draft("Frozen Shoulder");
        draft.not_applicable = true;
        let fallback = Arc::new(ScriptedFallback::new(Script::Draft(draft)));
        let pipeline = pipeline(Arc::new(InMemoryProtocolStore::new()), fallback);

        assert_eq!(pipeline.resolve("what is the weather").await, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_fallback_errors_are_not_found() {
        for error in [
            FallbackError::NotApplicable,
            FallbackError::Unavailable("down".to_string()),
            FallbackError::Malformed("not json".to_string()),
        ] {
            let fallback = Arc::new(ScriptedFallback::new(Script::Fail(error)));
            let pipeline = pipeline(Arc::new(InMemoryProtocolStore::new()), fallback.clone());

            assert_eq!(pipeline.resolve("Frozen Shoulder").await, Resolution::NotFound);
            assert_eq!(fallback.call_count(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_timeout_is_not_found() {
        let fallback = Arc::new(ScriptedFallback::new(Script::Hang));
        let pipeline = pipeline(Arc::new(InMemoryProtocolStore::new()), fallback.clone())
            .with_config(PipelineConfig {
                fallback_timeout: Duration::from_millis(50),
            });

        assert_eq!(pipeline.resolve("Frozen Shoulder").await, Resolution::NotFound);
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_does_not_call_fallback() {
        let fallback = Arc::new(ScriptedFallback::new(Script::Draft(complete_draft("X"))));
        let pipeline = pipeline(Arc::new(BrokenStore), fallback.clone());

        assert_eq!(pipeline.resolve("knee").await, Resolution::NotFound);
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let fallback = Arc::new(ScriptedFallback::new(Script::Draft(complete_draft(
            "Frozen Shoulder",
        ))));
        let pipeline = pipeline(knee_store(), fallback);

        for query in ["osteo", "Frozen Shoulder", "   "] {
            let first = pipeline.resolve(query).await;
            let second = pipeline.resolve(query).await;
            assert_eq!(first, second);
        }
    }
}
