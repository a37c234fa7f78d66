//! Request facade: gate the account, then resolve the query if one was sent.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::access::{AccessDecision, AccessDecisionEngine};
use crate::pipeline::{QueryResolutionPipeline, Resolution};
use crate::types::Account;

/// What the presentation layer gets back for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeskOutcome {
    /// No identity was presented
    Unauthenticated,
    /// Trial and subscription have both lapsed
    Denied { decision: AccessDecision },
    /// Access granted; `resolution` is present when a query was sent
    Granted {
        decision: AccessDecision,
        #[serde(skip_serializing_if = "Option::is_none")]
        resolution: Option<Resolution>,
    },
}

impl DeskOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, DeskOutcome::Granted { .. })
    }
}

pub struct ProtocolDesk {
    engine: AccessDecisionEngine,
    pipeline: QueryResolutionPipeline,
}

impl ProtocolDesk {
    pub fn new(pipeline: QueryResolutionPipeline) -> Self {
        Self {
            engine: AccessDecisionEngine::new(),
            pipeline,
        }
    }

    pub fn pipeline(&self) -> &QueryResolutionPipeline {
        &self.pipeline
    }

    /// Gate `identity` at `now`; resolve `query` only when access is granted.
    pub async fn handle(
        &self,
        identity: Option<&Account>,
        query: Option<&str>,
        now: DateTime<Utc>,
    ) -> DeskOutcome {
        let Some(account) = identity else {
            return DeskOutcome::Unauthenticated;
        };

        let decision = self.engine.evaluate(account, now);
        if !decision.granted {
            debug!(account_id = %account.id, "Access denied, trial and subscription lapsed");
            return DeskOutcome::Denied { decision };
        }

        let resolution = match query {
            Some(query) => Some(self.pipeline.resolve(query).await),
            None => None,
        };

        DeskOutcome::Granted {
            decision,
            resolution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessBasis, DaysRemaining};
    use crate::fallback::FallbackError;
    use crate::pipeline::doubles::{Script, ScriptedFallback};
    use crate::pipeline::Provenance;
    use crate::store::InMemoryProtocolStore;
    use crate::types::fixtures::record;
    use chrono::Duration;
    use std::sync::Arc;

    fn desk(fallback: Arc<ScriptedFallback>) -> ProtocolDesk {
        let store = Arc::new(InMemoryProtocolStore::with_protocols([record(
            1,
            "Knee Osteoarthritis",
            "knee pain, oa",
        )]));
        ProtocolDesk::new(QueryResolutionPipeline::new(store, fallback))
    }

    fn unused_fallback() -> Arc<ScriptedFallback> {
        Arc::new(ScriptedFallback::new(Script::Fail(FallbackError::NotApplicable)))
    }

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        let outcome = tokio_test::block_on(desk(unused_fallback()).handle(
            None,
            Some("knee"),
            Utc::now(),
        ));
        assert_eq!(outcome, DeskOutcome::Unauthenticated);
    }

    #[tokio::test]
    async fn test_expired_account_is_denied_without_lookup() {
        let fallback = unused_fallback();
        let desk = desk(fallback.clone());
        let created = Utc::now() - Duration::days(45);
        let account = Account::new("late@example.com", "hash", created);

        let outcome = desk.handle(Some(&account), Some("shoulder"), Utc::now()).await;

        match outcome {
            DeskOutcome::Denied { decision } => {
                assert_eq!(decision.basis, AccessBasis::Expired);
                assert_eq!(decision.days_remaining, DaysRemaining::Days(0));
            }
            other => panic!("expected denial, got {:?}", other),
        }
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn test_granted_request_resolves_query() {
        let now = Utc::now();
        let account = Account::new("new@example.com", "hash", now);

        let outcome = desk(unused_fallback())
            .handle(Some(&account), Some("OSTEO"), now)
            .await;

        match outcome {
            DeskOutcome::Granted {
                decision,
                resolution: Some(resolution),
            } => {
                assert_eq!(decision.days_remaining, DaysRemaining::Days(30));
                assert_eq!(resolution.source(), Some(Provenance::Store));
            }
            other => panic!("expected granted resolution, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_granted_request_without_query() {
        let now = Utc::now();
        let admin = Account::new("admin@example.com", "hash", now - Duration::days(900))
            .with_admin(true);

        let outcome = desk(unused_fallback()).handle(Some(&admin), None, now).await;

        assert!(outcome.is_granted());
        assert_eq!(
            outcome,
            DeskOutcome::Granted {
                decision: AccessDecision {
                    granted: true,
                    days_remaining: DaysRemaining::Unlimited,
                    basis: AccessBasis::Admin,
                },
                resolution: None,
            }
        );
    }
}
