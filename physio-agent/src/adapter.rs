//! `GenerativeFallback` implementation over an `LlmBackend`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use physio_core::{FallbackError, GenerativeFallback, ProtocolDraft};

use crate::backend::traits::{CompletionRequest, FinishReason, LlmBackend, LlmError};
use crate::prompt::PromptAssembler;

/// Configuration for completion requests.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum tokens per protocol
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1500,
            temperature: 0.3,
        }
    }
}

/// Asks an LLM backend to synthesize a protocol for a query.
pub struct LlmFallbackAdapter {
    backend: Arc<dyn LlmBackend>,
    config: AgentConfig,
    system_prompt: String,
}

impl LlmFallbackAdapter {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            backend,
            config: AgentConfig::default(),
            system_prompt: PromptAssembler::build_system_prompt(),
        }
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    fn build_request(&self, query: &str) -> CompletionRequest {
        CompletionRequest::user(PromptAssembler::build_user_prompt(query))
            .with_system(&self.system_prompt)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature)
            .with_json_output()
    }
}

#[async_trait]
impl GenerativeFallback for LlmFallbackAdapter {
    fn id(&self) -> &str {
        self.backend.id()
    }

    async fn generate(&self, query: &str) -> Result<ProtocolDraft, FallbackError> {
        let completion = self
            .backend
            .complete(self.build_request(query))
            .await
            .map_err(into_fallback_error)?;

        debug!(
            backend = self.backend.id(),
            tokens = completion.usage.total(),
            finish_reason = ?completion.finish_reason,
            "Fallback completion received"
        );

        match completion.finish_reason {
            FinishReason::Stop => parse_reply(&completion.content),
            FinishReason::Length => Err(FallbackError::Malformed(
                "completion truncated at max_tokens".to_string(),
            )),
            FinishReason::ContentFilter => Err(FallbackError::NotApplicable),
        }
    }
}

fn into_fallback_error(error: LlmError) -> FallbackError {
    match error {
        LlmError::ParseError(msg) => FallbackError::Malformed(msg),
        other => FallbackError::Unavailable(other.to_string()),
    }
}

/// Parse a backend reply into a draft, tolerating a Markdown code fence.
pub fn parse_reply(content: &str) -> Result<ProtocolDraft, FallbackError> {
    let body = strip_code_fence(content);
    if body.is_empty() {
        return Err(FallbackError::Malformed("empty reply".to_string()));
    }

    serde_json::from_str::<ProtocolDraft>(body)
        .map_err(|e| FallbackError::Malformed(e.to_string()))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use physio_core::{
        InMemoryProtocolStore, PipelineConfig, Provenance, QueryResolutionPipeline, Resolution,
    };
    use std::time::Duration;

    const FROZEN_SHOULDER: &str = r#"{
        "disease_name": "Frozen Shoulder",
        "keywords": "adhesive capsulitis, stiffness",
        "description": "Inflamed, contracted glenohumeral capsule.",
        "electrotherapy": {
            "kind": "TENS (High Rate)",
            "parameters": "100 Hz, 80 us, 20 mins",
            "placement": "Bracket the joint",
            "purpose": "Pain modulation"
        },
        "ultrasound": {
            "kind": "Indicated (Continuous)",
            "parameters": "1 MHz, 1.5 W/cm2",
            "purpose": "Deep heating"
        },
        "exercises": "1. Pendulum\n2. Wall climb",
        "reference": "JOSPT Guidelines"
    }"#;

    fn adapter(backend: Arc<MockBackend>) -> LlmFallbackAdapter {
        LlmFallbackAdapter::new(backend)
    }

    #[tokio::test]
    async fn test_generate_parses_draft() {
        let backend = Arc::new(MockBackend::default().with_response(FROZEN_SHOULDER));
        let draft = adapter(backend.clone()).generate("frozen shoulder").await.unwrap();

        assert_eq!(draft.disease_name.as_deref(), Some("Frozen Shoulder"));
        assert!(!draft.not_applicable);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_json_mode() {
        let backend = Arc::new(MockBackend::default().with_response(FROZEN_SHOULDER));
        adapter(backend.clone())
            .with_config(AgentConfig {
                max_tokens: 900,
                temperature: 0.1,
            })
            .generate("frozen shoulder")
            .await
            .unwrap();

        let request = backend.last_request().unwrap();
        assert!(request.json_output);
        assert_eq!(request.max_tokens, Some(900));
        assert!(request.messages[0].content.contains("frozen shoulder"));
        assert!(request
            .system_prompt
            .as_deref()
            .unwrap_or_default()
            .contains("RESPONSE FORMAT"));
    }

    #[tokio::test]
    async fn test_fenced_reply_is_accepted() {
        let fenced = format!("```json\n{}\n```", FROZEN_SHOULDER);
        let backend = Arc::new(MockBackend::default().with_response(fenced));

        let draft = adapter(backend).generate("frozen shoulder").await.unwrap();
        assert_eq!(draft.reference.as_deref(), Some("JOSPT Guidelines"));
    }

    #[tokio::test]
    async fn test_prose_reply_is_malformed() {
        let backend = Arc::new(
            MockBackend::default().with_response("Frozen shoulder is treated with heat."),
        );
        let result = adapter(backend).generate("frozen shoulder").await;
        assert!(matches!(result, Err(FallbackError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_not_applicable_reply() {
        let backend = Arc::new(MockBackend::default().with_response(r#"{"not_applicable": true}"#));
        let draft = adapter(backend).generate("tomorrow's weather").await.unwrap();
        assert!(draft.not_applicable);
    }

    #[tokio::test]
    async fn test_truncated_reply_is_malformed() {
        let backend = Arc::new(
            MockBackend::default()
                .with_response(FROZEN_SHOULDER)
                .with_finish_reason(FinishReason::Length),
        );
        let result = adapter(backend).generate("frozen shoulder").await;
        assert!(matches!(result, Err(FallbackError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unavailable_backend() {
        let backend = Arc::new(MockBackend::default().with_available(false));
        let result = adapter(backend).generate("frozen shoulder").await;
        assert!(matches!(result, Err(FallbackError::Unavailable(_))));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```"), "");
    }

    #[tokio::test]
    async fn test_pipeline_with_llm_fallback() {
        let backend = Arc::new(MockBackend::default().with_response(FROZEN_SHOULDER));
        let pipeline = QueryResolutionPipeline::new(
            Arc::new(InMemoryProtocolStore::new()),
            Arc::new(adapter(backend.clone())),
        )
        .with_config(PipelineConfig {
            fallback_timeout: Duration::from_secs(1),
        });

        let resolution = pipeline.resolve("Frozen Shoulder").await;
        assert_eq!(resolution.source(), Some(Provenance::Fallback));

        let backend = Arc::new(MockBackend::default().with_response(r#"{"keywords": "x"}"#));
        let pipeline = QueryResolutionPipeline::new(
            Arc::new(InMemoryProtocolStore::new()),
            Arc::new(adapter(backend)),
        );
        assert_eq!(pipeline.resolve("Frozen Shoulder").await, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_rate_limited_backend_resolves_to_not_found() {
        use crate::backend::OpenAiBackend;
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).insert_header("retry-after", "18446744073709551615"),
            )
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(server.uri(), "m", None).unwrap();
        let fallback = LlmFallbackAdapter::new(Arc::new(backend));
        assert!(matches!(
            fallback.generate("frozen shoulder").await,
            Err(FallbackError::Unavailable(_))
        ));

        let pipeline =
            QueryResolutionPipeline::new(Arc::new(InMemoryProtocolStore::new()), Arc::new(fallback));
        assert_eq!(pipeline.resolve("Frozen Shoulder").await, Resolution::NotFound);
    }
}
