//! Physio Agent - generative protocol fallback
//!
//! Wraps an LLM backend behind the core's `GenerativeFallback` contract:
//! builds the prompt, requests JSON output, and parses the reply into a
//! `ProtocolDraft`. Validation of the draft stays in the core pipeline.
//!
//! ```text
//! ┌──────────────────────────┐
//! │   LlmFallbackAdapter     │  impl GenerativeFallback
//! └────────────┬─────────────┘
//!              ▼
//! ┌──────────────────────────┐
//! │ LlmBackend (OpenAI/Mock) │
//! └──────────────────────────┘
//! ```

pub mod adapter;
pub mod backend;
pub mod prompt;

pub use adapter::{parse_reply, AgentConfig, LlmFallbackAdapter};
pub use backend::{CompletionRequest, CompletionResponse, LlmBackend, LlmError, MockBackend, OpenAiBackend};
pub use prompt::PromptAssembler;
