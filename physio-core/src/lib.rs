//! Physio Desk core - access decisions and protocol lookup
//!
//! Three pieces of decision logic sit behind a time-boxed protocol lookup tool:
//! - **AccessDecisionEngine**: 30-day trial, administrator-set subscription
//!   extensions, administrator bypass
//! - **RoleGate**: capability check for management operations
//! - **QueryResolutionPipeline**: substring match against stored protocols,
//!   with a generative fallback whose output is validated before use
//!
//! # Architecture
//!
//! ```text
//! request (identity, query?)
//!        │
//!        ▼
//! ┌──────────────────────┐   denied
//! │ AccessDecisionEngine │──────────► DeskOutcome::Denied
//! └──────────┬───────────┘
//!            ▼
//! ┌──────────────────────┐      ┌────────────────────┐
//! │QueryResolutionPipeline│────►│ ProtocolStore      │
//! │                      │      └────────────────────┘
//! │                      │      ┌────────────────────┐
//! │                      │────►│ GenerativeFallback │
//! └──────────────────────┘      └────────────────────┘
//! ```
//!
//! The store and the fallback are injected; nothing here reads global state.

pub mod access;
pub mod desk;
pub mod fallback;
pub mod pipeline;
pub mod role;
pub mod store;
pub mod types;

pub use access::{AccessBasis, AccessDecision, AccessDecisionEngine, DaysRemaining, TRIAL_PERIOD_DAYS};
pub use desk::{DeskOutcome, ProtocolDesk};
pub use fallback::{DisabledFallback, FallbackError, GenerativeFallback};
pub use pipeline::{PipelineConfig, Provenance, QueryResolutionPipeline, Resolution, ResolvedProtocol};
pub use role::{Capability, RoleGate};
pub use store::{AccountStore, InMemoryProtocolStore, ProtocolStore, StoreError};
pub use types::*;
