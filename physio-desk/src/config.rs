//! Configuration for Physio Desk
//!
//! CLI arguments and environment variable handling using clap. A `.env`
//! file in the working directory is loaded before parsing.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Commands;

/// Physio Desk - physiotherapy protocol lookup
#[derive(Parser, Debug)]
#[command(name = "physio-desk")]
#[command(about = "Trial-gated physiotherapy protocol lookup with generative fallback")]
pub struct Args {
    /// SQLite database file
    #[arg(long, env = "PHYSIO_DB_PATH", default_value = "physio.db")]
    pub db_path: PathBuf,

    /// OpenAI-compatible API base URL (e.g. https://api.openai.com/v1).
    /// When unset the generative fallback is disabled.
    #[arg(long, env = "LLM_BASE_URL")]
    pub llm_base_url: Option<String>,

    /// Model used for the generative fallback
    #[arg(long, env = "LLM_MODEL", default_value = "gpt-4o-mini")]
    pub llm_model: String,

    /// Bearer token for the LLM API
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    /// Upper bound on one fallback invocation, in milliseconds
    #[arg(long, env = "FALLBACK_TIMEOUT_MS", default_value = "15000")]
    pub fallback_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fallback_timeout_ms == 0 {
            return Err("FALLBACK_TIMEOUT_MS must be greater than zero".to_string());
        }

        if self.llm_model.trim().is_empty() {
            return Err("LLM_MODEL must not be empty".to_string());
        }

        if let Some(url) = &self.llm_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("LLM_BASE_URL must be an http(s) URL, got {:?}", url));
            }
        }

        Ok(())
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_millis(self.fallback_timeout_ms)
    }

    /// Whether a generative backend is configured
    pub fn fallback_enabled(&self) -> bool {
        self.llm_base_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Default tracing filter when RUST_LOG is not set
    pub fn log_filter(&self) -> String {
        let level = &self.log_level;
        format!(
            "physio_desk={level},physio_core={level},physio_agent={level},physio_storage={level},warn"
        )
    }
}
