//! Physio Desk - trial-gated physiotherapy protocol lookup
//!
//! Operator binary: opens the SQLite store, wires the resolution pipeline
//! to the configured LLM backend (or a disabled fallback) and runs one
//! subcommand, printing its result as JSON on stdout.

mod cli;
mod config;

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use physio_agent::{LlmBackend, LlmFallbackAdapter, OpenAiBackend};
use physio_core::{
    DisabledFallback, GenerativeFallback, PipelineConfig, ProtocolDesk, QueryResolutionPipeline,
};
use physio_storage::PhysioDb;

use cli::{Commands, Services};
use config::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into());
    tracing_subscriber::registry()
        .with(filter)
        .with(args.log_json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!args.log_json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let db = Arc::new(
        PhysioDb::open(&args.db_path)
            .with_context(|| format!("Failed to open database {}", args.db_path.display()))?,
    );

    let fallback = build_fallback(&args).await?;
    info!(
        db = %args.db_path.display(),
        fallback = fallback.id(),
        timeout_ms = args.fallback_timeout_ms,
        "Physio Desk ready"
    );

    let pipeline = QueryResolutionPipeline::new(db.clone(), fallback).with_config(PipelineConfig {
        fallback_timeout: args.fallback_timeout(),
    });
    let services = Services {
        db,
        desk: ProtocolDesk::new(pipeline),
    };

    let output = cli::execute(&services, args.command, Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// LLM-backed fallback when a base URL is configured, otherwise a disabled one.
///
/// Before a search the backend is checked once; an unreachable server is
/// only logged, since the pipeline already degrades to "not found".
async fn build_fallback(args: &Args) -> anyhow::Result<Arc<dyn GenerativeFallback>> {
    let Some(base_url) = args.llm_base_url.as_deref().filter(|_| args.fallback_enabled()) else {
        info!("LLM_BASE_URL not set; generative fallback disabled");
        return Ok(Arc::new(DisabledFallback));
    };

    let backend = OpenAiBackend::with_timeout(
        base_url,
        args.llm_model.clone(),
        args.llm_api_key.clone(),
        args.fallback_timeout(),
    )
    .context("Failed to create LLM backend")?;

    if matches!(args.command, Commands::Search { .. }) && !backend.is_available().await {
        warn!(base_url, "LLM backend is not reachable; uncatalogued queries will not resolve");
    }

    info!(base_url, model = %args.llm_model, "Generative fallback enabled");
    Ok(Arc::new(LlmFallbackAdapter::new(Arc::new(backend))))
}
