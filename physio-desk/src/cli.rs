//! Subcommands and their execution
//!
//! Every command returns a JSON value; `main` prints it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Subcommand};
use serde_json::{json, Value};
use tracing::{info, warn};

use physio_core::{
    Account, AccessDecisionEngine, DeskOutcome, ProtocolDesk, ProtocolDraft, Resolution,
};
use physio_storage::PhysioDb;

/// Email and password identifying the caller
#[derive(Debug, Args)]
pub struct Credentials {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "PHYSIO_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply migrations and seed the catalog if empty
    Migrate,

    /// Create an account; the free trial starts now
    Register {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Show the access decision for an account
    Access {
        /// Account email
        #[arg(long)]
        email: String,
    },

    /// Look up a protocol for a condition
    Search {
        #[command(flatten)]
        credentials: Credentials,

        /// Condition or symptom, e.g. "frozen shoulder"
        query: String,

        /// Store a synthesized result in the catalog (administrators only)
        #[arg(long)]
        persist: bool,
    },

    /// Administrative provisioning
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Catalog management
    #[command(subcommand)]
    Protocol(ProtocolCommands),
}

#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Promote the first administrator (only while none exists)
    Bootstrap {
        /// Email of the account to promote
        #[arg(long)]
        target: String,
    },

    /// Promote another account to administrator
    Grant {
        #[command(flatten)]
        credentials: Credentials,

        /// Email of the account to promote
        #[arg(long)]
        target: String,
    },

    /// Move an account's subscription end forward
    Extend {
        #[command(flatten)]
        credentials: Credentials,

        /// Email of the account to extend
        #[arg(long)]
        target: String,

        /// Days to add to the later of the current end and now
        #[arg(long, conflicts_with = "until", required_unless_present = "until")]
        days: Option<u32>,

        /// Explicit new end (RFC 3339)
        #[arg(long)]
        until: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProtocolCommands {
    /// Add a protocol from a JSON or YAML file
    Add {
        #[command(flatten)]
        credentials: Credentials,

        /// Path to the protocol file
        file: PathBuf,
    },

    /// Remove a protocol by id
    Remove {
        #[command(flatten)]
        credentials: Credentials,

        id: i64,
    },

    /// List all protocols
    List,
}

/// Wired services a command runs against
pub struct Services {
    pub db: Arc<PhysioDb>,
    pub desk: ProtocolDesk,
}

impl Services {
    fn authenticate(&self, credentials: &Credentials) -> anyhow::Result<Account> {
        self.db
            .verify_credentials(&credentials.email, &credentials.password)?
            .ok_or_else(|| anyhow!("Invalid email or password"))
    }

    fn account(&self, email: &str) -> anyhow::Result<Account> {
        self.db
            .account_by_email(email)?
            .ok_or_else(|| anyhow!("No account registered for {}", email))
    }
}

pub async fn execute(ctx: &Services, command: Commands, now: DateTime<Utc>) -> anyhow::Result<Value> {
    match command {
        Commands::Migrate => {
            let seeded = ctx.db.seed_catalog()?;
            Ok(json!({
                "schema_version": ctx.db.schema_version()?,
                "seeded": seeded,
                "protocols": ctx.db.protocol_count()?,
            }))
        }

        Commands::Register { credentials } => {
            let account = ctx
                .db
                .register(&credentials.email, &credentials.password, now)
                .context("Registration failed")?;
            Ok(serde_json::to_value(account)?)
        }

        Commands::Access { email } => {
            let account = ctx.account(&email)?;
            let decision = AccessDecisionEngine::new().evaluate(&account, now);
            Ok(json!({ "email": account.email, "access": decision }))
        }

        Commands::Search {
            credentials,
            query,
            persist,
        } => search(ctx, credentials, &query, persist, now).await,

        Commands::Admin(cmd) => admin(ctx, cmd, now),

        Commands::Protocol(cmd) => protocol(ctx, cmd),
    }
}

async fn search(
    ctx: &Services,
    credentials: Credentials,
    query: &str,
    persist: bool,
    now: DateTime<Utc>,
) -> anyhow::Result<Value> {
    // Bad credentials are reported as an unauthenticated outcome, not an error.
    let account = ctx
        .db
        .verify_credentials(&credentials.email, &credentials.password)?;
    let outcome = ctx.desk.handle(account.as_ref(), Some(query), now).await;

    let mut persisted_id = None;
    let mut persist_error = None;
    if persist {
        match (&outcome, account.as_ref()) {
            (
                DeskOutcome::Granted {
                    resolution: Some(Resolution::Found(resolved)),
                    ..
                },
                Some(actor),
            ) if resolved.record.id.is_none() => match ctx.db.persist_ephemeral(actor, resolved) {
                Ok(id) => {
                    info!(protocol_id = id, "Synthesized protocol persisted");
                    persisted_id = Some(id);
                }
                // The lookup itself succeeded; report the outcome regardless.
                Err(e) => {
                    warn!(error = %e, "Could not persist synthesized protocol");
                    persist_error = Some(e.to_string());
                }
            },
            _ => warn!("--persist ignored: no synthesized protocol to store"),
        }
    }

    let mut value = serde_json::to_value(&outcome)?;
    if let Some(map) = value.as_object_mut() {
        if let Some(id) = persisted_id {
            map.insert("persisted_id".to_string(), json!(id));
        }
        if let Some(error) = persist_error {
            map.insert("persist_error".to_string(), json!(error));
        }
    }
    Ok(value)
}

fn admin(ctx: &Services, command: AdminCommands, now: DateTime<Utc>) -> anyhow::Result<Value> {
    let account = match command {
        AdminCommands::Bootstrap { target } => {
            let target = ctx.account(&target)?;
            ctx.db.bootstrap_admin(target.id)?
        }

        AdminCommands::Grant {
            credentials,
            target,
        } => {
            let actor = ctx.authenticate(&credentials)?;
            let target = ctx.account(&target)?;
            ctx.db.grant_admin(&actor, target.id)?
        }

        AdminCommands::Extend {
            credentials,
            target,
            days,
            until,
        } => {
            let actor = ctx.authenticate(&credentials)?;
            let target = ctx.account(&target)?;
            let new_end = match (until, days) {
                (Some(until), _) => until,
                (None, Some(days)) => extension_end(target.subscription_end, now, days)?,
                (None, None) => bail!("Either --days or --until is required"),
            };
            ctx.db.extend_subscription(&actor, target.id, new_end, now)?
        }
    };

    let audit = ctx.db.audit_log(account.id)?;
    Ok(json!({ "account": account, "audit": audit }))
}

/// `days` after the later of the current end and `now`
fn extension_end(
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    days: u32,
) -> anyhow::Result<DateTime<Utc>> {
    let start = current.map_or(now, |end| end.max(now));
    Duration::try_days(i64::from(days))
        .and_then(|span| start.checked_add_signed(span))
        .ok_or_else(|| anyhow!("--days {} is out of range", days))
}

fn protocol(ctx: &Services, command: ProtocolCommands) -> anyhow::Result<Value> {
    match command {
        ProtocolCommands::Add { credentials, file } => {
            let actor = ctx.authenticate(&credentials)?;
            let draft = read_draft(&file)?;
            let record = draft
                .validate()
                .with_context(|| format!("{} is not a complete protocol", file.display()))?;
            let id = ctx.db.add_protocol(&actor, &record)?;
            Ok(json!({ "id": id, "disease_name": record.disease_name }))
        }

        ProtocolCommands::Remove { credentials, id } => {
            let actor = ctx.authenticate(&credentials)?;
            ctx.db.remove_protocol(&actor, id)?;
            Ok(json!({ "removed": id }))
        }

        ProtocolCommands::List => Ok(serde_json::to_value(ctx.db.list_protocols()?)?),
    }
}

/// Read a protocol file; `.yaml`/`.yml` as YAML, anything else as JSON.
fn read_draft(path: &Path) -> anyhow::Result<ProtocolDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML in {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}
