//! Museum portal CLI
//!
//! Command-line front end to the museum-management REST API: log in once,
//! then list, inspect and change the status of records the way the admin
//! and staff portals do.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use museum_client::{ClientConfig, FileStorage, PortalContext};
use museum_core::models::{
    Account, Area, Artifact, DisplayPosition, Exhibition, HistoricalContext, Interaction, Museum,
    Role, Visitor,
};
use museum_core::pagination::{ListQuery, DEFAULT_PAGE_SIZE};

mod commands;
mod output;

use output::OutputFormat;

/// Session file used when `MUSEUM_SESSION_FILE` is not set.
const DEFAULT_SESSION_FILE: &str = ".museum-session.json";

#[derive(Parser)]
#[command(name = "museum")]
#[command(version)]
#[command(about = "Museum management portal client", long_about = None)]
struct Cli {
    /// API base URL (overrides VITE_API_BASE_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Session file (overrides MUSEUM_SESSION_FILE)
    #[arg(long, value_name = "FILE")]
    session_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceKind {
    Museums,
    Roles,
    Accounts,
    Areas,
    Artifacts,
    DisplayPositions,
    Exhibitions,
    HistoricalContexts,
    Visitors,
    Interactions,
}

#[derive(Clone, Copy, ValueEnum)]
enum MaintainableKind {
    Artifacts,
    DisplayPositions,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List records of one kind
    List {
        kind: ResourceKind,

        /// 1-based page index
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Field filter, e.g. `--filter areaId=3` (repeatable)
        #[arg(short, long, value_name = "FIELD=VALUE")]
        filter: Vec<String>,

        /// Include soft-deleted records
        #[arg(long)]
        include_deleted: bool,
    },

    /// Show one record
    Show {
        kind: ResourceKind,

        id: String,

        /// Read an artifact with the public visitor token
        #[arg(long)]
        public: bool,
    },

    /// Soft-delete a record
    Delete { kind: ResourceKind, id: String },

    /// Reactivate a record
    Activate { kind: ResourceKind, id: String },

    /// Put an artifact or display position under maintenance
    Maintain { kind: MaintainableKind, id: String },

    /// Assign a staff account to a museum
    AssignMuseum { account_id: String, museum_id: String },
}

/// Run a generic command for the entity type behind a [`ResourceKind`].
macro_rules! for_kind {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            ResourceKind::Museums => commands::$func::<Museum>($($arg),*).await,
            ResourceKind::Roles => commands::$func::<Role>($($arg),*).await,
            ResourceKind::Accounts => commands::$func::<Account>($($arg),*).await,
            ResourceKind::Areas => commands::$func::<Area>($($arg),*).await,
            ResourceKind::Artifacts => commands::$func::<Artifact>($($arg),*).await,
            ResourceKind::DisplayPositions => commands::$func::<DisplayPosition>($($arg),*).await,
            ResourceKind::Exhibitions => commands::$func::<Exhibition>($($arg),*).await,
            ResourceKind::HistoricalContexts => {
                commands::$func::<HistoricalContext>($($arg),*).await
            }
            ResourceKind::Visitors => commands::$func::<Visitor>($($arg),*).await,
            ResourceKind::Interactions => commands::$func::<Interaction>($($arg),*).await,
        }
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // --- Tracing ---
    let default_filter = if cli.verbose {
        "museum_client=debug,museum_cli=debug"
    } else {
        "museum_client=info,museum_cli=info"
    };
    let json_logs = cli.format == OutputFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    // --- Configuration ---
    let api_url = cli.api_url.clone();
    let config = ClientConfig::from_lookup(|var| match (var, &api_url) {
        ("VITE_API_BASE_URL", Some(url)) => Some(url.clone()),
        _ => std::env::var(var).ok(),
    })
    .context("Failed to load client configuration")?;
    tracing::debug!(api_base_url = %config.api_base_url, "Loaded client configuration");

    // --- Session ---
    let session_file = cli
        .session_file
        .clone()
        .or_else(|| std::env::var_os("MUSEUM_SESSION_FILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    let storage = FileStorage::open(session_file.clone())
        .with_context(|| format!("Failed to open session file {}", session_file.display()))?;
    let ctx = PortalContext::new(&config, Arc::new(storage))?;

    let format = cli.format;
    match cli.command {
        Commands::Login { email, password } => commands::login(&ctx, &email, &password, format).await,
        Commands::Logout => commands::logout(&ctx, format).await,
        Commands::Whoami => commands::whoami(&ctx, format).await,
        Commands::List {
            kind,
            page,
            page_size,
            search,
            filter,
            include_deleted,
        } => {
            let mut query = ListQuery::new(page, page_size).include_deleted(include_deleted);
            if let Some(term) = search {
                query = query.search(term);
            }
            for pair in &filter {
                let (field, value) = pair
                    .split_once('=')
                    .with_context(|| format!("Filter must be FIELD=VALUE, got {pair:?}"))?;
                query = query.filter(field.trim(), value.trim());
            }
            for_kind!(kind, list(&ctx, query, format))
        }
        Commands::Show { kind, id, public } => match (kind, public) {
            (ResourceKind::Artifacts, true) => commands::show_public_artifact(&ctx, &id, format).await,
            (_, true) => anyhow::bail!("--public is only available for artifacts"),
            (kind, false) => for_kind!(kind, show(&ctx, &id, format)),
        },
        Commands::Delete { kind, id } => for_kind!(kind, delete(&ctx, &id, format)),
        Commands::Activate { kind, id } => for_kind!(kind, activate(&ctx, &id, format)),
        Commands::Maintain { kind, id } => match kind {
            MaintainableKind::Artifacts => commands::maintain_artifact(&ctx, &id, format).await,
            MaintainableKind::DisplayPositions => {
                commands::maintain_display_position(&ctx, &id, format).await
            }
        },
        Commands::AssignMuseum {
            account_id,
            museum_id,
        } => commands::assign_museum(&ctx, &account_id, &museum_id, format).await,
    }
}
