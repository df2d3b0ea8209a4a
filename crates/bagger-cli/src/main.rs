//! Bagger CLI - Command-line interface for the Bagger profile store
//!
//! Provides `bagger org`, `bagger project`, `bagger profile`, `bagger import`
//! and lookups for people and contacts.

mod commands;

use anyhow::{bail, Context as _, Result};
use bagger_core::config::ConfigError;
use bagger_core::{logging, Settings};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use commands::entity::{ContactCommands, PersonCommands};
use commands::org::OrgCommands;
use commands::profile::ProfileCommands;
use commands::project::ProjectCommands;
use commands::Context;

#[derive(Parser)]
#[command(name = "bagger")]
#[command(about = "Bagger - profile, contact and organization store")]
#[command(version)]
struct Cli {
    /// Extra settings file, applied after the default ones
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Database file (overrides settings)
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse organizations
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Look up people
    Person {
        #[command(subcommand)]
        action: PersonCommands,
    },
    /// Look up contacts
    Contact {
        #[command(subcommand)]
        action: ContactCommands,
    },
    /// Browse projects and link them to people
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Browse profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Store a batch of profiles from a JSON file
    Import {
        /// JSON file holding an array of profiles
        file: PathBuf,
        /// Directory bagger.sql is written to (defaults to settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ConfigError>() {
            Some(config) => eprintln!("Error [{}]: {e:#}", config.code()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref(), cli.database)?;
    logging::init(settings.log_format);
    tracing::debug!(
        database = %settings.database_path.display(),
        output_dir = %settings.output_dir.display(),
        "settings loaded"
    );

    let ctx = Context::open(settings, cli.json)?;

    match cli.command {
        Commands::Org { action } => commands::org::execute(&ctx, action),
        Commands::Person { action } => commands::entity::execute_person(&ctx, action),
        Commands::Contact { action } => commands::entity::execute_contact(&ctx, action),
        Commands::Project { action } => commands::project::execute(&ctx, action),
        Commands::Profile { action } => commands::profile::execute(&ctx, action),
        Commands::Import { file, output } => commands::import::execute(&ctx, &file, output),
    }
}

/// Layer the default settings files, then `--config`, then `--database`
fn load_settings(config: Option<&Path>, database: Option<PathBuf>) -> Result<Settings> {
    let mut sources = Settings::default_sources();
    if let Some(path) = config {
        if !path.is_file() {
            bail!("Config file not found: {}", path.display());
        }
        sources.push(path.to_path_buf());
    }

    let mut settings = Settings::load(&sources).context("Failed to load settings")?;
    if let Some(path) = database {
        settings.database_path = path;
    }
    Ok(settings)
}
