//! Stemma CLI - Command line interface for the family graph

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, kin, link, person, union};
use output::OutputFormat;
use stemma_core::FamilyTree;
use stemma_storage::{SqliteStore, TreeStore};

#[derive(Parser)]
#[command(name = "stemma")]
#[command(author, version, about = "Record a family tree and query relationships")]
pub struct Cli {
    /// Database file
    #[arg(short, long, global = true, env = "STEMMA_DB")]
    pub db: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the database file path
    pub fn db_path(&self) -> PathBuf {
        self.db.clone().unwrap_or_else(config::default_db_path)
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from(self.format.as_str())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage people
    Person(person::PersonArgs),
    /// Manage union records
    Union(union::UnionArgs),
    /// Record parent-child links
    Link(link::LinkArgs),
    /// Query derived relationships
    Kin(kin::KinArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context: the opened store and the tree loaded from it
pub struct AppContext {
    pub store: SqliteStore,
    pub tree: FamilyTree,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let db_path = cli.db_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!("Using database at: {:?}", db_path);

        let store = SqliteStore::open(&db_path)?;
        let tree = store.load_tree()?;

        Ok(Self { store, tree })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting stemma CLI");

    // Completions never need the database
    if let Commands::Completions(args) = &cli.command {
        return completions::run(args);
    }

    let mut ctx = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Person(args) => person::run(args, &cli, &mut ctx)?,
        Commands::Union(args) => union::run(args, &cli, &mut ctx)?,
        Commands::Link(args) => link::run(args, &cli, &mut ctx)?,
        Commands::Kin(args) => kin::run(args, &cli, &ctx)?,
        // Handled before the database opens
        Commands::Completions(_) => {}
    }

    Ok(())
}
