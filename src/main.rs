use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use roadmap::board::i18n::Language;
use roadmap::board::models::IssueState;

mod cmd;

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(version, about = "Filterable roadmap board for project milestones")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Roadmap dataset. If not provided, looks in .roadmap/, public/, then *roadmap*.json
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Display language: en, fr. Overrides roadmap.toml and ROADMAP_LANG
    #[arg(long, global = true)]
    pub lang: Option<Language>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Facet flags shared by `show` and `suggest`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Text filter, matched against titles and label names
    #[arg(short, long)]
    pub text: Option<String>,

    /// Issue state: open, closed
    #[arg(long)]
    pub state: Option<IssueState>,

    /// Project status, e.g. "In Progress"
    #[arg(long)]
    pub status: Option<String>,

    /// Label to require; repeat for several
    #[arg(short, long = "label")]
    pub labels: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the board with the given filters
    Show {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the view records as JSON
        #[arg(long)]
        json: bool,
    },
    /// List search-box suggestions for a query
    Suggest {
        query: String,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        json: bool,
    },
    /// List every label on the board
    Labels {
        #[arg(long)]
        json: bool,
    },
    /// Group exported project items into a roadmap dataset
    Build {
        /// Export file with `project`, `fields` and `items`
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the dataset (defaults to the configured data file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default roadmap.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Show { filters, json } => cmd::cmd_show(&cli, project_dir, filters, *json)?,
        Commands::Suggest {
            query,
            filters,
            json,
        } => cmd::cmd_suggest(&cli, project_dir, query, filters, *json)?,
        Commands::Labels { json } => cmd::cmd_labels(&cli, project_dir, *json)?,
        Commands::Build { input, output } => {
            cmd::cmd_build(&cli, project_dir, input, output.as_deref())?
        }
        Commands::Config { command } => cmd::cmd_config(&cli, project_dir, command.clone())?,
    }

    Ok(())
}
