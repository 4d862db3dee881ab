//! `agency`: command line front end for agency-toolkit.

mod commands;
mod config;

use clap::{Args, Parser, Subcommand, ValueEnum};
use crate::config::{CliConfig, DEFAULT_CONFIG_FILE};
use agency_toolkit_core::message_chain;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "agency", version)]
#[command(about = "Automation for agency deliverables")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Social media post generation
    #[command(subcommand)]
    Social(SocialCommand),

    /// Project briefing generation
    #[command(subcommand)]
    Briefing(BriefingCommand),

    /// Project folder structure generation
    #[command(subcommand)]
    Structure(StructureCommand),

    /// Batch processing utilities
    #[command(subcommand)]
    Batch(BatchCommand),

    /// Key-value store access
    #[command(subcommand)]
    Store(StoreCommand),
}

#[derive(Subcommand)]
enum SocialCommand {
    /// Generate a single social media post
    Single {
        /// Post text
        text: String,
        /// Visual style (modern, minimal, bold)
        #[arg(long, default_value = "modern")]
        style: String,
        /// Text color (hex)
        #[arg(long, default_value = "#000000")]
        color: String,
        /// Background color (hex)
        #[arg(long, default_value = "#FFFFFF")]
        background: String,
        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Generate social posts from a CSV file (columns: text,style,color,background)
    Batch {
        /// CSV file
        csv_path: PathBuf,
        /// Output directory
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Pdf,
}

#[derive(Args)]
struct BriefingArgs {
    /// Client name
    #[arg(long)]
    client: String,
    /// Project name
    #[arg(long)]
    project: String,
    /// Project type
    #[arg(long = "type")]
    project_type: String,
    /// Goals (comma-separated)
    #[arg(long)]
    goals: String,
    /// Target audience
    #[arg(long)]
    audience: String,
    /// Timeline
    #[arg(long)]
    timeline: String,
    /// Budget
    #[arg(long)]
    budget: String,
    /// Deliverables (comma-separated)
    #[arg(long)]
    deliverables: String,
    /// Additional notes
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Subcommand)]
enum BriefingCommand {
    /// Generate a single project briefing
    Single {
        #[command(flatten)]
        briefing: BriefingArgs,
        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: FormatArg,
    },

    /// Generate briefings from a CSV file (goals and deliverables pipe-separated)
    Batch {
        /// CSV file
        csv_path: PathBuf,
        /// Output directory
        #[arg(long)]
        output: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: FormatArg,
    },
}

#[derive(Subcommand)]
enum StructureCommand {
    /// List available folder structure templates
    List,

    /// Create a folder structure for a project
    Create {
        /// Project name
        project_name: String,
        /// Structure type (see `structure list`)
        #[arg(long = "type", default_value = "agency_standard")]
        structure_type: String,
        /// Base path for creation
        #[arg(long, default_value = ".")]
        path: PathBuf,
        /// Skip README.md creation
        #[arg(long)]
        no_readme: bool,
    },

    /// Create a custom folder structure
    Custom {
        /// Project name
        project_name: String,
        /// Folder paths, e.g. `src src/components docs`
        #[arg(required = true)]
        folders: Vec<String>,
        /// Base path for creation
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum BatchCommand {
    /// Show information about batch processing
    Info,
}

#[derive(Subcommand)]
enum StoreCommand {
    /// List stored keys
    List {
        /// Only keys starting with this prefix
        #[arg(long, default_value = "")]
        prefix: String,
    },
    /// Print a stored value
    Get { key: String },
    /// Store a JSON value
    Put { key: String, value: String },
    /// Delete a stored value
    Delete { key: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Error: failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::debug!(config = ?config, "loaded configuration");

    match commands::run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Error: {}", message_chain(&e));
            ExitCode::FAILURE
        }
    }
}
