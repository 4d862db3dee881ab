//! Command handlers.
//!
//! Each handler prints `✓` lines on success. Failures are returned to
//! `main`, which prints them and exits non-zero.

use crate::config::CliConfig;
use crate::{
    BatchCommand, BriefingArgs, BriefingCommand, Command, FormatArg, SocialCommand, StoreCommand,
    StructureCommand,
};
use agency_toolkit_assets::{Asset, AssetStore};
use agency_toolkit_core::Result;
use agency_toolkit_generators::{
    BriefingData, BriefingFormat, SocialPostRequest, Toolkit, available_structures,
    batch_generate_social_posts, generate_briefing, generate_briefings_from_csv,
    generate_custom_structure, generate_folder_structure, generate_social_post,
};
use rootcause::prelude::*;
use std::fmt;

/// Failures surfaced by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A generator failed (use as context wrapper).
    Generate { command: &'static str },
    /// No value is stored under the key.
    KeyNotFound { key: String },
    /// A value given on the command line is not JSON.
    InvalidJson { reason: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate { command } => write!(f, "{command} failed"),
            Self::KeyNotFound { key } => write!(f, "Key '{key}' not found"),
            Self::InvalidJson { reason } => write!(f, "Invalid JSON value: {reason}"),
        }
    }
}

impl std::error::Error for CliError {}

const BATCH_GUIDE: &str = "
Batch Processing Guide
======================

The batch processor can execute workflows on CSV data.

CSV Format:
-----------
Each row in the CSV is processed through the defined workflow.
Columns become record keys passed to workflow steps.

Example CSV:
  name,email,status
  Alice,alice@example.com,active
  Bob,bob@example.com,pending

Error Handling:
---------------
- skip: Continue processing on errors (default)
- raise: Stop on first error
- log: Log errors but continue

Custom workflows are defined through the library API:
  agency_toolkit_generators::define_batch_workflow
";

/// Runs one command.
///
/// # Errors
///
/// Returns the command's failure.
pub fn run(command: Command, config: &CliConfig) -> Result<(), CliError> {
    let mut toolkit = Toolkit::new();
    match command {
        Command::Social(cmd) => social(&mut toolkit, cmd, config),
        Command::Briefing(cmd) => briefing(&mut toolkit, cmd, config),
        Command::Structure(cmd) => structure(&mut toolkit, cmd),
        Command::Batch(BatchCommand::Info) => {
            println!("{BATCH_GUIDE}");
            Ok(())
        }
        Command::Store(cmd) => store(cmd, config),
    }
}

fn print_saved(asset: &Asset) {
    if let Some(path) = asset.metadata_str("output_path") {
        println!("  Saved to: {path}");
    }
}

fn print_location(asset: &Asset) {
    if let Some(root) = asset.metadata_str("project_root") {
        println!("  Location: {root}");
        let count = asset
            .metadata
            .get("created_folders")
            .and_then(|v| v.as_array())
            .map_or(0, Vec::len);
        println!("  Folders: {count}");
    }
}

fn social(toolkit: &mut Toolkit, command: SocialCommand, config: &CliConfig) -> Result<(), CliError> {
    match command {
        SocialCommand::Single {
            text,
            style,
            color,
            background,
            output,
        } => {
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            let request = SocialPostRequest::new(text)
                .with_style(style)
                .with_color(color)
                .with_background(background);
            let asset = generate_social_post(toolkit, &request, Some(&output_dir))
                .context(CliError::Generate { command: "social single" })?;
            println!("✓ Social post generated: {}", asset.id);
            print_saved(&asset);
        }
        SocialCommand::Batch { csv_path, output } => {
            let assets = batch_generate_social_posts(toolkit, &csv_path, &output)
                .context(CliError::Generate { command: "social batch" })?;
            println!("✓ Generated {} social posts", assets.len());
            println!("  Output directory: {}", output.display());
        }
    }
    Ok(())
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(|item| item.trim().to_string()).collect()
}

impl From<BriefingArgs> for BriefingData {
    fn from(args: BriefingArgs) -> Self {
        Self {
            client_name: args.client,
            project_name: args.project,
            project_type: args.project_type,
            goals: split_list(&args.goals),
            target_audience: args.audience,
            timeline: args.timeline,
            budget: args.budget,
            deliverables: split_list(&args.deliverables),
            additional_notes: args.notes,
        }
    }
}

impl From<FormatArg> for BriefingFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Markdown => Self::Markdown,
            FormatArg::Pdf => Self::Pdf,
        }
    }
}

fn briefing(toolkit: &mut Toolkit, command: BriefingCommand, config: &CliConfig) -> Result<(), CliError> {
    match command {
        BriefingCommand::Single {
            briefing,
            output,
            format,
        } => {
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            let data = BriefingData::from(briefing);
            let asset = generate_briefing(toolkit, &data, Some(&output_dir), format.into())
                .context(CliError::Generate { command: "briefing single" })?;
            println!("✓ Briefing generated: {}", asset.id);
            print_saved(&asset);
        }
        BriefingCommand::Batch {
            csv_path,
            output,
            format,
        } => {
            let assets = generate_briefings_from_csv(toolkit, &csv_path, &output, format.into())
                .context(CliError::Generate { command: "briefing batch" })?;
            println!("✓ Generated {} briefings", assets.len());
            println!("  Output directory: {}", output.display());
        }
    }
    Ok(())
}

fn structure(toolkit: &mut Toolkit, command: StructureCommand) -> Result<(), CliError> {
    match command {
        StructureCommand::List => {
            println!("Available folder structures:\n");
            for (key, name) in available_structures() {
                println!("  {key:20} - {name}");
            }
        }
        StructureCommand::Create {
            project_name,
            structure_type,
            path,
            no_readme,
        } => {
            let asset = generate_folder_structure(
                toolkit,
                &project_name,
                &structure_type,
                Some(&path),
                !no_readme,
            )
            .context(CliError::Generate { command: "structure create" })?;
            println!("✓ Folder structure created: {}", asset.id);
            print_location(&asset);
        }
        StructureCommand::Custom {
            project_name,
            folders,
            path,
        } => {
            let asset = generate_custom_structure(toolkit, &project_name, &folders, Some(&path))
                .context(CliError::Generate { command: "structure custom" })?;
            println!("✓ Custom structure created: {}", asset.id);
            print_location(&asset);
        }
    }
    Ok(())
}

fn store(command: StoreCommand, config: &CliConfig) -> Result<(), CliError> {
    let mut store = AssetStore::open(&config.storage_path);
    match command {
        StoreCommand::List { prefix } => {
            for key in store.list(&prefix) {
                println!("{key}");
            }
        }
        StoreCommand::Get { key } => {
            let value = store
                .retrieve(&key)
                .ok_or_else(|| CliError::KeyNotFound { key: key.clone() })?;
            let pretty = serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidJson {
                reason: e.to_string(),
            })?;
            println!("{pretty}");
        }
        StoreCommand::Put { key, value } => {
            let value = serde_json::from_str(&value).map_err(|e| CliError::InvalidJson {
                reason: e.to_string(),
            })?;
            store.store(key.clone(), value);
            println!("✓ Stored: {key}");
        }
        StoreCommand::Delete { key } => {
            if !store.delete(&key) {
                return Err(CliError::KeyNotFound { key }.into());
            }
            println!("✓ Deleted: {key}");
        }
    }
    Ok(())
}
