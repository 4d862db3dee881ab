//! Project folder structures.

use crate::error::GenerateError;
use crate::toolkit::{Toolkit, asset_completed};
use agency_toolkit_assets::{Asset, Record, io};
use rootcause::prelude::*;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// A predefined folder layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderStructure {
    /// Lookup key, e.g. `agency_standard`.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Folder paths relative to the project root, parents first.
    pub folders: &'static [&'static str],
}

/// Every predefined structure.
pub const FOLDER_STRUCTURES: &[FolderStructure] = &[
    FolderStructure {
        key: "agency_standard",
        name: "Agency Standard",
        folders: &[
            "01_brief",
            "02_research",
            "03_concepts",
            "04_design",
            "05_final_delivery",
            "06_assets",
            "06_assets/logos",
            "06_assets/images",
            "06_assets/fonts",
            "07_archive",
        ],
    },
    FolderStructure {
        key: "social_media",
        name: "Social Media Campaign",
        folders: &[
            "01_brief_strategy",
            "02_content_calendar",
            "03_graphics",
            "03_graphics/posts",
            "03_graphics/stories",
            "03_graphics/ads",
            "04_copy",
            "05_final_exports",
            "06_analytics",
        ],
    },
    FolderStructure {
        key: "web_project",
        name: "Web Project",
        folders: &[
            "01_brief",
            "02_research_ux",
            "03_wireframes",
            "04_design_mockups",
            "05_assets",
            "05_assets/images",
            "05_assets/icons",
            "05_assets/fonts",
            "06_development_handoff",
            "07_final_delivery",
        ],
    },
    FolderStructure {
        key: "branding",
        name: "Branding Project",
        folders: &[
            "01_brief_research",
            "02_moodboards",
            "03_concepts",
            "04_logo_design",
            "05_brand_guidelines",
            "06_applications",
            "06_applications/business_cards",
            "06_applications/letterhead",
            "06_applications/social_media",
            "07_final_delivery",
        ],
    },
];

/// Structure used when none is named.
pub const DEFAULT_STRUCTURE: &str = "agency_standard";

/// `(key, display name)` of every predefined structure.
#[must_use]
pub fn available_structures() -> Vec<(&'static str, &'static str)> {
    FOLDER_STRUCTURES.iter().map(|s| (s.key, s.name)).collect()
}

/// Looks up a predefined structure by key.
#[must_use]
pub fn find_structure(key: &str) -> Option<&'static FolderStructure> {
    FOLDER_STRUCTURES.iter().find(|s| s.key == key)
}

/// README content for a project laid out with `structure`.
#[must_use]
pub fn readme(project_name: &str, structure: &FolderStructure) -> String {
    let mut content = format!(
        "# {project_name}\n\nProject Type: **{}**\n\n## Folder Structure\n\n",
        structure.name
    );
    for folder in structure.folders {
        let depth = folder.matches('/').count();
        let leaf = folder.rsplit('/').next().unwrap_or(folder);
        content.push_str(&format!("{}- `{leaf}/`\n", "  ".repeat(depth)));
    }
    content.push_str(
        "\n## Usage\n\n\
         This folder structure follows agency best practices for organized project management.\n\n\
         - Keep all project files organized in their respective folders\n\
         - Use clear naming conventions for files\n\
         - Archive old versions in the `archive` folder\n",
    );
    content
}

fn project_root(base_path: &Path, project_name: &str) -> PathBuf {
    base_path.join(project_name.replace(' ', "_"))
}

// Creates each folder under `root`, returning the created paths.
fn create_folders<S: AsRef<str>>(
    root: &Path,
    folders: &[S],
) -> Result<Vec<String>, Report<GenerateError>> {
    let mut created = Vec::with_capacity(folders.len());
    for folder in folders {
        let path = root.join(folder.as_ref());
        io::create_dir(&path).context(GenerateError::Output { path: path.clone() })?;
        debug!(path = %path.display(), "created folder");
        created.push(path.display().to_string());
    }
    Ok(created)
}

/// Generates a predefined folder structure for a project.
///
/// Folders are only created when `base_path` is given, under
/// `<base_path>/<project name with spaces as underscores>`.
///
/// # Errors
///
/// Returns `UnknownStructure` if `structure_type` is not predefined, or an
/// output error if a folder or the README cannot be written. The failure is
/// also logged on the `folder_structure_generation` job.
#[instrument(skip(toolkit))]
pub fn generate_folder_structure(
    toolkit: &mut Toolkit,
    project_name: &str,
    structure_type: &str,
    base_path: Option<&Path>,
    create_readme: bool,
) -> Result<Asset, Report<GenerateError>> {
    let mut params = Record::new();
    params.insert("project_name".to_string(), project_name.into());
    params.insert("structure_type".to_string(), structure_type.into());

    toolkit.tracked(
        "folder_structure_generation",
        params,
        |toolkit| {
            let structure = find_structure(structure_type).ok_or_else(|| {
                GenerateError::UnknownStructure {
                    requested: structure_type.to_string(),
                    available: FOLDER_STRUCTURES.iter().map(|s| s.key.to_string()).collect(),
                }
            })?;

            let mut data = Record::new();
            data.insert("project_name".to_string(), project_name.into());
            data.insert("structure_type".to_string(), structure_type.into());
            data.insert("folders".to_string(), structure.folders.to_vec().into());
            let mut asset = toolkit.assets.create("folder_structure", data, None);

            if let Some(base) = base_path {
                let root = project_root(base, project_name);
                let created = create_folders(&root, structure.folders)?;

                if create_readme {
                    let path = root.join("README.md");
                    io::write_text(&path, &readme(project_name, structure))
                        .context(GenerateError::Output { path: path.clone() })?;
                }

                toolkit.annotate(&mut asset, "created_folders", created);
                toolkit.annotate(&mut asset, "project_root", root.display().to_string());
            }
            Ok(asset)
        },
        asset_completed,
    )
}

/// Generates a custom folder structure from caller-supplied paths.
///
/// # Errors
///
/// Returns an output error if a folder cannot be created. The failure is
/// also logged on the `custom_folder_structure` job.
#[instrument(skip(toolkit))]
pub fn generate_custom_structure(
    toolkit: &mut Toolkit,
    project_name: &str,
    folders: &[String],
    base_path: Option<&Path>,
) -> Result<Asset, Report<GenerateError>> {
    let folder_list = JsonValue::from(folders.to_vec());
    let mut params = Record::new();
    params.insert("project_name".to_string(), project_name.into());
    params.insert("folders".to_string(), folder_list.clone());

    toolkit.tracked(
        "custom_folder_structure",
        params,
        |toolkit| {
            let mut data = Record::new();
            data.insert("project_name".to_string(), project_name.into());
            data.insert("folders".to_string(), folder_list);
            let mut asset = toolkit.assets.create("custom_folder_structure", data, None);

            if let Some(base) = base_path {
                let root = project_root(base, project_name);
                let created = create_folders(&root, folders)?;
                toolkit.annotate(&mut asset, "created_folders", created);
                toolkit.annotate(&mut asset, "project_root", root.display().to_string());
            }
            Ok(asset)
        },
        asset_completed,
    )
}
