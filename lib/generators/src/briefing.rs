//! Project briefings.
//!
//! Briefing data is rendered to markdown by the `briefing_to_markdown`
//! transform. PDF output runs the markdown through `markdown_to_pdf`, which
//! is a placeholder that emits the markdown's bytes.

use crate::error::GenerateError;
use crate::toolkit::{Toolkit, asset_completed};
use agency_toolkit_assets::{Asset, Record, io};
use agency_toolkit_schema::{FieldDefinition, FieldType, TemplateDefinition};
use agency_toolkit_workflow::{Payload, PayloadKind, StepError, Transform};
use rootcause::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

/// Template every briefing is validated against.
pub const TEMPLATE: &str = "project_briefing";
/// Transform from briefing data to markdown.
pub const MARKDOWN_TRANSFORM: &str = "briefing_to_markdown";
/// Transform from markdown to PDF bytes.
pub const PDF_TRANSFORM: &str = "markdown_to_pdf";

/// Contents of a project briefing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingData {
    /// Client the project is for.
    pub client_name: String,
    /// Project title; also names the output file.
    pub project_name: String,
    /// Kind of project, e.g. "Website Redesign".
    pub project_type: String,
    /// Project goals, in order.
    pub goals: Vec<String>,
    /// Who the deliverables are aimed at.
    pub target_audience: String,
    /// Free-form schedule.
    pub timeline: String,
    /// Free-form budget.
    pub budget: String,
    /// Expected deliverables, in order.
    pub deliverables: Vec<String>,
    /// Extra notes; the section is omitted when empty.
    #[serde(default)]
    pub additional_notes: String,
}

impl BriefingData {
    /// Builds briefing data from a CSV row.
    ///
    /// `goals` and `deliverables` are pipe-separated. `additional_notes`
    /// may be absent.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` if a required column is not in the row.
    pub fn from_row(index: usize, row: &Record) -> Result<Self, Report<GenerateError>> {
        let text = |column: &str| -> Result<String, GenerateError> {
            match row.get(column) {
                Some(value) => Ok(value.as_str().unwrap_or_default().to_string()),
                None => Err(GenerateError::MissingColumn {
                    row: index,
                    column: column.to_string(),
                }),
            }
        };
        let list = |column: &str| -> Vec<String> {
            match row.get(column).and_then(JsonValue::as_str) {
                Some(value) if !value.is_empty() => value.split('|').map(str::to_string).collect(),
                _ => Vec::new(),
            }
        };

        Ok(Self {
            client_name: text("client_name")?,
            project_name: text("project_name")?,
            project_type: text("project_type")?,
            goals: list("goals"),
            target_audience: text("target_audience")?,
            timeline: text("timeline")?,
            budget: text("budget")?,
            deliverables: list("deliverables"),
            additional_notes: text("additional_notes").unwrap_or_default(),
        })
    }

    /// The briefing as a template record, fields in declaration order.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("client_name".to_string(), self.client_name.clone().into());
        record.insert("project_name".to_string(), self.project_name.clone().into());
        record.insert("project_type".to_string(), self.project_type.clone().into());
        record.insert("goals".to_string(), self.goals.clone().into());
        record.insert("target_audience".to_string(), self.target_audience.clone().into());
        record.insert("timeline".to_string(), self.timeline.clone().into());
        record.insert("budget".to_string(), self.budget.clone().into());
        record.insert("deliverables".to_string(), self.deliverables.clone().into());
        record.insert("additional_notes".to_string(), self.additional_notes.clone().into());
        record
    }

    /// Output file name for this briefing in the given format.
    #[must_use]
    pub fn file_name(&self, format: BriefingFormat) -> String {
        format!(
            "{}_briefing.{}",
            self.project_name.replace(' ', "_"),
            format.extension()
        )
    }
}

/// Output format for briefing files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BriefingFormat {
    /// A `.md` file.
    #[default]
    Markdown,
    /// A `.pdf` file.
    Pdf,
}

impl BriefingFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Pdf => "pdf",
        }
    }

    /// The name accepted by [`BriefingFormat::from_str`].
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for BriefingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BriefingFormat {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" | "md" => Ok(Self::Markdown),
            "pdf" => Ok(Self::Pdf),
            other => Err(GenerateError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Registers the `project_briefing` template and the briefing transforms.
pub(crate) fn register(toolkit: &mut Toolkit) {
    let mut template = TemplateDefinition::new(TEMPLATE).with_description("Project briefing template");
    for (name, field_type) in [
        ("client_name", FieldType::Text),
        ("project_name", FieldType::Text),
        ("project_type", FieldType::Text),
        ("goals", FieldType::List),
        ("target_audience", FieldType::Text),
        ("timeline", FieldType::Text),
        ("budget", FieldType::Text),
        ("deliverables", FieldType::List),
    ] {
        template = template.with_field(FieldDefinition::required(name, field_type));
    }
    toolkit.templates.register(
        template.with_field(FieldDefinition::optional("additional_notes", FieldType::Text).with_default("")),
    );

    toolkit.transforms.register(
        Transform::new(MARKDOWN_TRANSFORM, PayloadKind::Data, PayloadKind::Text, |input| {
            let data = input
                .as_data()
                .ok_or_else(|| StepError::new("expected briefing data"))?;
            render_markdown(data).map(Payload::Text)
        })
        .with_description("Renders briefing data as markdown"),
    );
    toolkit.transforms.register(
        Transform::new(PDF_TRANSFORM, PayloadKind::Text, PayloadKind::Bytes, |input| {
            Ok(Payload::Bytes(input.into_bytes()))
        })
        .with_description("Converts markdown to PDF (placeholder)"),
    );
}

fn render_markdown(data: &JsonValue) -> Result<String, StepError> {
    let text = |name: &str| -> Result<&str, StepError> {
        data.get(name)
            .and_then(JsonValue::as_str)
            .ok_or_else(|| StepError::new(format!("briefing field '{name}' must be text")))
    };
    let items = |name: &str| -> Result<String, StepError> {
        let list = data
            .get(name)
            .and_then(JsonValue::as_array)
            .ok_or_else(|| StepError::new(format!("briefing field '{name}' must be a list")))?;
        Ok(list
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => format!("- {s}\n"),
                other => format!("- {other}\n"),
            })
            .collect())
    };

    let mut md = format!(
        "# Project Briefing: {}\n\n## Client\n**{}**\n\n## Project Overview\n- **Type**: {}\n- **Timeline**: {}\n- **Budget**: {}\n\n## Goals\n",
        text("project_name")?,
        text("client_name")?,
        text("project_type")?,
        text("timeline")?,
        text("budget")?,
    );
    md.push_str(&items("goals")?);
    md.push_str(&format!(
        "\n## Target Audience\n{}\n\n## Deliverables\n",
        text("target_audience")?
    ));
    md.push_str(&items("deliverables")?);

    let notes = data
        .get("additional_notes")
        .and_then(JsonValue::as_str)
        .unwrap_or_default();
    if !notes.is_empty() {
        md.push_str(&format!("\n## Additional Notes\n{notes}\n"));
    }
    Ok(md)
}

/// Generates a briefing, writing it under `output_dir` when one is given.
///
/// # Errors
///
/// Returns `InvalidData` if the data fails the `project_briefing`
/// template, or a transform or output error. The failure is also logged on
/// the `briefing_generation` job.
#[instrument(skip_all, fields(project = %data.project_name, %format))]
pub fn generate_briefing(
    toolkit: &mut Toolkit,
    data: &BriefingData,
    output_dir: Option<&Path>,
    format: BriefingFormat,
) -> Result<Asset, Report<GenerateError>> {
    let record = data.to_record();

    toolkit.tracked(
        "briefing_generation",
        record.clone(),
        |toolkit| {
            toolkit.require_valid(TEMPLATE, &record)?;

            let mut briefing = toolkit.assets.create(TEMPLATE, record.clone(), None);
            let markdown = toolkit
                .transforms
                .apply(MARKDOWN_TRANSFORM, Payload::Data(JsonValue::Object(record)))
                .context(GenerateError::Transform {
                    name: MARKDOWN_TRANSFORM.to_string(),
                })?;

            if let Some(dir) = output_dir {
                let content = match format {
                    BriefingFormat::Markdown => markdown,
                    BriefingFormat::Pdf => toolkit
                        .transforms
                        .apply(PDF_TRANSFORM, markdown)
                        .context(GenerateError::Transform {
                            name: PDF_TRANSFORM.to_string(),
                        })?,
                };
                let path = dir.join(data.file_name(format));
                io::write_bytes(&path, &content.into_bytes())
                    .context(GenerateError::Output { path: path.clone() })?;
                toolkit.annotate(&mut briefing, "output_path", path.display().to_string());
            }
            Ok(briefing)
        },
        asset_completed,
    )
}

/// Generates one briefing per CSV row.
///
/// Columns: `client_name,project_name,project_type,goals,target_audience,
/// timeline,budget,deliverables,additional_notes`, with `goals` and
/// `deliverables` pipe-separated. Stops at the first failing row.
///
/// # Errors
///
/// Returns an input error if the CSV cannot be read, `MissingColumn` for a
/// row without a required column, or the first row's generation error.
#[instrument(skip(toolkit))]
pub fn generate_briefings_from_csv(
    toolkit: &mut Toolkit,
    csv_path: &Path,
    output_dir: &Path,
    format: BriefingFormat,
) -> Result<Vec<Asset>, Report<GenerateError>> {
    let rows = io::read_rows(csv_path).context(GenerateError::Input {
        path: csv_path.to_path_buf(),
    })?;

    let mut briefings = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let data = BriefingData::from_row(index, row)?;
        briefings.push(generate_briefing(toolkit, &data, Some(output_dir), format)?);
    }
    Ok(briefings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_toolkit_jobs::ExecutionStatus;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> BriefingData {
        BriefingData {
            client_name: "Acme Corp".to_string(),
            project_name: "Website Redesign".to_string(),
            project_type: "Web Design".to_string(),
            goals: vec!["Modernize design".to_string(), "Improve UX".to_string()],
            target_audience: "Young professionals".to_string(),
            timeline: "3 months".to_string(),
            budget: "$50,000".to_string(),
            deliverables: vec!["Homepage".to_string(), "About page".to_string()],
            additional_notes: String::new(),
        }
    }

    const EXPECTED_MARKDOWN: &str = "# Project Briefing: Website Redesign

## Client
**Acme Corp**

## Project Overview
- **Type**: Web Design
- **Timeline**: 3 months
- **Budget**: $50,000

## Goals
- Modernize design
- Improve UX

## Target Audience
Young professionals

## Deliverables
- Homepage
- About page
";

    #[test]
    fn markdown_layout() {
        let dir = TempDir::new().expect("tempdir");
        let mut toolkit = Toolkit::new();

        let briefing = generate_briefing(&mut toolkit, &sample(), Some(dir.path()), BriefingFormat::Markdown)
            .expect("generate");

        let path = briefing.metadata_str("output_path").expect("output path");
        assert!(path.ends_with("Website_Redesign_briefing.md"));
        assert_eq!(io::read_text(Path::new(path)).expect("read"), EXPECTED_MARKDOWN);
        assert_eq!(briefing.asset_type, "project_briefing");
        assert_eq!(briefing.data["goals"], json!(["Modernize design", "Improve UX"]));
    }

    #[test]
    fn notes_section_only_when_present() {
        let mut data = sample();
        data.additional_notes = "Prefers blue".to_string();
        let markdown = render_markdown(&JsonValue::Object(data.to_record())).expect("render");
        assert!(markdown.ends_with("- About page\n\n## Additional Notes\nPrefers blue\n"));
    }

    #[test]
    fn pdf_uses_pdf_extension() {
        let dir = TempDir::new().expect("tempdir");
        let mut toolkit = Toolkit::new();

        let briefing = generate_briefing(&mut toolkit, &sample(), Some(dir.path()), BriefingFormat::Pdf)
            .expect("generate");

        let path = briefing.metadata_str("output_path").expect("output path");
        assert!(path.ends_with("Website_Redesign_briefing.pdf"));
        assert_eq!(
            io::read_bytes(Path::new(path)).expect("read"),
            EXPECTED_MARKDOWN.as_bytes()
        );
    }

    #[test]
    fn no_output_dir_writes_nothing() {
        let mut toolkit = Toolkit::new();
        let briefing = generate_briefing(&mut toolkit, &sample(), None, BriefingFormat::Markdown)
            .expect("generate");

        assert!(briefing.metadata.is_empty());
        let job = toolkit.jobs.list(Some("briefing_generation"))[0];
        assert_eq!(job.params["client_name"], json!("Acme Corp"));
        assert_eq!(
            job.last_execution().map(|e| &e.status),
            Some(&ExecutionStatus::Completed)
        );
    }

    #[test]
    fn format_parses_known_names() {
        assert_eq!("markdown".parse::<BriefingFormat>().expect("parse"), BriefingFormat::Markdown);
        assert_eq!("pdf".parse::<BriefingFormat>().expect("parse"), BriefingFormat::Pdf);
        assert!("docx".parse::<BriefingFormat>().is_err());
    }

    #[test]
    fn csv_rows_split_pipe_lists() {
        let dir = TempDir::new().expect("tempdir");
        let csv_path = dir.path().join("briefings.csv");
        io::write_text(
            &csv_path,
            "client_name,project_name,project_type,goals,target_audience,timeline,budget,deliverables\n\
             Acme,Brand Refresh,Branding,Grow|Retain,Everyone,6 weeks,$10k,Logo|Guide\n",
        )
        .expect("write csv");
        let out = dir.path().join("out");

        let mut toolkit = Toolkit::new();
        let briefings =
            generate_briefings_from_csv(&mut toolkit, &csv_path, &out, BriefingFormat::Markdown)
                .expect("batch");

        assert_eq!(briefings.len(), 1);
        assert_eq!(briefings[0].data["goals"], json!(["Grow", "Retain"]));
        assert_eq!(briefings[0].data["additional_notes"], json!(""));
        assert!(out.join("Brand_Refresh_briefing.md").exists());
    }

    #[test]
    fn csv_missing_column_fails() {
        let dir = TempDir::new().expect("tempdir");
        let csv_path = dir.path().join("bad.csv");
        io::write_text(&csv_path, "client_name,project_name\nAcme,Thing\n").expect("write csv");

        let mut toolkit = Toolkit::new();
        let err = generate_briefings_from_csv(&mut toolkit, &csv_path, dir.path(), BriefingFormat::Markdown)
            .unwrap_err();
        assert!(err.to_string().contains("missing column 'project_type'"));
    }
}
