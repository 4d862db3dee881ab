//! Social media posts.

use crate::error::GenerateError;
use crate::toolkit::{Toolkit, asset_completed};
use agency_toolkit_assets::{Asset, Record, io};
use agency_toolkit_schema::{FieldDefinition, FieldType, TemplateDefinition};
use agency_toolkit_workflow::{Payload, PayloadKind, StepError, Transform};
use rootcause::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::instrument;

/// Template every post is validated against.
pub const TEMPLATE: &str = "social_post";
/// Transform that renders a post image.
pub const IMAGE_TRANSFORM: &str = "text_to_social_image";

const DEFAULT_STYLE: &str = "modern";
const DEFAULT_COLOR: &str = "#000000";
const DEFAULT_BACKGROUND: &str = "#FFFFFF";

/// What to put on a social post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPostRequest {
    /// Post text.
    pub text: String,
    /// Visual style, e.g. `modern`, `minimal` or `bold`.
    #[serde(default = "default_style")]
    pub style: String,
    /// Text color.
    #[serde(default = "default_color")]
    pub color: String,
    /// Background color.
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl SocialPostRequest {
    /// A post with the default style and colors.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: default_style(),
            color: default_color(),
            background: default_background(),
        }
    }

    /// Sets the style.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Sets the text color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Builds a request from a CSV row. Absent cells use the defaults.
    #[must_use]
    pub fn from_row(row: &Record) -> Self {
        let cell = |name: &str, default: &str| {
            row.get(name)
                .and_then(JsonValue::as_str)
                .unwrap_or(default)
                .to_string()
        };
        Self {
            text: cell("text", ""),
            style: cell("style", DEFAULT_STYLE),
            color: cell("color", DEFAULT_COLOR),
            background: cell("background", DEFAULT_BACKGROUND),
        }
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("text".to_string(), self.text.clone().into());
        record.insert("style".to_string(), self.style.clone().into());
        record.insert("color".to_string(), self.color.clone().into());
        record.insert("background".to_string(), self.background.clone().into());
        record
    }
}

/// Registers the `social_post` template and the image transform.
pub(crate) fn register(toolkit: &mut Toolkit) {
    toolkit.templates.register(
        TemplateDefinition::new(TEMPLATE)
            .with_description("Social media post template")
            .with_field(FieldDefinition::required("text", FieldType::Text))
            .with_field(FieldDefinition::optional("style", FieldType::Text).with_default(DEFAULT_STYLE))
            .with_field(FieldDefinition::optional("color", FieldType::Text).with_default(DEFAULT_COLOR))
            .with_field(
                FieldDefinition::optional("background", FieldType::Text)
                    .with_default(DEFAULT_BACKGROUND),
            ),
    );

    toolkit.transforms.register(
        Transform::new(IMAGE_TRANSFORM, PayloadKind::Data, PayloadKind::Bytes, render_image)
            .with_description("Renders post data as a placeholder image"),
    );
}

// Placeholder rendering: the image is a text description of the post.
fn render_image(input: Payload) -> Result<Payload, StepError> {
    let data = input
        .as_data()
        .ok_or_else(|| StepError::new("expected post data"))?;
    let field = |name: &str, default: &'static str| {
        data.get(name)
            .and_then(JsonValue::as_str)
            .unwrap_or(default)
            .to_string()
    };
    let content = format!(
        "Social Post Image\n\nText: {}\nStyle: {}\nColor: {}",
        field("text", ""),
        field("style", DEFAULT_STYLE),
        field("color", DEFAULT_COLOR),
    );
    Ok(Payload::Bytes(content.into_bytes()))
}

/// Generates a social post, writing `<asset id>.png` under `output_dir`
/// when one is given.
///
/// # Errors
///
/// Returns `InvalidData` if the request fails the `social_post` template,
/// or a transform or output error. The failure is also logged on the
/// `social_post_generation` job.
#[instrument(skip_all, fields(style = %request.style))]
pub fn generate_social_post(
    toolkit: &mut Toolkit,
    request: &SocialPostRequest,
    output_dir: Option<&Path>,
) -> Result<Asset, Report<GenerateError>> {
    let mut params = Record::new();
    params.insert("text".to_string(), request.text.clone().into());
    params.insert("style".to_string(), request.style.clone().into());
    params.insert("color".to_string(), request.color.clone().into());

    toolkit.tracked(
        "social_post_generation",
        params,
        |toolkit| {
            let data = request.to_record();
            toolkit.require_valid(TEMPLATE, &data)?;

            let mut post = toolkit.assets.create(TEMPLATE, data.clone(), None);
            let image = toolkit
                .transforms
                .apply(IMAGE_TRANSFORM, Payload::Data(JsonValue::Object(data)))
                .context(GenerateError::Transform {
                    name: IMAGE_TRANSFORM.to_string(),
                })?;

            if let Some(dir) = output_dir {
                let path = dir.join(format!("{}.png", post.id));
                io::write_bytes(&path, &image.into_bytes())
                    .context(GenerateError::Output { path: path.clone() })?;
                toolkit.annotate(&mut post, "output_path", path.display().to_string());
            }
            Ok(post)
        },
        asset_completed,
    )
}

/// Generates one post per row of a `text,style,color,background` CSV.
///
/// Stops at the first failing row.
///
/// # Errors
///
/// Returns an input error if the CSV cannot be read, an output error if
/// `output_dir` cannot be created, or the first row's generation error.
#[instrument(skip(toolkit))]
pub fn batch_generate_social_posts(
    toolkit: &mut Toolkit,
    csv_path: &Path,
    output_dir: &Path,
) -> Result<Vec<Asset>, Report<GenerateError>> {
    let rows = io::read_rows(csv_path).context(GenerateError::Input {
        path: csv_path.to_path_buf(),
    })?;
    io::create_dir(output_dir).context(GenerateError::Output {
        path: output_dir.to_path_buf(),
    })?;

    rows.iter()
        .map(|row| generate_social_post(toolkit, &SocialPostRequest::from_row(row), Some(output_dir)))
        .collect()
}
