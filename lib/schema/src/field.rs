//! Field declarations for templates.
//!
//! Field types form a closed set. Each tag has an explicit match function
//! over `serde_json::Value`; null is handled by the validator, not here.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// The type a template field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A string.
    Text,
    /// A whole number.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// An array of values.
    List,
    /// An object of named values.
    Mapping,
}

impl FieldType {
    /// Returns true if `value` has this type.
    #[must_use]
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Mapping => value.is_object(),
        }
    }

    /// The tag used in messages and serialized schemas.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Mapping => "mapping",
        }
    }

    /// Names the runtime type of a value, for mismatch messages.
    #[must_use]
    pub fn describe(value: &JsonValue) -> &'static str {
        match value {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(n) if n.is_f64() => "float",
            JsonValue::Number(_) => "integer",
            JsonValue::String(_) => "text",
            JsonValue::Array(_) => "list",
            JsonValue::Object(_) => "mapping",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "str" | "string" => Ok(Self::Text),
            "integer" | "int" => Ok(Self::Integer),
            "boolean" | "bool" => Ok(Self::Boolean),
            "list" | "array" => Ok(Self::List),
            "mapping" | "dict" | "object" => Ok(Self::Mapping),
            other => Err(SchemaError::UnknownFieldType {
                tag: other.to_string(),
            }),
        }
    }
}

/// One field declared by a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Key of the field in the data record.
    pub name: String,
    /// Expected type of the value.
    pub field_type: FieldType,
    /// Whether the field must be present.
    pub required: bool,
    /// Value callers should assume when the field is absent.
    pub default: Option<JsonValue>,
    /// Human-readable description.
    pub description: String,
}

impl FieldDefinition {
    /// Declares a field that must be present.
    #[must_use]
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
            description: String::new(),
        }
    }

    /// Declares a field that may be omitted.
    #[must_use]
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<JsonValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
