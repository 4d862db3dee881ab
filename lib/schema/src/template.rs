//! Template definitions and the template validator.
//!
//! A template is a named, ordered list of field declarations. Validation is
//! permissive: fields present in the data but not declared are ignored, and
//! an explicit null is accepted for any declared type.

use crate::error::SchemaError;
use crate::field::{FieldDefinition, FieldType};
use crate::outcome::ValidationOutcome;
use agency_toolkit_core::{Named, NamedRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

/// A named data schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    /// Unique template name.
    pub name: String,
    /// Declared fields, checked in this order.
    pub fields: Vec<FieldDefinition>,
    /// Human-readable description.
    pub description: String,
    /// Free-form metadata.
    pub metadata: Map<String, JsonValue>,
}

impl TemplateDefinition {
    /// Creates a template with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            description: String::new(),
            metadata: Map::new(),
        }
    }

    /// Appends a field declaration.
    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Looks up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks `data` against the declared fields.
    #[must_use]
    pub fn check(&self, data: &Map<String, JsonValue>) -> ValidationOutcome {
        let mut errors = Vec::new();

        for field in &self.fields {
            let Some(value) = data.get(&field.name) else {
                if field.required {
                    errors.push(
                        SchemaError::MissingField {
                            field: field.name.clone(),
                        }
                        .to_string(),
                    );
                }
                continue;
            };

            if !value.is_null() && !field.field_type.matches(value) {
                errors.push(
                    SchemaError::TypeMismatch {
                        field: field.name.clone(),
                        expected: field.field_type,
                        actual: FieldType::describe(value),
                    }
                    .to_string(),
                );
            }
        }

        ValidationOutcome::from_messages(errors, Vec::new())
    }
}

impl Named for TemplateDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: NamedRegistry<TemplateDefinition>,
}

impl TemplateRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template, replacing any template with the same name.
    pub fn register(&mut self, template: TemplateDefinition) {
        self.templates.register(template);
    }

    /// Gets a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TemplateDefinition> {
        self.templates.get(name)
    }

    /// Names of all registered templates.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.templates.list()
    }

    /// Validates `data` against the named template.
    ///
    /// An unknown template yields an invalid outcome whose only error says
    /// so; this never fails.
    #[must_use]
    pub fn validate(&self, template_name: &str, data: &Map<String, JsonValue>) -> ValidationOutcome {
        match self.templates.get(template_name) {
            Some(template) => {
                let outcome = template.check(data);
                debug!(
                    template = template_name,
                    valid = outcome.valid,
                    "validated template data"
                );
                outcome
            }
            None => ValidationOutcome::fail(
                SchemaError::TemplateNotFound {
                    name: template_name.to_string(),
                }
                .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn registry_with_x() -> TemplateRegistry {
        let mut registry = TemplateRegistry::new();
        registry.register(
            TemplateDefinition::new("single")
                .with_field(FieldDefinition::required("x", FieldType::Text)),
        );
        registry
    }

    #[test]
    fn empty_data_misses_required_field() {
        let outcome = registry_with_x().validate("single", &Map::new());
        assert!(!outcome.valid);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("'x' missing"));
    }

    #[test]
    fn matching_value_is_valid() {
        let outcome = registry_with_x().validate("single", &object(json!({"x": "a"})));
        assert!(outcome.valid);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn wrong_type_is_a_mismatch() {
        let outcome = registry_with_x().validate("single", &object(json!({"x": 5})));
        assert!(!outcome.valid);
        assert_eq!(outcome.errors, vec!["Field 'x' expects text, got integer"]);
    }

    #[test]
    fn null_is_accepted_for_any_type() {
        let outcome = registry_with_x().validate("single", &object(json!({"x": null})));
        assert!(outcome.valid);
    }

    #[test]
    fn undeclared_fields_are_ignored() {
        let outcome =
            registry_with_x().validate("single", &object(json!({"x": "a", "extra": 1})));
        assert!(outcome.valid);
    }

    #[test]
    fn unknown_template_is_reported_not_raised() {
        let outcome = registry_with_x().validate("missing", &Map::new());
        assert!(!outcome.valid);
        assert_eq!(outcome.errors, vec!["Template 'missing' not found"]);
    }

    #[test]
    fn errors_follow_declaration_order() {
        let mut registry = TemplateRegistry::new();
        registry.register(
            TemplateDefinition::new("pair")
                .with_field(FieldDefinition::required("first", FieldType::Integer))
                .with_field(FieldDefinition::optional("second", FieldType::List))
                .with_field(FieldDefinition::required("third", FieldType::Boolean)),
        );

        let outcome = registry.validate("pair", &object(json!({"second": "nope"})));
        assert_eq!(outcome.errors.len(), 3);
        assert!(outcome.errors[0].contains("'first'"));
        assert!(outcome.errors[1].contains("'second'"));
        assert!(outcome.errors[2].contains("'third'"));
    }

    #[test]
    fn reregistering_replaces_template() {
        let mut registry = registry_with_x();
        registry.register(TemplateDefinition::new("single").with_description("relaxed"));

        assert_eq!(registry.list(), vec!["single"]);
        assert!(registry.validate("single", &Map::new()).valid);
        assert_eq!(
            registry.get("single").map(|t| t.description.as_str()),
            Some("relaxed")
        );
    }
}
