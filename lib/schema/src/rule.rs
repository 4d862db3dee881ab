//! Validation rules.
//!
//! A rule wraps a check function and a severity. The rule validator runs a
//! list of rules by name and merges their outcomes:
//!
//! - an unknown rule name is always an aggregate error
//! - a rule's own errors go to aggregate errors when its severity is
//!   `error`, and to aggregate warnings when it is `warning`
//! - a rule's own warnings always go to aggregate warnings
//!
//! So `warning` rules can add warnings but never invalidate a value.

use crate::error::SchemaError;
use crate::outcome::ValidationOutcome;
use agency_toolkit_core::{Named, NamedRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// How failures reported by a rule are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Failures invalidate the value.
    #[default]
    Error,
    /// Failures are advisory only.
    Warning,
}

/// Signature of a rule's check function.
pub type CheckFn = Arc<dyn Fn(&JsonValue) -> ValidationOutcome + Send + Sync>;

/// A named check.
#[derive(Clone)]
pub struct ValidationRule {
    /// Unique rule name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// How this rule's errors are counted.
    pub severity: Severity,
    check: CheckFn,
}

impl ValidationRule {
    /// Creates an error-severity rule.
    #[must_use]
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&JsonValue) -> ValidationOutcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            severity: Severity::Error,
            check: Arc::new(check),
        }
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Runs the check.
    #[must_use]
    pub fn check(&self, data: &JsonValue) -> ValidationOutcome {
        (self.check)(data)
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

impl Named for ValidationRule {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Registry of validation rules.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: NamedRegistry<ValidationRule>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a rule, replacing any rule with the same name.
    pub fn register(&mut self, rule: ValidationRule) {
        self.rules.register(rule);
    }

    /// Gets a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ValidationRule> {
        self.rules.get(name)
    }

    /// Names of all registered rules.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.rules.list()
    }

    /// Runs the named rules against `data`, in order, and merges the results.
    #[must_use]
    pub fn validate<S: AsRef<str>>(&self, data: &JsonValue, rule_names: &[S]) -> ValidationOutcome {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for name in rule_names {
            let name = name.as_ref();
            let Some(rule) = self.rules.get(name) else {
                errors.push(
                    SchemaError::RuleNotFound {
                        name: name.to_string(),
                    }
                    .to_string(),
                );
                continue;
            };

            let outcome = rule.check(data);
            match rule.severity {
                Severity::Error => errors.extend(outcome.errors),
                Severity::Warning => warnings.extend(outcome.errors),
            }
            warnings.extend(outcome.warnings);
        }

        ValidationOutcome::from_messages(errors, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn positive() -> ValidationRule {
        ValidationRule::new("positive", |data| match data.as_i64() {
            Some(n) if n > 0 => ValidationOutcome::pass(),
            _ => ValidationOutcome::fail("Value must be positive"),
        })
    }

    fn even() -> ValidationRule {
        ValidationRule::new("even", |data| match data.as_i64() {
            Some(n) if n % 2 == 0 => ValidationOutcome::pass(),
            _ => ValidationOutcome::fail("Value should be even"),
        })
        .with_severity(Severity::Warning)
    }

    fn registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry.register(positive());
        registry.register(even());
        registry
    }

    #[test]
    fn passing_rule_is_valid() {
        let outcome = registry().validate(&json!(10), &["positive"]);
        assert!(outcome.valid);
    }

    #[test]
    fn failing_error_rule_invalidates() {
        let outcome = registry().validate(&json!(-5), &["positive"]);
        assert!(!outcome.valid);
        assert_eq!(outcome.errors, vec!["Value must be positive"]);
    }

    #[test]
    fn error_and_warning_rules_are_routed_separately() {
        let outcome = registry().validate(&json!(-5), &["positive", "even"]);
        assert!(!outcome.valid);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.warnings, vec!["Value should be even"]);
    }

    #[test]
    fn warning_rule_alone_never_invalidates() {
        let outcome = registry().validate(&json!(3), &["even"]);
        assert!(outcome.valid);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn unknown_rule_is_always_an_error() {
        let outcome = registry().validate(&json!(1), &["positive", "ghost"]);
        assert!(!outcome.valid);
        assert_eq!(outcome.errors, vec!["Rule 'ghost' not found"]);
    }

    #[test]
    fn rule_warnings_pass_through_regardless_of_severity() {
        let mut registry = RuleRegistry::new();
        registry.register(ValidationRule::new("chatty", |_| {
            ValidationOutcome::pass().with_warning("just so you know")
        }));

        let outcome = registry.validate(&json!({}), &["chatty"]);
        assert!(outcome.valid);
        assert_eq!(outcome.warnings, vec!["just so you know"]);
    }

    #[test]
    fn warning_rule_demotes_errors_and_keeps_warnings() {
        let mut registry = RuleRegistry::new();
        registry.register(
            ValidationRule::new("style_guide", |_| {
                ValidationOutcome::from_messages(
                    vec![
                        "Headline too long".to_string(),
                        "Missing call to action".to_string(),
                    ],
                    vec!["Emoji count is high".to_string()],
                )
            })
            .with_severity(Severity::Warning),
        );

        let outcome = registry.validate(&json!({"headline": "..."}), &["style_guide"]);
        assert!(outcome.valid);
        assert!(outcome.errors.is_empty());
        assert_eq!(
            outcome.warnings,
            vec!["Headline too long", "Missing call to action", "Emoji count is high"]
        );
    }

    #[test]
    fn list_and_get() {
        let registry = registry();
        assert_eq!(registry.list(), vec!["positive", "even"]);
        assert_eq!(
            registry.get("even").map(|r| r.severity),
            Some(Severity::Warning)
        );
    }
}
