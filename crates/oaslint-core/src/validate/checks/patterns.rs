//! Pattern-text and forbidden-property checks over component schemas.

use super::{Check, CheckContext};
use crate::catalog::RuleRecord;
use crate::validate::ValidationResult;
use crate::validate::walker::{is_enum, schema_type, walk_schema};
use log::warn;
use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

/// Default forbidden token: the standalone placeholder `NA`.
static DEFAULT_FORBIDDEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bNA\b").expect("forbidden-text regex is valid"));

/// Fails wherever a schema `pattern` value's literal text matches a
/// forbidden regex.
///
/// The regex defaults to the standalone token `NA` and can be overridden
/// per rule with a `pattern` parameter (validated at catalog load).
#[derive(Debug, Clone, Default)]
pub struct ForbiddenPatternCheck;

impl ForbiddenPatternCheck {
    /// Creates the `pattern-forbidden-text` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for ForbiddenPatternCheck {
    fn id(&self) -> &'static str {
        "pattern-forbidden-text"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let compiled;
        let forbidden = match rule.param_str("pattern").and_then(|p| Regex::new(p).ok()) {
            Some(re) => {
                compiled = re;
                &compiled
            }
            None => &*DEFAULT_FORBIDDEN_RE,
        };

        let mut result = ValidationResult::new();
        for (name, schema) in ctx.index.component_schemas() {
            walk_schema(schema, name, &mut |node, path| {
                if let Some(pattern) = node.get("pattern").and_then(Value::as_str) {
                    if forbidden.is_match(pattern) {
                        result.push(rule.violation_at(path));
                    }
                }
            });
        }
        result
    }
}

/// Fails when a string-typed, non-enum schema declares a `pattern` whose
/// text carries leading or trailing whitespace.
#[derive(Debug, Clone, Default)]
pub struct PatternWhitespaceCheck;

impl PatternWhitespaceCheck {
    /// Creates the `pattern-no-surrounding-whitespace` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for PatternWhitespaceCheck {
    fn id(&self) -> &'static str {
        "pattern-no-surrounding-whitespace"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for (name, schema) in ctx.index.component_schemas() {
            walk_schema(schema, name, &mut |node, path| {
                if schema_type(node) != Some("string") || is_enum(node) {
                    return;
                }
                if let Some(pattern) = node.get("pattern").and_then(Value::as_str) {
                    if pattern.trim() != pattern {
                        result.push(rule.violation_at(path));
                    }
                }
            });
        }
        result
    }
}

/// Fails when a named component schema declares a forbidden top-level
/// property. Both names come from rule parameters: `schema` (component
/// name) and `property`.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenPropertyCheck;

impl ForbiddenPropertyCheck {
    /// Creates the `schema-forbidden-property` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for ForbiddenPropertyCheck {
    fn id(&self) -> &'static str {
        "schema-forbidden-property"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        let (Some(schema_name), Some(property)) =
            (rule.param_str("schema"), rule.param_str("property"))
        else {
            warn!(
                "rule '{}' needs 'schema' and 'property' parameters, skipping",
                rule.id
            );
            return result;
        };

        for (name, schema) in ctx.index.component_schemas() {
            if name.rsplit('/').next() != Some(schema_name) {
                continue;
            }
            let declares_property = schema
                .get("properties")
                .and_then(|props| props.get(property))
                .is_some();
            if declares_property {
                result.push(rule.violation_at(format!("{name}/{property}")));
            }
        }
        result
    }
}
