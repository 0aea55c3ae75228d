//! Array bound check over component schemas.

use super::{Check, CheckContext};
use crate::catalog::RuleRecord;
use crate::validate::ValidationResult;
use crate::validate::walker::{schema_type, walk_schema};

/// Requires `maxItems` on every array-typed schema.
#[derive(Debug, Clone, Default)]
pub struct ArrayMaxItemsCheck;

impl ArrayMaxItemsCheck {
    /// Creates the `array-max-items` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for ArrayMaxItemsCheck {
    fn id(&self) -> &'static str {
        "array-max-items"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for (name, schema) in ctx.index.component_schemas() {
            walk_schema(schema, name, &mut |node, path| {
                if schema_type(node) == Some("array") && node.get("maxItems").is_none() {
                    result.push(rule.violation_at(path));
                }
            });
        }
        result
    }
}
