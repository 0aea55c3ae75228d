//! String and enum constraint checks over component schemas.
//!
//! These two rule families are mutually exclusive per node: enum-typed
//! schemas are exempt from the constraint-presence requirement and instead
//! must not carry length constraints at all.

use super::{Check, CheckContext};
use crate::catalog::RuleRecord;
use crate::validate::ValidationResult;
use crate::validate::walker::{is_enum, schema_type, walk_schema};

/// Requires a constraint key (`maxLength`, `minLength`, or `pattern`) on
/// every string-typed, non-enum schema.
#[derive(Debug, Clone)]
pub struct StringConstraintCheck {
    id: &'static str,
    key: &'static str,
}

impl StringConstraintCheck {
    /// The `string-max-length` rule.
    pub fn max_length() -> Self {
        Self { id: "string-max-length", key: "maxLength" }
    }

    /// The `string-min-length` rule.
    pub fn min_length() -> Self {
        Self { id: "string-min-length", key: "minLength" }
    }

    /// The `string-pattern` rule.
    pub fn pattern() -> Self {
        Self { id: "string-pattern", key: "pattern" }
    }
}

impl Check for StringConstraintCheck {
    fn id(&self) -> &'static str {
        self.id
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for (name, schema) in ctx.index.component_schemas() {
            walk_schema(schema, name, &mut |node, path| {
                if schema_type(node) == Some("string")
                    && !is_enum(node)
                    && node.get(self.key).is_none()
                {
                    result.push(rule.violation_at(path));
                }
            });
        }
        result
    }
}

/// Forbids a length constraint (`maxLength` or `minLength`) on enum schemas.
#[derive(Debug, Clone)]
pub struct EnumConstraintCheck {
    id: &'static str,
    key: &'static str,
}

impl EnumConstraintCheck {
    /// The `enum-no-max-length` rule.
    pub fn max_length() -> Self {
        Self { id: "enum-no-max-length", key: "maxLength" }
    }

    /// The `enum-no-min-length` rule.
    pub fn min_length() -> Self {
        Self { id: "enum-no-min-length", key: "minLength" }
    }
}

impl Check for EnumConstraintCheck {
    fn id(&self) -> &'static str {
        self.id
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for (name, schema) in ctx.index.component_schemas() {
            walk_schema(schema, name, &mut |node, path| {
                if is_enum(node) && node.get(self.key).is_some() {
                    result.push(rule.violation_at(path));
                }
            });
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RuleCatalog;
    use crate::index::SpecIndex;
    use serde_yaml::Value;

    fn run_check(check: &dyn Check, rule_id: &str, yaml: &str) -> ValidationResult {
        let root: Value = serde_yaml::from_str(yaml).unwrap();
        let index = SpecIndex::new(&root);
        let catalog = RuleCatalog::from_yaml_str(&format!(
            "rules:\n  {rule_id}:\n    severity: error\n    description: check failed\n"
        ))
        .unwrap();
        let ctx = CheckContext::new(&index);
        check.run(catalog.get(rule_id).unwrap(), &ctx)
    }

    #[test]
    fn string_with_max_length_passes() {
        let result = run_check(
            &StringConstraintCheck::max_length(),
            "string-max-length",
            r#"
            components:
              schemas:
                Pet:
                  type: object
                  properties:
                    name:
                      type: string
                      maxLength: 64
            "#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn string_without_max_length_fails_with_path() {
        let result = run_check(
            &StringConstraintCheck::max_length(),
            "string-max-length",
            r#"
            components:
              schemas:
                Pet:
                  type: object
                  properties:
                    name:
                      type: string
            "#,
        );
        assert_eq!(result.violations.len(), 1);
        assert_eq!(
            result.violations[0].field_path.as_deref(),
            Some("#/components/schemas/Pet/name")
        );
    }

    #[test]
    fn enum_string_is_exempt_from_constraint_presence() {
        let result = run_check(
            &StringConstraintCheck::max_length(),
            "string-max-length",
            r#"
            components:
              schemas:
                Status:
                  type: string
                  enum: [open, closed]
            "#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn nested_array_item_strings_are_checked() {
        let result = run_check(
            &StringConstraintCheck::pattern(),
            "string-pattern",
            r#"
            components:
              schemas:
                Pet:
                  type: object
                  properties:
                    tags:
                      type: array
                      items:
                        type: string
            "#,
        );
        assert_eq!(result.violations.len(), 1);
        assert_eq!(
            result.violations[0].field_path.as_deref(),
            Some("#/components/schemas/Pet/tags/string")
        );
    }

    #[test]
    fn enum_with_max_length_fails() {
        let result = run_check(
            &EnumConstraintCheck::max_length(),
            "enum-no-max-length",
            r#"
            components:
              schemas:
                Status:
                  type: string
                  enum: [open, closed]
                  maxLength: 10
            "#,
        );
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn enum_without_constraints_passes() {
        let result = run_check(
            &EnumConstraintCheck::min_length(),
            "enum-no-min-length",
            r#"
            components:
              schemas:
                Status:
                  type: string
                  enum: [open, closed]
            "#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn rule_families_are_mutually_exclusive_per_node() {
        let yaml = r#"
            components:
              schemas:
                Status:
                  type: string
                  enum: [a, b]
                  maxLength: 3
                Name:
                  type: string
        "#;
        let presence = run_check(
            &StringConstraintCheck::max_length(),
            "string-max-length",
            yaml,
        );
        let forbidden = run_check(&EnumConstraintCheck::max_length(), "enum-no-max-length", yaml);

        // The enum node only trips the forbidden rule; the plain string only
        // trips the presence rule.
        assert_eq!(presence.violations.len(), 1);
        assert_eq!(
            presence.violations[0].field_path.as_deref(),
            Some("#/components/schemas/Name")
        );
        assert_eq!(forbidden.violations.len(), 1);
        assert_eq!(
            forbidden.violations[0].field_path.as_deref(),
            Some("#/components/schemas/Status")
        );
    }
}
