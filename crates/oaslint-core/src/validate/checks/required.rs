//! Required/properties consistency check.

use super::{Check, CheckContext};
use crate::catalog::RuleRecord;
use crate::validate::ValidationResult;
use crate::validate::walker::{schema_type, walk_schema};
use serde_yaml::Value;
use std::collections::HashSet;

/// For every object-typed schema, every name listed in `required` must also
/// be declared under `properties`. One violation per missing name, field
/// path `<parent path>/<missing name>`.
#[derive(Debug, Clone, Default)]
pub struct RequiredPropertiesCheck;

impl RequiredPropertiesCheck {
    /// Creates the `required-properties-exist` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for RequiredPropertiesCheck {
    fn id(&self) -> &'static str {
        "required-properties-exist"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for (name, schema) in ctx.index.component_schemas() {
            walk_schema(schema, name, &mut |node, path| {
                if schema_type(node) != Some("object") {
                    return;
                }
                let declared: HashSet<&str> = node
                    .get("properties")
                    .and_then(Value::as_mapping)
                    .map(|props| props.keys().filter_map(Value::as_str).collect())
                    .unwrap_or_default();
                let required = node
                    .get("required")
                    .and_then(Value::as_sequence)
                    .into_iter()
                    .flatten()
                    .filter_map(Value::as_str);
                for required_name in required {
                    if !declared.contains(required_name) {
                        result.push(rule.violation_at(format!("{path}/{required_name}")));
                    }
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

    fn run_check(yaml: &str) -> ValidationResult {
        let root: Value = serde_yaml::from_str(yaml).unwrap();
        let index = SpecIndex::new(&root);
        let catalog = RuleCatalog::from_yaml_str(
            "rules:\n  required-properties-exist:\n    severity: error\n    description: undeclared required property\n",
        )
        .unwrap();
        let ctx = CheckContext::new(&index);
        RequiredPropertiesCheck::new().run(catalog.get("required-properties-exist").unwrap(), &ctx)
    }

    #[test]
    fn consistent_required_passes() {
        let result = run_check(
            r#"
            components:
              schemas:
                Pet:
                  type: object
                  required: [name, id]
                  properties:
                    id: { type: integer }
                    name: { type: string }
            "#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn one_violation_per_missing_name() {
        let result = run_check(
            r#"
            components:
              schemas:
                Pet:
                  type: object
                  required: [name, id, owner]
                  properties:
                    name: { type: string }
            "#,
        );
        let paths: Vec<_> = result
            .violations
            .iter()
            .filter_map(|v| v.field_path.as_deref())
            .collect();
        assert_eq!(
            paths,
            vec![
                "#/components/schemas/Pet/id",
                "#/components/schemas/Pet/owner",
            ]
        );
    }

    #[test]
    fn required_without_properties_flags_everything() {
        let result = run_check(
            r#"
            components:
              schemas:
                Pet:
                  type: object
                  required: [name]
            "#,
        );
        assert_eq!(result.violations.len(), 1);
        assert_eq!(
            result.violations[0].field_path.as_deref(),
            Some("#/components/schemas/Pet/name")
        );
    }

    #[test]
    fn nested_objects_are_checked() {
        let result = run_check(
            r#"
            components:
              schemas:
                Pet:
                  type: object
                  properties:
                    owner:
                      type: object
                      required: [email]
                      properties:
                        name: { type: string }
            "#,
        );
        assert_eq!(result.violations.len(), 1);
        assert_eq!(
            result.violations[0].field_path.as_deref(),
            Some("#/components/schemas/Pet/owner/email")
        );
    }

    #[test]
    fn non_object_schemas_are_ignored() {
        let result = run_check(
            r#"
            components:
              schemas:
                Names:
                  type: array
                  required: [whatever]
                  items:
                    type: string
            "#,
        );
        assert!(result.is_ok());
    }
}
