//! Reference-integrity scan.
//!
//! Walks the whole document for `$ref` values and verifies that every local
//! reference (`#/...`) resolves to an existing node. External file and URL
//! references are outside this engine's responsibility and skipped.

use crate::validate::{RuleId, Severity, Violation};
use serde_yaml::Value;

/// Rule id carried by reference-integrity violations.
pub const REFERENCE_INTEGRITY: &str = "reference-integrity";

/// Scans the document and reports every unresolvable local `$ref`.
pub fn reference_violations(root: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    scan(root, root, "#", &mut violations);
    violations
}

fn scan(root: &Value, node: &Value, path: &str, violations: &mut Vec<Violation>) {
    match node {
        Value::Mapping(mapping) => {
            for (key, value) in mapping {
                let Some(key) = key.as_str() else { continue };
                let child_path = format!("{path}/{key}");
                if key == "$ref" {
                    if let Some(target) = value.as_str() {
                        check_ref(root, target, &child_path, violations);
                    }
                } else {
                    scan(root, value, &child_path, violations);
                }
            }
        }
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                let child_path = format!("{path}/{i}");
                scan(root, item, &child_path, violations);
            }
        }
        _ => {}
    }
}

fn check_ref(root: &Value, target: &str, path: &str, violations: &mut Vec<Violation>) {
    // Only local JSON-pointer-style references are resolvable here.
    let Some(pointer) = target.strip_prefix("#/") else {
        return;
    };
    if !resolves(root, pointer) {
        violations.push(
            Violation::new(
                RuleId::new(REFERENCE_INTEGRITY),
                Severity::Error,
                format!("unresolved reference '{target}'"),
            )
            .with_field_path(path),
        );
    }
}

fn resolves(root: &Value, pointer: &str) -> bool {
    let mut current = root;
    for segment in pointer.split('/') {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        current = match current {
            Value::Mapping(_) => match current.get(segment.as_str()) {
                Some(next) => next,
                None => return false,
            },
            Value::Sequence(items) => match segment.parse::<usize>().ok().and_then(|i| items.get(i))
            {
                Some(next) => next,
                None => return false,
            },
            _ => return false,
        };
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn resolvable_refs_produce_nothing() {
        let root = doc(
            r#"
            paths:
              /pets:
                get:
                  responses:
                    '200':
                      content:
                        application/json:
                          schema:
                            $ref: '#/components/schemas/Pet'
            components:
              schemas:
                Pet:
                  type: object
            "#,
        );
        assert!(reference_violations(&root).is_empty());
    }

    #[test]
    fn unresolved_ref_is_reported_with_location() {
        let root = doc(
            r#"
            components:
              schemas:
                Pet:
                  properties:
                    owner:
                      $ref: '#/components/schemas/Owner'
            "#,
        );
        let violations = reference_violations(&root);
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rule.as_str(), REFERENCE_INTEGRITY);
        assert_eq!(v.severity, Severity::Error);
        assert!(v.message.contains("#/components/schemas/Owner"));
        assert_eq!(
            v.field_path.as_deref(),
            Some("#/components/schemas/Pet/properties/owner/$ref")
        );
    }

    #[test]
    fn external_refs_are_skipped() {
        let root = doc(
            r#"
            components:
              schemas:
                Pet:
                  $ref: './common.yaml#/Pet'
                Owner:
                  $ref: 'https://example.com/schemas.yaml#/Owner'
            "#,
        );
        assert!(reference_violations(&root).is_empty());
    }

    #[test]
    fn escaped_pointer_segments_resolve() {
        let root = doc(
            r#"
            paths:
              /pets:
                get: {}
            check:
              $ref: '#/paths/~1pets/get'
            "#,
        );
        assert!(reference_violations(&root).is_empty());
    }

    #[test]
    fn sequence_indices_resolve() {
        let root = doc(
            r#"
            servers:
              - url: https://api.example.com
            check:
              $ref: '#/servers/0/url'
            bad:
              $ref: '#/servers/3/url'
            "#,
        );
        let violations = reference_violations(&root);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("#/servers/3/url"));
    }
}
