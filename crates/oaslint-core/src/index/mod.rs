//! Structured, queryable views over a parsed contract document.
//!
//! The index is built once per document and hands out enumerable views:
//! declared servers, path operations, component schemas, tag and security
//! declarations, plus pre-computed reference-integrity findings. It holds
//! only borrowed references into the document tree and never mutates it.
//!
//! Malformed shapes (e.g. `paths` present but not a mapping) yield empty
//! views; a structural anomaly is never an error by itself.

mod refs;

use crate::validate::{ValidationResult, Violation};
use serde_yaml::Value;

/// HTTP methods recognized as operations under a path item.
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// One operation entry: `paths.<path>.<method>`.
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    /// The path template (e.g. `/user-accounts/{id}`).
    pub path: &'a str,
    /// The lowercase HTTP method key.
    pub method: &'a str,
    /// The operation node.
    pub node: &'a Value,
}

/// Queryable index over a parsed contract document.
#[derive(Debug)]
pub struct SpecIndex<'a> {
    root: &'a Value,
    servers: Vec<&'a str>,
    paths: Vec<&'a str>,
    operations: Vec<Operation<'a>>,
    schemas: Vec<(String, &'a Value)>,
    tag_count: usize,
    has_security_schemes: bool,
    reference_violations: Vec<Violation>,
}

impl<'a> SpecIndex<'a> {
    /// Builds the index from a parsed document root.
    pub fn new(root: &'a Value) -> Self {
        let servers = collect_servers(root);
        let (paths, operations) = collect_operations(root);
        let schemas = collect_schemas(root);
        let tag_count = root
            .get("tags")
            .and_then(Value::as_sequence)
            .map_or(0, Vec::len);
        let has_security_schemes = root
            .get("components")
            .and_then(|c| c.get("securitySchemes"))
            .and_then(Value::as_mapping)
            .is_some_and(|m| !m.is_empty());
        let reference_violations = refs::reference_violations(root);

        log::debug!(
            "indexed document: {} server(s), {} path(s), {} operation(s), {} schema(s), {} reference issue(s)",
            servers.len(),
            paths.len(),
            operations.len(),
            schemas.len(),
            reference_violations.len()
        );

        Self {
            root,
            servers,
            paths,
            operations,
            schemas,
            tag_count,
            has_security_schemes,
            reference_violations,
        }
    }

    /// Raw URL values of the declared root servers.
    pub fn servers(&self) -> &[&'a str] {
        &self.servers
    }

    /// Path template keys in document order.
    pub fn paths(&self) -> &[&'a str] {
        &self.paths
    }

    /// Every path operation in document order.
    pub fn operations(&self) -> &[Operation<'a>] {
        &self.operations
    }

    /// Component schemas as `(qualified name, node)` pairs, named
    /// `#/components/schemas/<Name>`.
    pub fn component_schemas(&self) -> &[(String, &'a Value)] {
        &self.schemas
    }

    /// Number of declared top-level tags.
    pub fn tag_count(&self) -> usize {
        self.tag_count
    }

    /// True if the document declares at least one security scheme.
    pub fn has_security_schemes(&self) -> bool {
        self.has_security_schemes
    }

    /// A top-level `info` field node.
    pub fn info_field(&self, name: &str) -> Option<&'a Value> {
        self.root.get("info").and_then(|info| info.get(name))
    }

    /// Pre-computed reference-integrity findings, ready to merge ahead of
    /// rule evaluation.
    pub fn reference_violations(&self) -> ValidationResult {
        ValidationResult::with_violations(self.reference_violations.clone())
    }
}

fn collect_servers(root: &Value) -> Vec<&str> {
    root.get("servers")
        .and_then(Value::as_sequence)
        .map(|servers| {
            servers
                .iter()
                .filter_map(|server| server.get("url").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}

fn collect_operations(root: &Value) -> (Vec<&str>, Vec<Operation<'_>>) {
    let mut paths = Vec::new();
    let mut operations = Vec::new();

    let Some(path_items) = root.get("paths").and_then(Value::as_mapping) else {
        return (paths, operations);
    };

    for (path_key, item) in path_items {
        let Some(path) = path_key.as_str() else {
            continue;
        };
        paths.push(path);

        let Some(item) = item.as_mapping() else {
            continue;
        };
        for (method_key, node) in item {
            if let Some(method) = method_key.as_str() {
                if HTTP_METHODS.contains(&method) {
                    operations.push(Operation { path, method, node });
                }
            }
        }
    }

    (paths, operations)
}

fn collect_schemas(root: &Value) -> Vec<(String, &Value)> {
    root.get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_mapping)
        .map(|schemas| {
            schemas
                .iter()
                .filter_map(|(name, node)| {
                    name.as_str()
                        .map(|n| (format!("#/components/schemas/{n}"), node))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn servers_expose_raw_urls() {
        let root = doc(
            r#"
            servers:
              - url: https://api.example.com/v1
              - url: http://legacy.example.com
                description: old box
            "#,
        );
        let index = SpecIndex::new(&root);
        assert_eq!(
            index.servers(),
            &["https://api.example.com/v1", "http://legacy.example.com"]
        );
    }

    #[test]
    fn operations_cover_methods_only() {
        let root = doc(
            r#"
            paths:
              /pets:
                summary: everything about pets
                get:
                  operationId: listPets
                post:
                  operationId: createPet
                parameters: []
              /pets/{id}:
                delete:
                  operationId: deletePet
            "#,
        );
        let index = SpecIndex::new(&root);
        assert_eq!(index.paths(), &["/pets", "/pets/{id}"]);

        let ops: Vec<_> = index
            .operations()
            .iter()
            .map(|op| (op.path, op.method))
            .collect();
        assert_eq!(
            ops,
            vec![("/pets", "get"), ("/pets", "post"), ("/pets/{id}", "delete")]
        );
    }

    #[test]
    fn component_schemas_are_fully_qualified() {
        let root = doc(
            r#"
            components:
              schemas:
                Pet:
                  type: object
                Error:
                  type: object
            "#,
        );
        let index = SpecIndex::new(&root);
        let names: Vec<_> = index
            .component_schemas()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["#/components/schemas/Pet", "#/components/schemas/Error"]
        );
    }

    #[test]
    fn tags_and_security() {
        let root = doc(
            r#"
            tags:
              - name: pets
              - name: store
            components:
              securitySchemes:
                bearer:
                  type: http
            "#,
        );
        let index = SpecIndex::new(&root);
        assert_eq!(index.tag_count(), 2);
        assert!(index.has_security_schemes());
    }

    #[test]
    fn empty_document_has_empty_views() {
        let root = doc("openapi: 3.0.0");
        let index = SpecIndex::new(&root);
        assert!(index.servers().is_empty());
        assert!(index.paths().is_empty());
        assert!(index.operations().is_empty());
        assert!(index.component_schemas().is_empty());
        assert_eq!(index.tag_count(), 0);
        assert!(!index.has_security_schemes());
        assert!(index.reference_violations().is_ok());
    }

    #[test]
    fn malformed_sections_yield_empty_views() {
        let root = doc(
            r#"
            servers: not-a-sequence
            paths: 42
            tags: {}
            components: []
            "#,
        );
        let index = SpecIndex::new(&root);
        assert!(index.servers().is_empty());
        assert!(index.operations().is_empty());
        assert!(index.component_schemas().is_empty());
        assert_eq!(index.tag_count(), 0);
    }

    #[test]
    fn info_field_lookup() {
        let root = doc(
            r#"
            info:
              title: Pet Store
              version: 1.0.0
            "#,
        );
        let index = SpecIndex::new(&root);
        assert_eq!(
            index.info_field("title").and_then(Value::as_str),
            Some("Pet Store")
        );
        assert!(index.info_field("contact").is_none());
    }
}
