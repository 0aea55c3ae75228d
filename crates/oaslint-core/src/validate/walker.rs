//! Recursive schema traversal.
//!
//! The walker visits a schema subtree in pre-order, threading a symbolic
//! field path through nested `properties` and `items` schemas. Checks
//! supply a closure that inspects each node and records violations.

use serde_yaml::Value;

/// Recursion ceiling for schema traversal.
///
/// Schemas are tree-shaped for traversal purposes; structures that are
/// cyclic after upstream reference resolution would otherwise recurse
/// forever. Traversal stops silently at this depth.
pub const MAX_SCHEMA_DEPTH: usize = 128;

/// Walks a schema subtree in pre-order, invoking `visit` on every mapping
/// node with the field path accumulated so far.
///
/// Each `properties` entry extends the path with `/<propertyName>`; an
/// `items` schema extends it with the item schema's own `type` value when
/// that is a scalar, else the generic `items` marker. Malformed nodes
/// (`properties` present but not a mapping, non-mapping `items`) are
/// treated as absent. Traversal never fails.
pub fn walk_schema<F>(node: &Value, path: &str, visit: &mut F)
where
    F: FnMut(&Value, &str),
{
    walk_at(node, path, 0, visit);
}

fn walk_at<F>(node: &Value, path: &str, depth: usize, visit: &mut F)
where
    F: FnMut(&Value, &str),
{
    if depth > MAX_SCHEMA_DEPTH || !node.is_mapping() {
        return;
    }

    visit(node, path);

    if let Some(Value::Mapping(properties)) = node.get("properties") {
        for (name, subschema) in properties {
            if let Some(name) = name.as_str() {
                let child_path = format!("{path}/{name}");
                walk_at(subschema, &child_path, depth + 1, visit);
            }
        }
    }

    if let Some(items) = node.get("items") {
        if items.is_mapping() {
            let segment = schema_type(items).unwrap_or("items");
            let child_path = format!("{path}/{segment}");
            walk_at(items, &child_path, depth + 1, visit);
        }
    }
}

/// Returns the schema node's declared `type` when it is a scalar string.
pub fn schema_type(node: &Value) -> Option<&str> {
    node.get("type").and_then(Value::as_str)
}

/// Returns true if the schema node declares an `enum`.
pub fn is_enum(node: &Value) -> bool {
    node.get("enum").is_some()
}
