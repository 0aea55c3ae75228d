//! Server, path-naming, and operation-field checks.

use super::{Check, CheckContext};
use crate::catalog::RuleRecord;
use crate::validate::ValidationResult;
use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

static PATH_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("path parameter regex is valid"));

static KEBAB_SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("kebab regex is valid"));

/// Fails for every declared server whose URL is not HTTPS.
#[derive(Debug, Clone, Default)]
pub struct HttpsServersCheck;

impl HttpsServersCheck {
    /// Creates the `server-https-only` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for HttpsServersCheck {
    fn id(&self) -> &'static str {
        "server-https-only"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for url in ctx.index.servers() {
            let url = url.trim().trim_matches('\'');
            if !url.starts_with("https://") {
                result.push(rule.violation_at(url));
            }
        }
        result
    }
}

/// Requires every path segment to be lowercase kebab-case once `{variable}`
/// parameters are stripped.
#[derive(Debug, Clone, Default)]
pub struct KebabCasePathsCheck;

impl KebabCasePathsCheck {
    /// Creates the `paths-kebab-case` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for KebabCasePathsCheck {
    fn id(&self) -> &'static str {
        "paths-kebab-case"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for path in ctx.index.paths() {
            let stripped = PATH_PARAM_RE.replace_all(path, "");
            let ok = stripped
                .split('/')
                .filter(|segment| !segment.is_empty())
                .all(|segment| KEBAB_SEGMENT_RE.is_match(segment));
            if !ok {
                result.push(rule.violation_at(*path));
            }
        }
        result
    }
}

/// Fails for every operation where a named field is absent or empty.
#[derive(Debug, Clone)]
pub struct OperationFieldCheck {
    id: &'static str,
    field: &'static str,
}

impl OperationFieldCheck {
    /// The `operation-operation-id` rule.
    pub fn operation_id() -> Self {
        Self { id: "operation-operation-id", field: "operationId" }
    }

    /// The `operation-tags` rule.
    pub fn tags() -> Self {
        Self { id: "operation-tags", field: "tags" }
    }
}

impl Check for OperationFieldCheck {
    fn id(&self) -> &'static str {
        self.id
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        for op in ctx.index.operations() {
            if !field_is_present(op.node.get(self.field)) {
                result.push(rule.violation_at(format!("{}/{}", op.path, op.method)));
            }
        }
        result
    }
}

fn field_is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Sequence(s)) => !s.is_empty(),
        Some(Value::Mapping(m)) => !m.is_empty(),
        Some(_) => true,
    }
}
