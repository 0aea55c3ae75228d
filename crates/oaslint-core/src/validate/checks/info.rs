//! Info-section checks.

use super::{Check, CheckContext};
use crate::catalog::RuleRecord;
use crate::validate::ValidationResult;
use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

/// Accepts `MAJOR.MINOR.PATCH` with an optional `-rc.N` / `-beta.N` suffix.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+(?:-(?:rc|beta)\.\d+)?$").expect("version regex is valid")
});

/// Fails when a named top-level `info` field is absent or empty.
///
/// Scalars count as empty when whitespace-only; mappings and sequences
/// (e.g. `contact`) count as empty when they have no entries.
#[derive(Debug, Clone)]
pub struct InfoFieldCheck {
    id: &'static str,
    field: &'static str,
}

impl InfoFieldCheck {
    /// The `info-title` rule.
    pub fn title() -> Self {
        Self { id: "info-title", field: "title" }
    }

    /// The `info-description` rule.
    pub fn description() -> Self {
        Self { id: "info-description", field: "description" }
    }

    /// The `info-contact` rule.
    pub fn contact() -> Self {
        Self { id: "info-contact", field: "contact" }
    }
}

impl Check for InfoFieldCheck {
    fn id(&self) -> &'static str {
        self.id
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        if !field_is_present(ctx.index.info_field(self.field)) {
            result.push(rule.violation_at(format!("info/{}", self.field)));
        }
        result
    }
}

fn field_is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Mapping(m)) => !m.is_empty(),
        Some(Value::Sequence(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Fails when `info.version` is absent or not a release-style version.
#[derive(Debug, Clone, Default)]
pub struct InfoVersionCheck;

impl InfoVersionCheck {
    /// Creates the `info-version` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for InfoVersionCheck {
    fn id(&self) -> &'static str {
        "info-version"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        let version = ctx
            .index
            .info_field("version")
            .and_then(Value::as_str)
            .unwrap_or("");
        if !VERSION_RE.is_match(version.trim()) {
            result.push(rule.violation_at("info/version"));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RuleCatalog;
    use crate::index::SpecIndex;

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
    fn title_present_passes() {
        let result = run_check(
            &InfoFieldCheck::title(),
            "info-title",
            "info:\n  title: Pet Store\n",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn whitespace_title_fails() {
        let result = run_check(
            &InfoFieldCheck::title(),
            "info-title",
            "info:\n  title: '   '\n",
        );
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].field_path.as_deref(), Some("info/title"));
    }

    #[test]
    fn absent_title_fails() {
        let result = run_check(&InfoFieldCheck::title(), "info-title", "info: {}\n");
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn missing_info_section_fails() {
        let result = run_check(&InfoFieldCheck::title(), "info-title", "openapi: 3.0.0\n");
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn contact_mapping_with_entries_passes() {
        let result = run_check(
            &InfoFieldCheck::contact(),
            "info-contact",
            "info:\n  contact:\n    email: api@example.com\n",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn empty_contact_mapping_fails() {
        let result = run_check(
            &InfoFieldCheck::contact(),
            "info-contact",
            "info:\n  contact: {}\n",
        );
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn version_accepts_release_forms() {
        for version in ["1.0.0", "2.3.4-rc.1", "1.0.0-beta.12", "10.20.30"] {
            let result = run_check(
                &InfoVersionCheck::new(),
                "info-version",
                &format!("info:\n  version: '{version}'\n"),
            );
            assert!(result.is_ok(), "expected '{version}' to pass");
        }
    }

    #[test]
    fn version_rejects_non_release_forms() {
        for version in ["1.0", "v1.0.0", "", "1.0.0-alpha.1", "1.0.0-rc"] {
            let result = run_check(
                &InfoVersionCheck::new(),
                "info-version",
                &format!("info:\n  version: '{version}'\n"),
            );
            assert_eq!(result.violations.len(), 1, "expected '{version}' to fail");
        }
    }

    #[test]
    fn numeric_version_scalar_fails() {
        // `version: 1.0` parses as a float, not a string.
        let result = run_check(&InfoVersionCheck::new(), "info-version", "info:\n  version: 1.0\n");
        assert_eq!(result.violations.len(), 1);
    }
}
