//! Document-level existence checks.

use super::{Check, CheckContext};
use crate::catalog::RuleRecord;
use crate::validate::ValidationResult;

/// Fails when the document declares no security schemes.
#[derive(Debug, Clone, Default)]
pub struct SecuritySchemesCheck;

impl SecuritySchemesCheck {
    /// Creates the `security-schemes` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for SecuritySchemesCheck {
    fn id(&self) -> &'static str {
        "security-schemes"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        if !ctx.index.has_security_schemes() {
            result.push(rule.violation());
        }
        result
    }
}

/// Fails when the document declares zero tags.
#[derive(Debug, Clone, Default)]
pub struct TagsCheck;

impl TagsCheck {
    /// Creates the `openapi-tags` check.
    pub fn new() -> Self {
        Self
    }
}

impl Check for TagsCheck {
    fn id(&self) -> &'static str {
        "openapi-tags"
    }

    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::new();
        if ctx.index.tag_count() == 0 {
            result.push(rule.violation());
        }
        result
    }
}
