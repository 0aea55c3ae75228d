//! Check strategies and the dispatch registry.
//!
//! Every rule id maps to a [`Check`] strategy object registered at startup.
//! Dispatch iterates the catalog in file order, looks the rule up in the
//! registry, and merges each check's result; rule ids with no registered
//! check are skipped silently so newer catalogs keep working against older
//! engine versions.

mod arrays;
mod document;
mod info;
mod paths;
mod patterns;
mod required;
mod strings;

pub use arrays::ArrayMaxItemsCheck;
pub use document::{SecuritySchemesCheck, TagsCheck};
pub use info::{InfoFieldCheck, InfoVersionCheck};
pub use paths::{HttpsServersCheck, KebabCasePathsCheck, OperationFieldCheck};
pub use patterns::{ForbiddenPatternCheck, ForbiddenPropertyCheck, PatternWhitespaceCheck};
pub use required::RequiredPropertiesCheck;
pub use strings::{EnumConstraintCheck, StringConstraintCheck};

use crate::catalog::{RuleCatalog, RuleRecord};
use crate::index::SpecIndex;
use crate::validate::ValidationResult;
use log::{debug, info};
use std::collections::HashMap;

/// Context handed to every check invocation.
#[derive(Debug)]
pub struct CheckContext<'a> {
    /// The document index.
    pub index: &'a SpecIndex<'a>,
}

impl<'a> CheckContext<'a> {
    /// Creates a new check context.
    pub fn new(index: &'a SpecIndex<'a>) -> Self {
        Self { index }
    }
}

/// One validation check, keyed by the rule id it implements.
pub trait Check: Send + Sync {
    /// The rule id this check handles.
    fn id(&self) -> &'static str;

    /// Runs the check for one rule record, returning its violations in
    /// traversal order.
    fn run(&self, rule: &RuleRecord, ctx: &CheckContext<'_>) -> ValidationResult;
}

/// Registry mapping rule ids to check strategies.
#[derive(Default)]
pub struct CheckRegistry {
    checks: HashMap<&'static str, Box<dyn Check>>,
}

impl CheckRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in check registered.
    pub fn with_builtin_checks() -> Self {
        let mut registry = Self::new();
        registry.register(InfoFieldCheck::title());
        registry.register(InfoFieldCheck::description());
        registry.register(InfoFieldCheck::contact());
        registry.register(InfoVersionCheck::new());
        registry.register(SecuritySchemesCheck::new());
        registry.register(TagsCheck::new());
        registry.register(HttpsServersCheck::new());
        registry.register(KebabCasePathsCheck::new());
        registry.register(OperationFieldCheck::operation_id());
        registry.register(OperationFieldCheck::tags());
        registry.register(ForbiddenPatternCheck::new());
        registry.register(PatternWhitespaceCheck::new());
        registry.register(ForbiddenPropertyCheck::new());
        registry.register(RequiredPropertiesCheck::new());
        registry.register(StringConstraintCheck::max_length());
        registry.register(StringConstraintCheck::min_length());
        registry.register(StringConstraintCheck::pattern());
        registry.register(EnumConstraintCheck::max_length());
        registry.register(EnumConstraintCheck::min_length());
        registry.register(ArrayMaxItemsCheck::new());
        registry
    }

    /// Registers a check under its own rule id.
    pub fn register<C: Check + 'static>(&mut self, check: C) {
        self.checks.insert(check.id(), Box::new(check));
    }

    /// Returns the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Applies the catalog to an indexed document.
    ///
    /// Reference-integrity findings from the index are merged first,
    /// unchanged; then every catalog rule runs in catalog order.
    pub fn apply(&self, catalog: &RuleCatalog, index: &SpecIndex<'_>) -> ValidationResult {
        info!("applying {} rule(s)", catalog.len());
        let mut result = index.reference_violations();
        let ctx = CheckContext::new(index);

        for rule in catalog.rules() {
            match self.checks.get(rule.id.as_str()) {
                Some(check) => {
                    let rule_result = check.run(rule, &ctx);
                    debug!(
                        "rule '{}' produced {} violation(s)",
                        rule.id,
                        rule_result.violations.len()
                    );
                    result.merge(rule_result);
                }
                None => debug!("no check registered for rule '{}', skipping", rule.id),
            }
        }

        info!("validation complete: {} violation(s)", result.violations.len());
        result
    }
}
