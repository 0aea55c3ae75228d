//! Violation and outcome types for contract validation.
//!
//! A violation is a first-class value, not an error: checks accumulate
//! violations into a [`ValidationResult`] and the pass/fail decision is
//! derived from the full collection afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a rule violation.
///
/// Parsed once at catalog-load time and compared structurally; severity is
/// never decided by inspecting formatted message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An advisory finding that does not block the build.
    Warn,
    /// A blocking finding; any violation at this level fails the run.
    Error,
}

impl Severity {
    /// Parses a severity token from a rule record.
    ///
    /// Accepts `error`, `warn`, and the common alias `warning`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            _ => None,
        }
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule identifier (e.g. `string-max-length`, `paths-kebab-case`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

impl RuleId {
    /// Creates a new rule id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RuleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single reported rule failure.
///
/// Violations are immutable once created and keep the order in which
/// traversal produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The rule that produced this violation.
    pub rule: RuleId,
    /// Severity configured for the rule at load time.
    pub severity: Severity,
    /// Symbolic locator built during traversal, when the rule has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,
    /// Human-readable description of the failure.
    pub message: String,
}

impl Violation {
    /// Creates a violation without a field path.
    pub fn new(rule: impl Into<RuleId>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            severity,
            field_path: None,
            message: message.into(),
        }
    }

    /// Attaches a field path.
    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field_path {
            Some(path) => write!(f, "[{}] {}: {}", self.severity, path, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// The overall decision derived from a violation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// No violations at all.
    Pass,
    /// Only non-blocking violations.
    PassWithWarnings,
    /// At least one blocking violation.
    Fail,
}

impl Outcome {
    /// Returns true for the failing outcome.
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pass => "pass",
            Self::PassWithWarnings => "pass-with-warnings",
            Self::Fail => "fail",
        };
        f.write_str(s)
    }
}

/// The ordered collection of violations produced by a validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    /// All violations, in traversal order.
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result from an existing violation list.
    pub fn with_violations(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns true if no violations were recorded.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Merges another result into this one, preserving order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
    }

    /// Returns only blocking violations.
    pub fn errors_only(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    /// Returns only non-blocking violations.
    pub fn warnings_only(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warn)
    }

    /// Derives the overall outcome from the full violation set.
    ///
    /// The scan is deliberately global rather than fail-fast so the complete
    /// report exists before the decision is rendered.
    pub fn outcome(&self) -> Outcome {
        if self.errors_only().next().is_some() {
            Outcome::Fail
        } else if self.violations.is_empty() {
            Outcome::Pass
        } else {
            Outcome::PassWithWarnings
        }
    }
}
