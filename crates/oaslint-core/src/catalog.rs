//! Rule catalog loading.
//!
//! A rules document is a YAML mapping of rule ids to severity, description,
//! and optional rule-specific parameters:
//!
//! ```yaml
//! rules:
//!   info-title:
//!     severity: error
//!     description: The info section must declare a title
//!   pattern-forbidden-text:
//!     severity: warn
//!     description: Placeholder text is not allowed in patterns
//!     pattern: '\bNA\b'
//! ```
//!
//! Catalog order is rules-file order and drives dispatch order. Malformed
//! catalogs are fatal: no partial validation is attempted.

use crate::validate::{RuleId, Severity, Violation};
use serde_yaml::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while loading a rules document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document failed to parse as YAML.
    #[error("failed to parse rules document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document has no top-level `rules` mapping.
    #[error("rules document must contain a top-level 'rules' mapping")]
    MissingRules,

    /// A rule id is not a string.
    #[error("rule ids must be strings")]
    InvalidRuleId,

    /// A rule entry is not a mapping.
    #[error("rule '{id}' must be a mapping")]
    RuleNotAMapping {
        /// The offending rule id.
        id: String,
    },

    /// A rule entry is missing a required field.
    #[error("rule '{id}' is missing required field '{field}'")]
    MissingField {
        /// The offending rule id.
        id: String,
        /// The missing field name.
        field: &'static str,
    },

    /// A rule declares a severity token this engine does not know.
    #[error("rule '{id}' has unknown severity '{value}' (expected 'error' or 'warn')")]
    UnknownSeverity {
        /// The offending rule id.
        id: String,
        /// The unrecognized token.
        value: String,
    },

    /// The same rule id appears twice.
    #[error("duplicate rule id '{id}'")]
    DuplicateRule {
        /// The duplicated id.
        id: String,
    },

    /// A `pattern` parameter is not a valid regular expression.
    #[error("rule '{id}' has an invalid 'pattern' parameter: {source}")]
    InvalidPattern {
        /// The offending rule id.
        id: String,
        /// The regex compilation failure.
        source: regex::Error,
    },
}

/// One loaded rule: id, severity, description, and optional parameters.
///
/// Immutable once loaded; the configured severity propagates unchanged to
/// every violation the rule produces.
#[derive(Debug, Clone)]
pub struct RuleRecord {
    /// Unique rule identifier.
    pub id: RuleId,
    /// Blocking or advisory.
    pub severity: Severity,
    /// Human description, used as the violation message.
    pub description: String,
    /// Selector expression from the rules file; opaque to the dispatch
    /// table, which scopes rules by id.
    pub given: Option<String>,
    /// Rule-specific parameters beyond the common fields.
    pub params: Option<Value>,
}

impl RuleRecord {
    /// Looks up a string-valued parameter.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params
            .as_ref()
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
    }

    /// Creates a violation carrying this rule's severity and description.
    pub fn violation(&self) -> Violation {
        Violation::new(self.id.clone(), self.severity, self.description.clone())
    }

    /// Creates a violation with a field path attached.
    pub fn violation_at(&self, path: impl Into<String>) -> Violation {
        self.violation().with_field_path(path)
    }
}

/// An ordered set of loaded rules.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<RuleRecord>,
}

impl RuleCatalog {
    /// Loads a catalog from YAML text.
    pub fn from_yaml_str(input: &str) -> Result<Self, CatalogError> {
        let doc: Value = serde_yaml::from_str(input)?;
        let rules_node = doc
            .get("rules")
            .and_then(Value::as_mapping)
            .ok_or(CatalogError::MissingRules)?;

        let mut rules = Vec::with_capacity(rules_node.len());
        let mut seen: HashSet<&str> = HashSet::new();

        for (key, entry) in rules_node {
            let id = key.as_str().ok_or(CatalogError::InvalidRuleId)?;
            if !seen.insert(id) {
                return Err(CatalogError::DuplicateRule { id: id.to_string() });
            }
            rules.push(parse_rule(id, entry)?);
        }

        Ok(Self { rules })
    }

    /// Returns the rules in catalog order.
    pub fn rules(&self) -> &[RuleRecord] {
        &self.rules
    }

    /// Looks up a rule by id.
    pub fn get(&self, id: &str) -> Option<&RuleRecord> {
        self.rules.iter().find(|r| r.id.as_str() == id)
    }

    /// Returns the number of loaded rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the catalog has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_rule(id: &str, entry: &Value) -> Result<RuleRecord, CatalogError> {
    let mapping = entry
        .as_mapping()
        .ok_or_else(|| CatalogError::RuleNotAMapping { id: id.to_string() })?;

    let severity_token =
        entry
            .get("severity")
            .and_then(Value::as_str)
            .ok_or_else(|| CatalogError::MissingField {
                id: id.to_string(),
                field: "severity",
            })?;
    let severity =
        Severity::parse(severity_token).ok_or_else(|| CatalogError::UnknownSeverity {
            id: id.to_string(),
            value: severity_token.to_string(),
        })?;

    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::MissingField {
            id: id.to_string(),
            field: "description",
        })?
        .to_string();

    let given = entry
        .get("given")
        .and_then(Value::as_str)
        .map(str::to_string);

    // Everything beyond the common fields is a rule-specific parameter.
    let mut params = serde_yaml::Mapping::new();
    for (key, value) in mapping {
        let name = key.as_str().unwrap_or_default();
        if !matches!(name, "severity" | "description" | "given") {
            params.insert(key.clone(), value.clone());
        }
    }

    if let Some(pattern) = entry.get("pattern").and_then(Value::as_str) {
        regex::Regex::new(pattern).map_err(|source| CatalogError::InvalidPattern {
            id: id.to_string(),
            source,
        })?;
    }

    Ok(RuleRecord {
        id: RuleId::new(id),
        severity,
        description,
        given,
        params: if params.is_empty() {
            None
        } else {
            Some(Value::Mapping(params))
        },
    })
}
