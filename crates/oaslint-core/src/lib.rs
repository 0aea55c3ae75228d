//! OpenAPI Contract Linter Core
//!
//! A library for linting OpenAPI/Swagger contract documents against a
//! declarative rule catalog.
//!
//! # Features
//!
//! - **Catalog**: Load severity-tagged rules from a YAML catalog, with
//!   per-rule parameters validated at load time
//! - **Index**: One eager pass over the parsed document builds the views
//!   every rule reads (servers, paths, operations, component schemas)
//! - **Checks**: Each rule id dispatches to a check strategy; results merge
//!   into a single deterministic violation list
//! - **Gating**: Structural severities decide pass, pass-with-warnings, or
//!   fail
//!
//! # Quick Start
//!
//! ```rust
//! use oaslint_core::catalog::RuleCatalog;
//! use oaslint_core::validate_document;
//!
//! let rules = r#"
//! rules:
//!   info-title:
//!     severity: error
//!     description: info must carry a title
//!   openapi-tags:
//!     severity: warn
//!     description: document should declare tags
//! "#;
//!
//! let doc = r#"
//! openapi: 3.0.3
//! info:
//!   title: Pet Store
//!   version: 1.0.0
//! "#;
//!
//! let catalog = RuleCatalog::from_yaml_str(rules).unwrap();
//! let root: serde_yaml::Value = serde_yaml::from_str(doc).unwrap();
//!
//! let result = validate_document(&root, &catalog);
//! for violation in &result.violations {
//!     println!("{}", violation);
//! }
//! assert!(!result.outcome().is_fail());
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Rule catalog loading and validation
//! - [`index`]: Document views built in one pass over the node tree
//! - [`validate`]: Checks, the dispatch registry, and violation types

pub mod catalog;
pub mod index;
pub mod validate;

// Re-export commonly used types at the crate root
pub use catalog::{CatalogError, RuleCatalog, RuleRecord};
pub use index::SpecIndex;
pub use validate::checks::{Check, CheckContext, CheckRegistry};
pub use validate::{Outcome, RuleId, Severity, ValidationResult, Violation};

/// Validates one parsed document against a rule catalog using the built-in
/// checks.
///
/// Builds the [`SpecIndex`] and applies every catalog rule in catalog order,
/// with reference-integrity findings merged first.
pub fn validate_document(
    root: &serde_yaml::Value,
    catalog: &RuleCatalog,
) -> ValidationResult {
    let index = SpecIndex::new(root);
    CheckRegistry::with_builtin_checks().apply(catalog, &index)
}
