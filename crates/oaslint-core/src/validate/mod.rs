//! Rule evaluation: violations, the schema walker, and check dispatch.

pub mod checks;
pub mod walker;

mod violation;

pub use violation::{Outcome, RuleId, Severity, ValidationResult, Violation};
