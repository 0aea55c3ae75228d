//! Configuration handling for the CLI.
//!
//! This module loads the rule catalog and converts CLI arguments into a
//! validated runtime configuration.

use crate::cli::{Args, FailureLevel};
use oaslint_core::catalog::{CatalogError, RuleCatalog};
use oaslint_core::validate::Outcome;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the rule catalog file.
    #[error("failed to read rules file '{path}': {source}")]
    ReadRules {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The rule catalog failed to load.
    #[error("invalid rules file '{path}': {source}")]
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },

    /// A contract document path does not exist.
    #[error("spec file '{0}' does not exist")]
    MissingSpecFile(PathBuf),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Validation passed (possibly with warnings).
    Success = 0,
    /// Application startup failed (wrong configuration or unreadable input).
    StartupFailure = 1,
    /// Validation failed (rules found blocking violations).
    ValidationFailed = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Validated and processed configuration for running the linter.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// The loaded rule catalog.
    pub catalog: RuleCatalog,
    /// Contract documents to lint, in argument order.
    pub spec_files: Vec<PathBuf>,
    /// Failure level for determining the exit code.
    pub failure_level: FailureLevel,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    ///
    /// Loads and validates the rule catalog up front so a broken catalog is
    /// a startup failure, not a lint failure.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let catalog = load_catalog(&args.rules)?;

        for path in &args.spec_files {
            if !path.exists() {
                return Err(ConfigError::MissingSpecFile(path.clone()));
            }
        }

        Ok(Self {
            catalog,
            spec_files: args.spec_files.clone(),
            failure_level: args.failure_level,
            json_output: args.json,
        })
    }

    /// Determines the exit code for an overall outcome.
    pub fn exit_code_for_outcome(&self, outcome: Outcome) -> ExitCode {
        match outcome {
            Outcome::Fail => ExitCode::ValidationFailed,
            Outcome::PassWithWarnings if self.failure_level == FailureLevel::Warning => {
                ExitCode::ValidationFailed
            }
            _ => ExitCode::Success,
        }
    }
}

/// Loads the rule catalog from a file.
pub fn load_catalog(path: &Path) -> Result<RuleCatalog, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadRules {
        path: path.to_path_buf(),
        source,
    })?;
    RuleCatalog::from_yaml_str(strip_bom(&raw)).map_err(|source| ConfigError::Catalog {
        path: path.to_path_buf(),
        source,
    })
}

/// Strips a UTF-8 byte order mark, which some Windows editors prepend.
pub fn strip_bom(input: &str) -> &str {
    input.strip_prefix('\u{feff}').unwrap_or(input)
}
