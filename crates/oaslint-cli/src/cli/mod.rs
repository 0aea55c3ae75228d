//! CLI module for the OpenAPI contract linter.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support.

pub mod config;
pub mod output;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// OpenAPI contract linter - validates OpenAPI/Swagger documents.
///
/// Lints one or more contract documents against a declarative rule catalog
/// and reports severity-tagged violations. Supports both human-readable and
/// JSON output formats.
#[derive(Parser, Debug)]
#[command(name = "oaslint")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Contract documents to lint (YAML or JSON).
    #[arg(required = true, value_name = "SPEC_FILES")]
    pub spec_files: Vec<PathBuf>,

    /// Path to the rule catalog file.
    #[arg(long, short = 'r', env = "OASLINT_RULES")]
    pub rules: PathBuf,

    /// Failure level for violations.
    /// 'warning' treats both errors and warnings as failures.
    /// 'error' only treats errors as failures.
    #[arg(long, env = "OASLINT_FAILURE_LEVEL", default_value = "error")]
    pub failure_level: FailureLevel,

    /// Output violations as JSON instead of human-readable format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Disable colored output.
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Increase verbosity level (-v for debug, -vv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Failure level for validation violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FailureLevel {
    /// Only treat errors as failures (exit code 3).
    #[default]
    Error,
    /// Treat both warnings and errors as failures.
    Warning,
}
