//! OpenAPI Contract Linter CLI
//!
//! A command-line tool for linting OpenAPI/Swagger contract documents
//! against a declarative rule catalog.

use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, ValidatedConfig, strip_bom};
use cli::output::{HumanOutput, LintResults};
use oaslint_core::validate_document;

fn main() -> StdExitCode {
    let args = Args::parse();

    init_tracing(args.verbose, args.json);

    let exit_code = run(args);
    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
fn init_tracing(verbosity: u8, json_output: bool) {
    // Don't output logs when using JSON output mode
    if json_output {
        return;
    }

    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

/// Run the linter with the given arguments.
fn run(args: Args) -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let use_colors = !args.json && !args.no_color && io::stdout().is_terminal();

    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            let mut output = HumanOutput::new(&mut stderr, use_colors);
            let _ = output.write_error(&e.to_string());
            return ExitCode::StartupFailure;
        }
    };

    debug!("loaded {} rule(s) from catalog", config.catalog.len());

    let mut results = LintResults::new();

    for path in &config.spec_files {
        info!("linting {}", path.display());

        let root = match read_document(path) {
            Ok(root) => root,
            Err(e) => {
                let mut output = HumanOutput::new(&mut stderr, use_colors);
                let _ = output.write_error(&e);
                return ExitCode::StartupFailure;
            }
        };

        let result = validate_document(&root, &config.catalog);
        debug!(
            "{}: {} violation(s)",
            path.display(),
            result.violations.len()
        );
        results.add(path.display().to_string(), result);
    }

    if config.json_output {
        if let Err(e) = results.write_json(&mut stdout) {
            error!("failed to write JSON output: {}", e);
            return ExitCode::StartupFailure;
        }
    } else if let Err(e) = results.write_human(&mut stdout, use_colors) {
        error!("failed to write output: {}", e);
        return ExitCode::StartupFailure;
    }

    config.exit_code_for_outcome(results.overall_outcome())
}

/// Reads and parses one contract document.
///
/// YAML is a superset of JSON, so a single parse path covers both formats.
fn read_document(path: &Path) -> Result<serde_yaml::Value, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read spec file '{}': {}", path.display(), e))?;
    serde_yaml::from_str(strip_bom(&raw))
        .map_err(|e| format!("failed to parse spec file '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_document_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("\u{feff}openapi: 3.0.3\n".as_bytes()).unwrap();
        let root = read_document(file.path()).unwrap();
        assert_eq!(root.get("openapi").unwrap().as_str(), Some("3.0.3"));
    }

    #[test]
    fn read_document_accepts_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"openapi": "3.0.3", "info": {"title": "Pets"}}"#)
            .unwrap();
        let root = read_document(file.path()).unwrap();
        assert_eq!(
            root.get("info").and_then(|i| i.get("title")).and_then(|t| t.as_str()),
            Some("Pets")
        );
    }

    #[test]
    fn read_document_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"openapi: [unclosed\n").unwrap();
        let err = read_document(file.path()).unwrap_err();
        assert!(err.contains("failed to parse spec file"));
    }
}
