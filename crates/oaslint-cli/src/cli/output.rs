//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for lint
//! results, grouped per contract document.

use colored::Colorize;
use oaslint_core::validate::{Outcome, Severity, ValidationResult, Violation};
use serde::Serialize;
use std::io::Write;

/// JSON output format.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Per-document reports, in argument order.
    pub files: Vec<JsonFileReport<'a>>,
    /// Overall outcome across every document.
    pub outcome: Outcome,
}

/// Lint report for one contract document.
#[derive(Debug, Serialize)]
pub struct JsonFileReport<'a> {
    /// The document path as given on the command line.
    pub file: &'a str,
    /// Outcome for this document alone.
    pub outcome: Outcome,
    /// All violations, in rule-catalog order.
    pub violations: &'a [Violation],
}

impl<'a> JsonOutput<'a> {
    /// Builds the JSON output from collected results.
    pub fn from_results(results: &'a LintResults) -> Self {
        let files = results
            .iter()
            .map(|(file, result)| JsonFileReport {
                file,
                outcome: result.outcome(),
                violations: &result.violations,
            })
            .collect();
        Self {
            files,
            outcome: results.overall_outcome(),
        }
    }

    /// Writes the JSON output to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes a header for one document.
    pub fn write_file_header(&mut self, file: &str) -> std::io::Result<()> {
        let header = format!("==> {}", file);
        if self.use_colors {
            writeln!(self.writer, "\n{}", header.cyan().bold())?;
        } else {
            writeln!(self.writer, "\n{}", header)?;
        }
        Ok(())
    }

    /// Writes lint results for one document.
    pub fn write_file_results(
        &mut self,
        file: &str,
        result: &ValidationResult,
    ) -> std::io::Result<()> {
        if result.is_ok() {
            return Ok(());
        }

        self.write_file_header(file)?;

        for violation in &result.violations {
            self.write_violation(violation)?;
        }

        Ok(())
    }

    /// Writes a single violation.
    pub fn write_violation(&mut self, violation: &Violation) -> std::io::Result<()> {
        let label = match violation.severity {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
        };

        let location = match &violation.field_path {
            Some(path) => format!("{}: ", path),
            None => String::new(),
        };

        if self.use_colors {
            let colored_label = match violation.severity {
                Severity::Error => format!("[{}]", label).red().bold(),
                Severity::Warn => format!("[{}]", label).yellow().bold(),
            };
            writeln!(
                self.writer,
                "  {} {}{} ({})",
                colored_label, location, violation.message, violation.rule
            )?;
        } else {
            writeln!(
                self.writer,
                "  [{}] {}{} ({})",
                label, location, violation.message, violation.rule
            )?;
        }

        Ok(())
    }

    /// Writes a summary of all lint results.
    pub fn write_summary(
        &mut self,
        total_errors: usize,
        total_warnings: usize,
    ) -> std::io::Result<()> {
        writeln!(self.writer)?;

        if total_errors == 0 && total_warnings == 0 {
            let message = "✓ All contract documents are valid";
            if self.use_colors {
                writeln!(self.writer, "{}", message.green().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        } else {
            let message = format!(
                "✗ Found {} error(s) and {} warning(s)",
                total_errors, total_warnings
            );
            if self.use_colors {
                writeln!(self.writer, "{}", message.red().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        }

        Ok(())
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)?;
        } else {
            writeln!(self.writer, "Error: {}", message)?;
        }
        Ok(())
    }
}

/// Collects lint results per contract document, in argument order.
#[derive(Debug, Default)]
pub struct LintResults {
    results: Vec<(String, ValidationResult)>,
}

impl LintResults {
    /// Creates a new empty results collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds results for one document.
    pub fn add(&mut self, file: impl Into<String>, result: ValidationResult) {
        self.results.push((file.into(), result));
    }

    /// Returns the total number of blocking violations.
    pub fn total_errors(&self) -> usize {
        self.results.iter().map(|(_, r)| r.errors_only().count()).sum()
    }

    /// Returns the total number of warnings.
    pub fn total_warnings(&self) -> usize {
        self.results
            .iter()
            .map(|(_, r)| r.warnings_only().count())
            .sum()
    }

    /// Derives the overall outcome across every document.
    pub fn overall_outcome(&self) -> Outcome {
        if self.total_errors() > 0 {
            Outcome::Fail
        } else if self.total_warnings() > 0 {
            Outcome::PassWithWarnings
        } else {
            Outcome::Pass
        }
    }

    /// Iterates over results in argument order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationResult)> {
        self.results.iter().map(|(name, r)| (name.as_str(), r))
    }

    /// Writes results in human-readable format.
    pub fn write_human<W: Write>(&self, writer: &mut W, use_colors: bool) -> std::io::Result<()> {
        let mut output = HumanOutput::new(writer, use_colors);

        for (file, result) in self.iter() {
            output.write_file_results(file, result)?;
        }

        output.write_summary(self.total_errors(), self.total_warnings())?;

        Ok(())
    }

    /// Writes results in JSON format.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        JsonOutput::from_results(self).write(writer)
    }
}
