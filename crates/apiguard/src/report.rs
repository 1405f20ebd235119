//! Rendering of lint results for the terminal and for machines.

use std::fmt::Write as _;

use apiguard_core::Report;
use serde::Serialize;

use crate::error::LintError;

/// Output format of the `lint` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Lint outcome for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub report: Report,
    /// Set when the file could not be linted at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl FileReport {
    pub fn linted(file: impl Into<String>, report: Report) -> Self {
        Self {
            file: file.into(),
            report,
            failure: None,
        }
    }

    pub fn failed(file: impl Into<String>, error: &LintError) -> Self {
        Self {
            file: file.into(),
            report: Report::default(),
            failure: Some(error.to_string()),
        }
    }

    /// Whether this file should fail the run. Warnings never do.
    pub fn is_failure(&self) -> bool {
        self.failure.is_some() || self.report.has_errors()
    }
}

/// Totals across all files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(results: &[FileReport]) -> Self {
        Self {
            total: results.len(),
            errors: results.iter().map(|r| r.report.errors.len()).sum(),
            warnings: results.iter().map(|r| r.report.warnings.len()).sum(),
            failed: results.iter().filter(|r| r.is_failure()).count(),
        }
    }
}

/// Render results as human-readable text.
pub fn render_text(results: &[FileReport]) -> String {
    let mut out = String::new();
    for result in results {
        if let Some(failure) = &result.failure {
            let _ = writeln!(out, "✗ {}: {}", result.file, failure);
            continue;
        }
        let report = &result.report;
        if report.is_clean() {
            let _ = writeln!(out, "✓ {} is clean", result.file);
            continue;
        }
        let mark = if report.has_errors() { "✗" } else { "✓" };
        let _ = writeln!(
            out,
            "{} {}: {} error(s), {} warning(s)",
            mark,
            result.file,
            report.errors.len(),
            report.warnings.len()
        );
        for finding in &report.errors {
            let _ = writeln!(out, "  error [{}]: {}", finding.path, finding.message);
        }
        for finding in &report.warnings {
            let _ = writeln!(out, "  warning [{}]: {}", finding.path, finding.message);
        }
    }

    let summary = Summary::of(results);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "linted {} spec(s): {} error(s), {} warning(s)",
        summary.total, summary.errors, summary.warnings
    );
    out
}

/// Render results as pretty-printed JSON.
pub fn render_json(results: &[FileReport]) -> Result<String, serde_json::Error> {
    let output = serde_json::json!({
        "results": results,
        "summary": Summary::of(results),
    });
    serde_json::to_string_pretty(&output)
}
