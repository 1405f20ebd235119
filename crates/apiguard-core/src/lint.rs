//! Runs every configured rule over a document and buckets the findings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{RuleConfig, Severity};
use crate::operations::for_each_operation;
use crate::rules::Rule;

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Locator of the offending field, e.g. `paths./pets.get.operationId`.
    pub path: String,
    pub message: String,
}

/// Findings of one lint run, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn push(&mut self, severity: Severity, findings: Vec<Finding>) {
        match severity {
            Severity::Error => self.errors.extend(findings),
            Severity::Warning => self.warnings.extend(findings),
            Severity::Off => {}
        }
    }
}

/// Lint every operation of `document`.
///
/// Rules run per operation in [`Rule::ALL`] order; rules configured `off` are
/// not evaluated. The document is never modified and the result depends only
/// on the inputs.
pub fn lint(document: &Value, config: &RuleConfig) -> Report {
    let enabled: Vec<(Rule, Severity)> = Rule::ALL
        .into_iter()
        .map(|rule| (rule, config.severity(rule)))
        .filter(|(_, severity)| *severity != Severity::Off)
        .collect();

    let mut report = Report::default();
    let mut visited = 0usize;

    for_each_operation(document, |op| {
        visited += 1;
        tracing::debug!(path = op.path, method = op.method, "linting operation");
        for &(rule, severity) in &enabled {
            report.push(severity, rule.check(&op, document));
        }
    });

    tracing::debug!(
        operations = visited,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "lint complete"
    );
    report
}
