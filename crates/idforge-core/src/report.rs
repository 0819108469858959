//! # Validation Reports
//!
//! The detailed-validation variant: instead of a bare `bool`, a
//! [`ValidationReport`] carries the cleaned candidate and every
//! [`ValidationIssue`] found. A report with no issues is valid.

use serde::Serialize;

use crate::error::ValidationIssue;
use crate::kind::FormatKind;

/// Outcome of inspecting one candidate against one format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Format the candidate was checked against.
    pub format: FormatKind,
    /// Candidate after [`clean`](crate::digits::clean).
    pub cleaned: String,
    /// Problems found, in the order they were detected.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// An empty report for `cleaned`.
    pub fn new(format: FormatKind, cleaned: impl Into<String>) -> Self {
        Self {
            format,
            cleaned: cleaned.into(),
            issues: Vec::new(),
        }
    }

    /// Build a report with a single issue.
    pub fn failed(format: FormatKind, cleaned: impl Into<String>, issue: ValidationIssue) -> Self {
        let mut report = Self::new(format, cleaned);
        report.push(issue);
        report
    }

    /// Record an issue.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, issue: ValidationIssue) -> Self {
        self.push(issue);
        self
    }

    /// True if no issues were recorded.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// True if `issue` was recorded.
    pub fn has(&self, issue: &ValidationIssue) -> bool {
        self.issues.contains(issue)
    }
}
