//! Structured diagnostics produced by lint rules.
//!
//! Each diagnostic carries the rule that produced it, a stable code, the
//! scope it applies to (usually a resource identifier), and optional fix text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An informational note.
    Info,
    /// A convention violation that does not fail the run.
    Warning,
    /// A violation that fails the run.
    Error,
}

/// A structured diagnostic message from a lint rule.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Stable code (e.g., `"L001"`).
    pub code: &'static str,
    /// Name of the rule that produced it (e.g., `"resource-class"`).
    pub rule: &'static str,
    /// What the diagnostic is about, e.g. `AWS::S3::Bucket`.
    pub scope: String,
    /// Human-readable message.
    pub message: String,
    /// Suggested fix (actionable text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    #[must_use]
    pub fn new(
        severity: Severity,
        code: &'static str,
        rule: &'static str,
        scope: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            rule,
            scope: scope.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Set a suggested fix for this diagnostic.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// `rule:scope`, the key include/exclude patterns match against.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}:{}", self.rule, self.scope)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// `error: [rule:scope] message`, with `warning`/`info` prefixes likewise.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        write!(f, "{level}: [{}] {}", self.key(), self.message)
    }
}

// ── Codes ───────────────────────────────────────────────────────────────

/// Resource class has no hand-written wrapper.
pub const L001: &str = "L001";
