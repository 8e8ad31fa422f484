use serde::{Deserialize, Serialize};

/// Hard failures from document parsing.
///
/// These surface as [`Diagnostic`]s at the parse boundary; rendering itself
/// never fails.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("front matter opened with `---` but never closed")]
    UnclosedFrontMatter,

    #[error("invalid front matter YAML: {message}")]
    InvalidFrontMatter { message: String },
}

/// A non-fatal message produced while parsing or checking a document.
///
/// Diagnostics never stop a render: the pipeline always produces best-effort
/// HTML alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}
