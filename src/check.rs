//! `check` subcommand: parse diagnostics plus render-artifact lints.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use walkdir::WalkDir;

use sectionize::{Diagnostic, Document, InlineChild, Severity, Token};

#[derive(Serialize)]
struct FileReport {
    file: String,
    diagnostics: Vec<Diagnostic>,
}

/// Check each path (file or directory) and report diagnostics.
///
/// Returns true when any error-severity diagnostic was found.
pub fn run_check(paths: &[String], json: bool, quiet: bool) -> Result<bool> {
    let files = expand_paths(paths);
    let mut reports = Vec::new();
    let mut has_errors = false;

    for file in &files {
        let content =
            std::fs::read_to_string(file).with_context(|| format!("Failed to read '{file}'"))?;
        let result = sectionize::parse(&content);

        let mut diagnostics = result.diagnostics;
        diagnostics.extend(lint_artifacts(&result.doc));

        has_errors |= diagnostics.iter().any(|d| d.severity == Severity::Error);
        reports.push(FileReport {
            file: file.clone(),
            diagnostics,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(has_errors);
    }

    for report in &reports {
        if report.diagnostics.is_empty() {
            if !quiet {
                println!("{}: {}", report.file, "OK".green());
            }
            continue;
        }
        for diag in &report.diagnostics {
            let severity_str = match diag.severity {
                Severity::Error => format!("{}", "error".red().bold()),
                Severity::Warning => format!("{}", "warning".yellow().bold()),
                Severity::Info => format!("{}", "info".cyan().bold()),
            };

            let line_info = match diag.line {
                Some(line) => format!("{}:{}", report.file, line),
                None => report.file.clone(),
            };

            let code_str = match &diag.code {
                Some(c) => format!("[{c}] "),
                None => String::new(),
            };

            println!("{line_info}: {severity_str}: {code_str}{}", diag.message);
        }
    }

    Ok(has_errors)
}

/// Expand files and directories into a sorted, flat list of markdown files.
fn expand_paths(paths: &[String]) -> Vec<String> {
    let mut files = Vec::new();
    for path in paths {
        if Path::new(path).is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && is_markdown(entry.path()) {
                    files.push(entry.path().display().to_string());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md" | "markdown")
    )
}

/// Find attribute blocks that survived the transform — these render
/// literally in the HTML output.
fn lint_artifacts(doc: &Document) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for token in &doc.tokens {
        let Token::Inline { children, .. } = token else {
            continue;
        };
        for child in children {
            let InlineChild::Text { content } = child else {
                continue;
            };
            let trimmed = content.trim();
            if trimmed.contains('{') && trimmed.contains('}') && trimmed.contains("=\"") {
                diagnostics.push(Diagnostic {
                    severity: Severity::Warning,
                    message: format!(
                        "attribute block not consumed, renders literally: {}",
                        snippet(trimmed)
                    ),
                    line: None,
                    code: Some("W001".to_string()),
                });
            }
        }
    }
    diagnostics
}

fn snippet(text: &str) -> String {
    const MAX: usize = 60;
    if text.len() <= MAX {
        return text.to_string();
    }
    let mut cut = MAX;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…", &text[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lint_flags_unconsumed_block() {
        let result = sectionize::parse("![p](p.jpg){id=\"hero\"}\n");
        let diags = lint_artifacts(&result.doc);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.as_deref(), Some("W001"));
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn lint_passes_clean_document() {
        let result = sectionize::parse("# Title\n\nplain prose with {braces} but no attrs\n");
        assert!(lint_artifacts(&result.doc).is_empty());
    }

    #[test]
    fn consumed_blocks_do_not_lint() {
        let source = "{class=\"x\"}\n\n## H\n\n![a](b.png){style=\"width:10%\"}\n";
        let result = sectionize::parse(source);
        assert!(lint_artifacts(&result.doc).is_empty());
    }

    #[test]
    fn markdown_extension_filter() {
        assert!(is_markdown(Path::new("a/b.md")));
        assert!(is_markdown(Path::new("a/b.markdown")));
        assert!(!is_markdown(Path::new("a/b.txt")));
        assert!(!is_markdown(Path::new("a/b")));
    }
}
