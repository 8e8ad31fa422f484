//! YAML front matter extraction.
//!
//! Front matter is the `---`-delimited YAML header at the top of a document.
//! The only field the render pipeline itself consumes is `permalinks`;
//! everything else rides along for callers (page titles, layouts).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, ParseError, Severity};

/// Typed front matter fields, with unknown fields captured in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Enables heading anchor generation (see `anchor::add_anchors`).
    pub permalinks: bool,

    /// Any front matter fields not covered by the typed ones above.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Split `source` into parsed front matter and the body that follows it.
///
/// Malformed front matter produces a diagnostic and rendering continues: an
/// unclosed opener keeps the whole text as body, invalid YAML skips the
/// fenced region.
pub fn extract<'a>(
    source: &'a str,
    diagnostics: &mut Vec<Diagnostic>,
) -> (Option<FrontMatter>, &'a str) {
    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return (None, source);
    };
    if first.trim() != "---" {
        return (None, source);
    }

    // Locate the closing `---` line, tracking byte offsets for the slices.
    let mut close_start = None;
    let mut close_len = 0;
    let mut offset = first.len();
    for line in lines {
        if line.trim() == "---" {
            close_start = Some(offset);
            close_len = line.len();
            break;
        }
        offset += line.len();
    }

    let Some(close_start) = close_start else {
        diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message: ParseError::UnclosedFrontMatter.to_string(),
            line: Some(1),
            code: Some("F001".into()),
        });
        return (None, source);
    };

    let yaml = &source[first.len()..close_start];
    let body = &source[close_start + close_len..];

    match parse_yaml(yaml) {
        Ok(fm) => (Some(fm), body),
        Err(err) => {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                message: err.to_string(),
                line: Some(1),
                code: Some("F002".into()),
            });
            (None, body)
        }
    }
}

/// Parse the YAML between the `---` fences.
pub fn parse_yaml(yaml: &str) -> Result<FrontMatter, ParseError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| ParseError::InvalidFrontMatter {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_front_matter_is_passthrough() {
        let mut diags = Vec::new();
        let (fm, body) = extract("# Title\n\ntext\n", &mut diags);
        assert!(fm.is_none());
        assert_eq!(body, "# Title\n\ntext\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn typed_fields_parse() {
        let mut diags = Vec::new();
        let source = "---\ntitle: Hello\npermalinks: true\n---\n# Body\n";
        let (fm, body) = extract(source, &mut diags);
        let fm = fm.expect("front matter should parse");
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert!(fm.permalinks);
        assert_eq!(body, "# Body\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn permalinks_defaults_to_false() {
        let fm = parse_yaml("title: x").unwrap();
        assert!(!fm.permalinks);
    }

    #[test]
    fn extra_fields_captured() {
        let fm = parse_yaml("title: x\ntags:\n  - travel\n  - notes").unwrap();
        assert!(fm.extra.contains_key("tags"));
    }

    #[test]
    fn empty_front_matter_is_default() {
        let mut diags = Vec::new();
        let (fm, body) = extract("---\n---\nbody\n", &mut diags);
        assert!(fm.is_some());
        assert_eq!(body, "body\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn unclosed_front_matter_keeps_body() {
        let mut diags = Vec::new();
        let source = "---\ntitle: Broken\n\nBody text.\n";
        let (fm, body) = extract(source, &mut diags);
        assert!(fm.is_none());
        assert_eq!(body, source);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].code.as_deref(), Some("F001"));
    }

    #[test]
    fn invalid_yaml_skips_fenced_region() {
        let mut diags = Vec::new();
        let source = "---\ntitle: [unclosed\n---\nBody.\n";
        let (fm, body) = extract(source, &mut diags);
        assert!(fm.is_none());
        assert_eq!(body, "Body.\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.as_deref(), Some("F002"));
    }
}
