//! Parse pipeline: front matter → tokenize → anchors → section wrapping.

use crate::anchor;
use crate::error::Diagnostic;
use crate::front_matter;
use crate::token::Document;
use crate::tokenize;
use crate::transform;

/// Result of parsing a document.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed document, tokens already section-wrapped.
    pub doc: Document,
    /// Non-fatal diagnostics collected along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a markdown document into a render-ready [`Document`].
///
/// This function never panics. Malformed front matter degrades to
/// diagnostics and the body still renders.
pub fn parse(input: &str) -> ParseResult {
    let mut diagnostics = Vec::new();

    // Normalise CRLF → LF.
    let normalised = input.replace("\r\n", "\n");

    let (front_matter, body) = front_matter::extract(&normalised, &mut diagnostics);

    let mut tokens = tokenize::tokenize(body);
    if front_matter.as_ref().is_some_and(|fm| fm.permalinks) {
        anchor::add_anchors(&mut tokens);
    }
    let tokens = transform::wrap_sections(tokens);

    ParseResult {
        doc: Document {
            front_matter,
            tokens,
            source: normalised,
        },
        diagnostics,
    }
}
