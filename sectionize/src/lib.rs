//! `sectionize` — markdown renderer with automatic section wrapping.
//!
//! Turns markdown text into HTML where every heading opens a `<section>`
//! that stays open until the next heading of equal or shallower level.
//! A `{...}` attribute block on its own line ahead of a heading decorates
//! the section that heading opens; a block trailing an image sets the
//! image's `style` attribute. Both forms are consumed — they never render
//! as visible text.
//!
//! # Quick start
//!
//! ```
//! let result = sectionize::parse("# Title\n\n## Sub A\n\ntext\n");
//! assert!(result.diagnostics.is_empty());
//! let html = result.doc.to_html();
//! assert!(html.contains("<section>"));
//! ```

pub mod anchor;
pub mod attrs;
pub mod error;
pub mod front_matter;
pub mod parse;
pub mod render;
pub mod token;
pub mod tokenize;
pub mod transform;

pub use error::*;
pub use front_matter::FrontMatter;
pub use parse::{ParseResult, parse};
pub use token::*;

pub use render::PageConfig;

impl Document {
    /// Render this document as an HTML fragment.
    pub fn to_html(&self) -> String {
        render::to_html(&self.tokens)
    }

    /// Render this document as a complete standalone HTML page.
    pub fn to_html_page(&self, config: &PageConfig) -> String {
        render::to_html_page(self, config)
    }
}
