use serde::{Deserialize, Serialize};

use crate::front_matter::FrontMatter;

/// One structural unit of the flat render stream.
///
/// The tokenizer produces these from markdown source, `transform::wrap_sections`
/// re-nests them, and `render::to_html` serializes them. Variants the transform
/// does not understand pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// Opening bound of a heading. `attrs` stays empty unless the anchor
    /// rule ran.
    HeadingOpen { level: u8, attrs: Vec<(String, String)> },
    HeadingClose { level: u8 },
    ParagraphOpen,
    ParagraphClose,
    /// A text/inline run. `content` is the flattened source text of the run
    /// (what the attribute-block and empty-paragraph checks look at);
    /// `children` are the structured pieces used for serialization.
    Inline {
        content: String,
        children: Vec<InlineChild>,
    },
    /// Raw HTML — either literal HTML from the source document or the
    /// `<section>` markers injected by the transform.
    HtmlBlock { content: String },
    /// A block construct already rendered to HTML (list, code fence,
    /// blockquote, table, rule). Opaque to the transform.
    Opaque { html: String },
}

impl Token {
    pub fn html_block(content: impl Into<String>) -> Self {
        Token::HtmlBlock {
            content: content.into(),
        }
    }

    /// True for a synthetic `<section ...>` opener emitted by the transform.
    pub fn is_section_open(&self) -> bool {
        matches!(self, Token::HtmlBlock { content } if content.starts_with("<section"))
    }

    /// True for a synthetic `</section>` closer emitted by the transform.
    pub fn is_section_close(&self) -> bool {
        matches!(self, Token::HtmlBlock { content } if content.as_str() == "</section>")
    }
}

/// Sub-unit of an [`Token::Inline`] run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineChild {
    Text { content: String },
    /// An image with its ordered attribute list: `src`, `alt`, optional
    /// `title`, and `style` once an attribute block has been applied.
    Image { attrs: Vec<(String, String)> },
    /// Pre-rendered inline markup (emphasis, links, code spans, breaks).
    Html { content: String },
}

/// A parsed document: front matter plus the post-transform token stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Parsed YAML front matter, if present.
    pub front_matter: Option<FrontMatter>,
    /// Section-wrapped token stream, ready to serialize.
    pub tokens: Vec<Token>,
    /// Original source text that was parsed.
    pub source: String,
}
