//! HTML serialization of the token stream.
//!
//! The stream is expected to be balanced (the transform guarantees this);
//! no structural validation happens here. Section attribute strings inside
//! [`Token::HtmlBlock`] content are emitted verbatim.

use crate::token::{Document, InlineChild, Token};

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize a token stream to an HTML fragment.
pub fn to_html(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::HeadingOpen { level, attrs } => {
                out.push_str(&format!("<h{level}"));
                for (name, value) in attrs {
                    out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
                }
                out.push('>');
            }
            Token::HeadingClose { level } => {
                out.push_str(&format!("</h{level}>\n"));
            }
            Token::ParagraphOpen => out.push_str("<p>"),
            Token::ParagraphClose => out.push_str("</p>\n"),
            Token::Inline { children, .. } => {
                for child in children {
                    render_inline_child(&mut out, child);
                }
            }
            Token::HtmlBlock { content } => {
                out.push_str(content);
                out.push('\n');
            }
            Token::Opaque { html } => out.push_str(html),
        }
    }
    out
}

fn render_inline_child(out: &mut String, child: &InlineChild) {
    match child {
        InlineChild::Text { content } => out.push_str(&escape_html(content)),
        InlineChild::Html { content } => out.push_str(content),
        InlineChild::Image { attrs } => {
            out.push_str("<img");
            for (name, value) in attrs {
                out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
            }
            out.push_str(" />");
        }
    }
}

/// Configuration for standalone page rendering.
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    /// Page title. Falls back to front matter `title`, then "Untitled".
    pub title: Option<String>,
    /// Optional meta description.
    pub description: Option<String>,
    /// Optional canonical URL for `<link rel="canonical">`.
    pub canonical_url: Option<String>,
    /// Language code (default: "en").
    pub lang: Option<String>,
}

/// Render a document as a complete standalone HTML page.
pub fn to_html_page(doc: &Document, config: &PageConfig) -> String {
    let body = to_html(&doc.tokens);
    let lang = config.lang.as_deref().unwrap_or("en");

    // Resolve title: explicit config > front matter > fallback
    let title = config
        .title
        .clone()
        .or_else(|| doc.front_matter.as_ref().and_then(|fm| fm.title.clone()))
        .unwrap_or_else(|| "Untitled".to_string());

    let mut meta_extra = String::new();
    if let Some(desc) = &config.description {
        meta_extra.push_str(&format!(
            "\n    <meta name=\"description\" content=\"{}\">",
            escape_html(desc)
        ));
    }
    if let Some(url) = &config.canonical_url {
        meta_extra.push_str(&format!(
            "\n    <link rel=\"canonical\" href=\"{}\">",
            escape_html(url)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>{meta_extra}
    <style>{css}</style>
</head>
<body>
<main class="sectionized">
{body}
</main>
</body>
</html>"#,
        lang = escape_html(lang),
        title = escape_html(&title),
        meta_extra = meta_extra,
        css = PAGE_CSS,
        body = body,
    )
}

/// Embedded stylesheet for standalone pages. The section border makes the
/// injected nesting visible while proofreading.
const PAGE_CSS: &str = r#"
:root {
    --text: #1a1a24;
    --text-dim: #5a5a6e;
    --border: #d8d8e2;
    --accent: #2563eb;
}
body { margin: 0; color: var(--text); font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; line-height: 1.65; }
.sectionized { max-width: 44rem; margin: 0 auto; padding: 2rem 1.25rem 4rem; }
.sectionized section { margin: 1.5rem 0; padding-left: 1rem; border-left: 2px solid var(--border); }
.sectionized section:hover { border-left-color: var(--accent); }
.sectionized h1, .sectionized h2, .sectionized h3 { letter-spacing: -0.01em; }
.sectionized a { color: var(--accent); text-decoration: none; }
.sectionized a:hover { text-decoration: underline; }
.sectionized a.header-anchor { margin-right: 0.25rem; font-size: 0.8em; opacity: 0; }
.sectionized h1:hover .header-anchor, .sectionized h2:hover .header-anchor,
.sectionized h3:hover .header-anchor, .sectionized h4:hover .header-anchor { opacity: 1; }
.sectionized img { max-width: 100%; }
.sectionized code { font-family: "SF Mono", "Fira Code", monospace; font-size: 0.9em; background: rgba(0,0,0,0.05); padding: 0.1em 0.35em; border-radius: 4px; }
.sectionized pre { background: #f6f6fa; border: 1px solid var(--border); border-radius: 8px; padding: 1rem; overflow-x: auto; }
.sectionized pre code { background: transparent; padding: 0; }
.sectionized blockquote { border-left: 3px solid var(--accent); margin: 1rem 0; padding: 0.25rem 1rem; color: var(--text-dim); }
"#;
