//! Heading anchor generation.
//!
//! Active when the document's front matter sets `permalinks: true`: every
//! heading gets an `id` derived from its text plus a visible permalink marker
//! ahead of the heading text. Runs before section wrapping and never affects
//! it.

use std::collections::HashMap;

use crate::token::{InlineChild, Token};

/// CSS class of the injected permalink marker.
pub const ANCHOR_CLASS: &str = "header-anchor";

/// Visible symbol of the injected permalink marker.
pub const ANCHOR_SYMBOL: &str = "\u{1F517}";

/// Add `id` attributes and permalink markers to every heading in `tokens`.
///
/// Duplicate heading texts get `-1`, `-2`, ... suffixes so ids stay unique
/// within one document.
pub fn add_anchors(tokens: &mut [Token]) {
    let mut seen: HashMap<String, usize> = HashMap::new();

    let mut i = 0;
    while i + 1 < tokens.len() {
        let (head, tail) = tokens.split_at_mut(i + 1);
        if let (Token::HeadingOpen { attrs, .. }, Token::Inline { children, .. }) =
            (&mut head[i], &mut tail[0])
        {
            let base = slugify(&plain_text(children));
            let count = seen.entry(base.clone()).or_insert(0);
            let slug = if *count == 0 {
                base
            } else {
                format!("{base}-{count}")
            };
            *count += 1;

            attrs.push(("id".to_string(), slug.clone()));
            children.insert(
                0,
                InlineChild::Html {
                    content: format!(
                        "<a class=\"{ANCHOR_CLASS}\" href=\"#{slug}\">{ANCHOR_SYMBOL}</a> "
                    ),
                },
            );
        }
        i += 1;
    }
}

/// Lowercase the text and collapse every run of non-word characters into a
/// single hyphen. Edge hyphens are kept ("Hello!" becomes "hello-").
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut gap = false;
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            if gap {
                slug.push('-');
                gap = false;
            }
            slug.extend(c.to_lowercase());
        } else {
            gap = true;
        }
    }
    if gap {
        slug.push('-');
    }
    slug
}

/// Visible text of a heading's inline children (markup and images excluded).
fn plain_text(children: &[InlineChild]) -> String {
    let mut text = String::new();
    for child in children {
        if let InlineChild::Text { content } = child {
            text.push_str(content);
        }
    }
    text
}
