//! Section wrapper transform.
//!
//! Single pass over the flat token stream that wraps every heading in a
//! `<section>` spanning until the next heading of equal or shallower level.
//! `{...}` attribute blocks ahead of a heading decorate the section it opens,
//! a block trailing an image becomes the image's `style`, and empty or
//! attribute-only paragraphs are elided.

use std::collections::VecDeque;

use crate::attrs;
use crate::token::{InlineChild, Token};

/// A section opened by a heading, waiting for its closing marker.
struct OpenSection {
    level: u8,
}

/// Re-nest `tokens` into section-wrapped form.
///
/// Pure and deterministic: all working state lives on this call's stack. The
/// output is balanced regardless of the input heading pattern — every
/// injected `<section ...>` has a matching `</section>` by the time the
/// function returns.
pub fn wrap_sections(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<OpenSection> = Vec::new();
    let mut section_attrs = String::new();
    let mut pending_attrs = String::new();

    let mut input: VecDeque<Token> = tokens.into();

    while let Some(token) = input.pop_front() {
        match token {
            // Empty or attribute-only paragraph: drop all three tokens. An
            // attribute block inside still applies to the next heading.
            Token::ParagraphOpen if elidable_paragraph(&input) => {
                if let Some(Token::Inline { content, .. }) = input.front() {
                    if attrs::is_attr_block(content) {
                        pending_attrs = attrs::interior(content).to_string();
                    }
                }
                input.pop_front();
                input.pop_front();
            }

            // A bare inline run that is entirely an attribute block: capture
            // it for the next heading and drop the token. A later block
            // overwrites an earlier one.
            Token::Inline { ref content, .. } if attrs::is_attr_block(content) => {
                pending_attrs = attrs::interior(content).to_string();
            }

            Token::Inline {
                content,
                mut children,
            } => {
                apply_image_attrs(&mut children);
                output.push(Token::Inline { content, children });
            }

            Token::HeadingOpen {
                level,
                attrs: heading_attrs,
            } => {
                // Close every open section at this level or deeper before
                // opening the new one.
                while stack.last().is_some_and(|open| open.level >= level) {
                    stack.pop();
                    output.push(Token::html_block("</section>"));
                }

                if !pending_attrs.is_empty() {
                    section_attrs = std::mem::take(&mut pending_attrs);
                }
                let opener = if section_attrs.is_empty() {
                    "<section>".to_string()
                } else {
                    format!("<section {section_attrs}>")
                };
                output.push(Token::HtmlBlock { content: opener });
                stack.push(OpenSection { level });
                section_attrs.clear();
                pending_attrs.clear();

                output.push(Token::HeadingOpen {
                    level,
                    attrs: heading_attrs,
                });
            }

            other => output.push(other),
        }
    }

    while stack.pop().is_some() {
        output.push(Token::html_block("</section>"));
    }

    output
}

/// Lookahead: the next two tokens are an inline run that is empty after
/// trimming (or entirely an attribute block) followed by a paragraph close.
fn elidable_paragraph(input: &VecDeque<Token>) -> bool {
    let (Some(Token::Inline { content, .. }), Some(Token::ParagraphClose)) =
        (input.front(), input.get(1))
    else {
        return false;
    };
    content.trim().is_empty() || attrs::is_attr_block(content)
}

/// Apply a `{style="..."}` block trailing an image to the image itself.
///
/// Only the `style` value is consumed; blocks without one are left in the
/// text untouched.
fn apply_image_attrs(children: &mut [InlineChild]) {
    let mut i = 0;
    while i + 1 < children.len() {
        let (head, tail) = children.split_at_mut(i + 1);
        if let (InlineChild::Image { attrs: image_attrs }, InlineChild::Text { content }) =
            (&mut head[i], &mut tail[0])
        {
            if attrs::is_attr_block(content) {
                if let Some(style) = attrs::style_value(attrs::interior(content)) {
                    image_attrs.push(("style".to_string(), style.to_string()));
                    *content = attrs::strip_first_block(content);
                }
            }
        }
        i += 1;
    }
}
