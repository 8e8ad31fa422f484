//! Markdown tokenizer.
//!
//! pulldown-cmark adapter producing the flat token stream the section
//! wrapper consumes. Top-level headings and paragraphs become structured
//! tokens; raw HTML blocks pass through as [`Token::HtmlBlock`]; every other
//! block construct is rendered to HTML up front and travels as
//! [`Token::Opaque`]. Inline `{...}` attribute syntax is left as literal
//! text — interpreting it is the transform's job.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, html};

use crate::render::escape_html;
use crate::token::{InlineChild, Token};

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Tokenize a markdown body (front matter already removed).
pub fn tokenize(body: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut events = Parser::new_ext(body, parser_options());

    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                let level = numeric_level(level);
                tokens.push(Token::HeadingOpen {
                    level,
                    attrs: Vec::new(),
                });
                tokens.push(read_inline(&mut events));
                tokens.push(Token::HeadingClose { level });
            }
            Event::Start(Tag::Paragraph) => {
                tokens.push(Token::ParagraphOpen);
                tokens.push(read_inline(&mut events));
                tokens.push(Token::ParagraphClose);
            }
            Event::Start(Tag::HtmlBlock) => {
                let mut content = String::new();
                for inner in events.by_ref() {
                    match inner {
                        Event::Html(text) => content.push_str(&text),
                        Event::End(_) => break,
                        _ => {}
                    }
                }
                tokens.push(Token::HtmlBlock {
                    content: content.trim_end().to_string(),
                });
            }
            Event::Rule => tokens.push(Token::Opaque {
                html: "<hr />\n".to_string(),
            }),
            Event::Start(tag) => {
                // Container or leaf block the transform treats as opaque:
                // buffer its events and let pulldown-cmark render them.
                let mut depth = 1usize;
                let mut buffered = vec![Event::Start(tag)];
                for inner in events.by_ref() {
                    match &inner {
                        Event::Start(_) => depth += 1,
                        Event::End(_) => depth -= 1,
                        _ => {}
                    }
                    buffered.push(inner);
                    if depth == 0 {
                        break;
                    }
                }
                let mut rendered = String::new();
                html::push_html(&mut rendered, buffered.into_iter());
                tokens.push(Token::Opaque { html: rendered });
            }
            Event::Html(text) => tokens.push(Token::HtmlBlock {
                content: text.trim_end().to_string(),
            }),
            _ => {}
        }
    }

    tokens
}

fn numeric_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Collect one inline run (the contents of a paragraph or heading) into a
/// [`Token::Inline`], consuming events up to and including the closing event.
fn read_inline(events: &mut Parser<'_>) -> Token {
    let mut content = String::new();
    let mut children: Vec<InlineChild> = Vec::new();
    // Close fragments for inline markup currently open, innermost last.
    let mut open: Vec<&'static str> = Vec::new();

    while let Some(event) = events.next() {
        match event {
            Event::Text(text) => {
                content.push_str(&text);
                push_text(&mut children, &text);
            }
            Event::Code(code) => {
                content.push('`');
                content.push_str(&code);
                content.push('`');
                children.push(InlineChild::Html {
                    content: format!("<code>{}</code>", escape_html(&code)),
                });
            }
            Event::InlineHtml(raw) => {
                content.push_str(&raw);
                children.push(InlineChild::Html {
                    content: raw.to_string(),
                });
            }
            Event::SoftBreak => {
                content.push('\n');
                children.push(InlineChild::Html {
                    content: "\n".to_string(),
                });
            }
            Event::HardBreak => {
                children.push(InlineChild::Html {
                    content: "<br />\n".to_string(),
                });
            }
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                let alt = read_image_alt(events);
                content.push_str(&format!("![{alt}]({dest_url})"));
                let mut attrs = vec![
                    ("src".to_string(), dest_url.to_string()),
                    ("alt".to_string(), alt),
                ];
                if !title.is_empty() {
                    attrs.push(("title".to_string(), title.to_string()));
                }
                children.push(InlineChild::Image { attrs });
            }
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(" title=\"{}\"", escape_html(&title))
                };
                children.push(InlineChild::Html {
                    content: format!("<a href=\"{}\"{title_attr}>", escape_html(&dest_url)),
                });
                open.push("</a>");
            }
            Event::Start(Tag::Emphasis) => {
                children.push(InlineChild::Html {
                    content: "<em>".to_string(),
                });
                open.push("</em>");
            }
            Event::Start(Tag::Strong) => {
                children.push(InlineChild::Html {
                    content: "<strong>".to_string(),
                });
                open.push("</strong>");
            }
            Event::Start(Tag::Strikethrough) => {
                children.push(InlineChild::Html {
                    content: "<del>".to_string(),
                });
                open.push("</del>");
            }
            Event::Start(_) => {
                // Unexpected nested container: keep its contents, drop the wrapper.
                open.push("");
            }
            Event::End(_) => match open.pop() {
                Some(close) => {
                    if !close.is_empty() {
                        children.push(InlineChild::Html {
                            content: close.to_string(),
                        });
                    }
                }
                None => break,
            },
            _ => {}
        }
    }

    Token::Inline { content, children }
}

/// Consume the events inside an image (its alt text) through the closing
/// event, returning the flattened alt string.
fn read_image_alt(events: &mut Parser<'_>) -> String {
    let mut alt = String::new();
    let mut depth = 1usize;
    for event in events.by_ref() {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Text(text) => alt.push_str(&text),
            Event::Code(code) => alt.push_str(&code),
            Event::SoftBreak | Event::HardBreak => alt.push(' '),
            _ => {}
        }
    }
    alt
}

/// Append text, merging with a trailing text child so lookups like "image
/// followed by one text child" stay simple.
fn push_text(children: &mut Vec<InlineChild>, text: &str) {
    if let Some(InlineChild::Text { content }) = children.last_mut() {
        content.push_str(text);
    } else {
        children.push(InlineChild::Text {
            content: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_and_paragraph_structure() {
        let tokens = tokenize("# Title\n\nHello world\n");
        assert_eq!(
            tokens[0],
            Token::HeadingOpen {
                level: 1,
                attrs: Vec::new()
            }
        );
        assert!(
            matches!(&tokens[1], Token::Inline { content, .. } if content == "Title"),
            "got {:?}",
            tokens[1]
        );
        assert_eq!(tokens[2], Token::HeadingClose { level: 1 });
        assert_eq!(tokens[3], Token::ParagraphOpen);
        assert!(matches!(&tokens[4], Token::Inline { content, .. } if content == "Hello world"));
        assert_eq!(tokens[5], Token::ParagraphClose);
    }

    #[test]
    fn heading_levels_map_numerically() {
        let tokens = tokenize("### three\n\n###### six\n");
        assert!(matches!(tokens[0], Token::HeadingOpen { level: 3, .. }));
        assert!(matches!(tokens[3], Token::HeadingOpen { level: 6, .. }));
    }

    #[test]
    fn attribute_syntax_stays_literal() {
        let tokens = tokenize("{class=\"tour\"}\n\n## Heading\n");
        assert!(
            matches!(&tokens[1], Token::Inline { content, .. } if content == "{class=\"tour\"}"),
            "got {:?}",
            tokens[1]
        );
    }

    #[test]
    fn list_is_opaque() {
        let tokens = tokenize("- one\n- two\n");
        assert_eq!(tokens.len(), 1);
        let Token::Opaque { html } = &tokens[0] else {
            panic!("expected opaque token, got {:?}", tokens[0]);
        };
        assert!(html.contains("<ul>"));
        assert!(html.contains("</ul>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn fenced_code_is_opaque() {
        let tokens = tokenize("```\nlet x = 1;\n```\n");
        let Token::Opaque { html } = &tokens[0] else {
            panic!("expected opaque token");
        };
        assert!(html.contains("<pre><code>"));
    }

    #[test]
    fn blockquote_with_heading_is_opaque() {
        let tokens = tokenize("> # Inside\n> quoted\n");
        assert_eq!(tokens.len(), 1);
        let Token::Opaque { html } = &tokens[0] else {
            panic!("expected opaque token");
        };
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<h1>Inside</h1>"));
    }

    #[test]
    fn raw_html_block_passes_through() {
        let tokens = tokenize("<div class=\"aside\">hi</div>\n");
        let Token::HtmlBlock { content } = &tokens[0] else {
            panic!("expected html block, got {:?}", tokens[0]);
        };
        assert_eq!(content, "<div class=\"aside\">hi</div>");
    }

    #[test]
    fn rule_is_opaque() {
        let tokens = tokenize("---\n");
        assert_eq!(
            tokens[0],
            Token::Opaque {
                html: "<hr />\n".to_string()
            }
        );
    }

    #[test]
    fn image_becomes_child_with_attrs() {
        let tokens = tokenize("![street map](map.png \"Old town\")\n");
        let Token::Inline { content, children } = &tokens[1] else {
            panic!("expected inline, got {:?}", tokens[1]);
        };
        assert_eq!(content, "![street map](map.png)");
        let InlineChild::Image { attrs } = &children[0] else {
            panic!("expected image child");
        };
        assert_eq!(
            attrs,
            &vec![
                ("src".to_string(), "map.png".to_string()),
                ("alt".to_string(), "street map".to_string()),
                ("title".to_string(), "Old town".to_string()),
            ]
        );
    }

    #[test]
    fn image_trailing_attr_block_is_separate_text_child() {
        let tokens = tokenize("![a](b.png){style=\"width:50%\"}\n");
        let Token::Inline { content, children } = &tokens[1] else {
            panic!("expected inline");
        };
        // The paragraph as a whole must not look like an attribute block.
        assert!(!content.starts_with('{'));
        assert!(matches!(&children[0], InlineChild::Image { .. }));
        assert!(
            matches!(&children[1], InlineChild::Text { content } if content == "{style=\"width:50%\"}")
        );
    }

    #[test]
    fn emphasis_renders_as_inline_html() {
        let tokens = tokenize("*hi* there\n");
        let Token::Inline { children, .. } = &tokens[1] else {
            panic!("expected inline");
        };
        assert_eq!(
            children,
            &vec![
                InlineChild::Html {
                    content: "<em>".to_string()
                },
                InlineChild::Text {
                    content: "hi".to_string()
                },
                InlineChild::Html {
                    content: "</em>".to_string()
                },
                InlineChild::Text {
                    content: " there".to_string()
                },
            ]
        );
    }

    #[test]
    fn link_carries_escaped_href() {
        let tokens = tokenize("[go](https://example.com/?a=1&b=2)\n");
        let Token::Inline { children, .. } = &tokens[1] else {
            panic!("expected inline");
        };
        let InlineChild::Html { content } = &children[0] else {
            panic!("expected link open");
        };
        assert!(content.contains("href=\"https://example.com/?a=1&amp;b=2\""));
        assert!(matches!(
            &children[2],
            InlineChild::Html { content } if content == "</a>"
        ));
    }

    #[test]
    fn consecutive_text_events_merge() {
        // Backslash escapes split text into multiple events.
        let tokens = tokenize("a\\*b and more\n");
        let Token::Inline { children, .. } = &tokens[1] else {
            panic!("expected inline");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(&children[0], InlineChild::Text { content } if content == "a*b and more"));
    }
}
