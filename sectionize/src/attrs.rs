//! Attribute-block string routines.
//!
//! Attribute blocks are `{...}` substrings carrying presentation metadata.
//! The matching here is deliberately narrow: brace detection plus a single
//! `style="..."` extraction. Anything malformed simply fails the checks and
//! stays ordinary text — there is no error path.

/// True if `text`, after trimming, is entirely a `{...}` block.
pub fn is_attr_block(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() >= 2 && trimmed.starts_with('{') && trimmed.ends_with('}')
}

/// The content between the braces of an attribute block.
///
/// Callers must check [`is_attr_block`] first.
pub fn interior(text: &str) -> &str {
    let trimmed = text.trim();
    &trimmed[1..trimmed.len() - 1]
}

/// Extract the first non-empty `style="..."` value from a block interior.
pub fn style_value(block: &str) -> Option<&str> {
    let rest = &block[block.find("style=\"")? + "style=\"".len()..];
    let value = &rest[..rest.find('"')?];
    if value.is_empty() { None } else { Some(value) }
}

/// Remove the first `{...}` span from `text`.
///
/// Text without a balanced span comes back unchanged.
pub fn strip_first_block(text: &str) -> String {
    let Some(open) = text.find('{') else {
        return text.to_string();
    };
    match text[open..].find('}') {
        Some(close) => {
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..open]);
            out.push_str(&text[open + close + 1..]);
            out
        }
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attr_block_detection() {
        assert!(is_attr_block("{class=\"red\"}"));
        assert!(is_attr_block("  {.red}  "));
        assert!(is_attr_block("{}"));
        assert!(!is_attr_block("{unclosed"));
        assert!(!is_attr_block("no braces"));
        assert!(!is_attr_block("{mid} tail"));
        assert!(!is_attr_block(""));
    }

    #[test]
    fn interior_strips_braces() {
        assert_eq!(interior("{class=\"red\"}"), "class=\"red\"");
        assert_eq!(interior(" {.red} "), ".red");
        assert_eq!(interior("{}"), "");
    }

    #[test]
    fn style_value_extraction() {
        assert_eq!(style_value("style=\"width:50%\""), Some("width:50%"));
        assert_eq!(
            style_value("id=\"x\" style=\"float:left\""),
            Some("float:left")
        );
        assert_eq!(style_value("id=\"x\""), None);
        assert_eq!(style_value("style=\"\""), None);
        assert_eq!(style_value("style=\"unterminated"), None);
        assert_eq!(style_value(""), None);
    }

    #[test]
    fn strip_removes_first_block_only() {
        assert_eq!(strip_first_block("{a} and {b}"), " and {b}");
        assert_eq!(strip_first_block("pre {x} post"), "pre  post");
        assert_eq!(strip_first_block("no braces"), "no braces");
        assert_eq!(strip_first_block("{unclosed"), "{unclosed");
        assert_eq!(strip_first_block("dangling } first"), "dangling } first");
    }
}
