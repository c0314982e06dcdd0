//! Utility functions and constants for HTML processing.

/// Heading tags considered for sidebars and markers (`h1` is the page title)
pub const HEADING_TAGS: &[&str] = &["h2", "h3", "h4", "h5", "h6"];

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Heading rank of a tag (`h2` => 2), for the tags in [`HEADING_TAGS`]
pub fn heading_level(tag: &str) -> Option<u8> {
    let tag = tag.to_lowercase();
    if !HEADING_TAGS.contains(&tag.as_str()) {
        return None;
    }
    tag[1..].parse().ok()
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text content for HTML output
pub fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML attribute value
pub fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h2"), Some(2));
        assert_eq!(heading_level("H6"), Some(6));
        assert_eq!(heading_level("h1"), None);
        assert_eq!(heading_level("header"), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Multi \n  Space "), "Multi Space");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_html_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html_attr("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn test_is_void() {
        assert!(is_void("br"));
        assert!(is_void("IMG"));
        assert!(!is_void("div"));
    }
}
