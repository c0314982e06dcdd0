//! Anchor slugs for headings.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w-]+").unwrap());
static REPEATED_HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());

/// Id used when a heading's text has no word characters at all
const FALLBACK_ID: &str = "section";

/// Convert heading text into an id usable as a URL fragment.
///
/// ```rust
/// use butr_core::slugify;
///
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("  Multi   Space  "), "multi-space");
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lower, "-");
    let stripped = NON_WORD.replace_all(&hyphenated, "");
    let collapsed = REPEATED_HYPHENS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Hands out unique anchor ids for one outline.
///
/// Ids already present in the page are reserved first and never changed.
/// A generated slug that is already taken gets a numeric suffix, starting
/// at `-2`.
#[derive(Debug, Default, Clone)]
pub struct AnchorRegistry {
    taken: HashSet<String>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an existing id as used
    pub fn reserve(&mut self, id: &str) {
        self.taken.insert(id.to_string());
    }

    /// Check if an id has been handed out or reserved
    pub fn contains(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Generate a unique id from heading text
    pub fn generate(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = FALLBACK_ID.to_string();
        }

        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        self.taken.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Getting Started!"), "getting-started");
        assert_eq!(slugify("What's new?"), "whats-new");
    }

    #[test]
    fn test_slugify_whitespace() {
        assert_eq!(slugify("  Multi   Space  "), "multi-space");
        assert_eq!(slugify("tabs\tand\nlines"), "tabs-and-lines");
    }

    #[test]
    fn test_slugify_hyphens() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn test_slugify_keeps_underscores_and_digits() {
        assert_eq!(slugify("snake_case 2"), "snake_case-2");
    }

    #[test]
    fn test_registry_suffixes_duplicates() {
        let mut registry = AnchorRegistry::new();
        assert_eq!(registry.generate("Usage"), "usage");
        assert_eq!(registry.generate("Usage"), "usage-2");
        assert_eq!(registry.generate("usage!"), "usage-3");
    }

    #[test]
    fn test_registry_respects_reserved() {
        let mut registry = AnchorRegistry::new();
        registry.reserve("intro");
        registry.reserve("intro-2");
        assert_eq!(registry.generate("Intro"), "intro-3");
        assert!(registry.contains("intro-3"));
    }

    #[test]
    fn test_registry_fallback_for_symbols() {
        let mut registry = AnchorRegistry::new();
        assert_eq!(registry.generate("!!!"), "section");
        assert_eq!(registry.generate("???"), "section-2");
    }
}
