use std::sync::LazyLock;

use regex::Regex;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*|-|\d+\.)\s").expect("list marker pattern is valid"));

static CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([ xX])\]\s*").expect("checkbox pattern is valid"));

/// A parsed bullet or ordered list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Nesting depth: leading whitespace / 2, tabs counting as two spaces.
    pub depth: usize,
    /// Item text with the marker and any checkbox removed.
    pub text: String,
    /// `Some` for task items, carrying the checked state.
    pub checked: Option<bool>,
}

impl ListItem {
    /// Parses a raw (untrimmed) line.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let marker = MARKER.find(trimmed)?;
        let mut text = &trimmed[marker.end()..];

        let mut checked = None;
        if let Some(caps) = CHECKBOX.captures(text) {
            checked = Some(caps[1].eq_ignore_ascii_case("x"));
            text = &text[caps[0].len()..];
        }

        Some(Self {
            depth: Self::indent_width(raw) / 2,
            text: text.to_string(),
            checked,
        })
    }

    fn indent_width(raw: &str) -> usize {
        raw.chars()
            .take_while(|c| c.is_whitespace())
            .map(|c| if c == '\t' { 2 } else { 1 })
            .sum()
    }
}
