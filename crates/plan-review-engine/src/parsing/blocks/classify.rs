use crate::parsing::rope::{lines::LineRef, span::Span};

use super::kinds::{BlockQuote, CodeFence, Heading, ListItem, TableRow, ThematicBreak};

/// What a line would open if it were seen outside a code fence or table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Heading { level: usize, text: String },
    ThematicBreak,
    ListItem(ListItem),
    BlockQuote { text: String },
    FenceOpen { language: Option<String> },
    TableRow,
    Text,
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context. The builder decides which facts
/// matter given its current state (inside a fence only `closes_fence` does).
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full byte span of this line in the rope.
    pub line: Span,
    /// 1-based line number.
    pub number: usize,
    /// Line text without its terminator.
    pub raw: String,
    /// Highest-priority opener for this line.
    pub kind: LineKind,
    /// The line would close an open code fence.
    pub closes_fence: bool,
    /// The line would continue an open table.
    pub table_row: bool,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`].
    ///
    /// Openers are tried in a fixed priority: heading, rule, list item,
    /// blockquote, code fence, table row, blank, then plain text.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let trimmed = lr.text.trim();
        let table_row = TableRow::matches(trimmed);

        let kind = if let Some((level, text)) = Heading::parse(lr.text.trim_start()) {
            LineKind::Heading {
                level,
                text: text.to_string(),
            }
        } else if ThematicBreak::matches(trimmed) {
            LineKind::ThematicBreak
        } else if let Some(item) = ListItem::parse(&lr.text) {
            LineKind::ListItem(item)
        } else if let Some(text) = BlockQuote::strip_prefix(trimmed) {
            LineKind::BlockQuote {
                text: text.to_string(),
            }
        } else if CodeFence::is_fence(trimmed) {
            LineKind::FenceOpen {
                language: CodeFence::language(trimmed),
            }
        } else if table_row {
            LineKind::TableRow
        } else if trimmed.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Text
        };

        LineClass {
            line: lr.span,
            number: lr.number,
            raw: lr.text.clone(),
            kind,
            closes_fence: CodeFence::closes(trimmed),
            table_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> LineKind {
        let lr = LineRef {
            number: 1,
            span: Span {
                start: 0,
                end: text.len(),
            },
            text: text.to_string(),
        };
        MarkdownLineClassifier.classify(&lr).kind
    }

    #[test]
    fn rule_wins_over_list_marker() {
        assert_eq!(classify("***"), LineKind::ThematicBreak);
        assert_eq!(classify("---"), LineKind::ThematicBreak);
    }

    #[test]
    fn list_marker_wins_over_table_row() {
        assert!(matches!(classify("- a | b | c"), LineKind::ListItem(_)));
    }

    #[test]
    fn blank_and_text() {
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("just words"), LineKind::Text);
    }

    #[test]
    fn fence_opener_language() {
        assert_eq!(
            classify("```rust"),
            LineKind::FenceOpen {
                language: Some("rust".into())
            }
        );
    }
}
