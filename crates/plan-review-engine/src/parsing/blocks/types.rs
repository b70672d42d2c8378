use serde::{Deserialize, Serialize};

use crate::parsing::rope::span::Span;

/// The kind of a parsed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Paragraph,
    Heading,
    Blockquote,
    ListItem,
    Code,
    Hr,
    Table,
}

/// An immutable semantic unit of the plan document.
///
/// Ids are `block-<n>` and only stable within one parse; annotations re-anchor
/// by content when a document is parsed again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Text with block markers stripped; raw body for code, raw rows for tables.
    pub content: String,
    /// Heading level or list nesting depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    /// Fenced code language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Task list state; `None` for plain list items and other kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Post-increment emission counter: `block-0` has order 1.
    pub order: usize,
    /// 1-based source line where the block starts.
    pub start_line: usize,
    /// Byte span of the source lines the block was built from.
    #[serde(default)]
    pub span: Span,
}

impl Block {
    /// True for a fenced code block.
    pub fn is_code(&self) -> bool {
        self.kind == BlockKind::Code
    }
}
