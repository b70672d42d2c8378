use crate::parsing::rope::span::Span;

use super::{
    classify::{LineClass, LineKind},
    types::{Block, BlockKind},
};

/// A multi-line leaf that is still collecting lines.
#[derive(Debug, Clone)]
enum LeafState {
    None,
    Paragraph {
        span: Span,
        start_line: usize,
        lines: Vec<String>,
    },
    Fence {
        language: Option<String>,
        span: Span,
        start_line: usize,
        lines: Vec<String>,
    },
    Table {
        span: Span,
        start_line: usize,
        rows: Vec<String>,
    },
}

/// Builds blocks from classified lines in a single forward pass.
///
/// Single-line blocks (headings, rules, list items, quotes) are emitted as soon
/// as they are seen; paragraphs, fences and tables are buffered until a line
/// ends them.
pub struct BlockBuilder {
    leaf: LeafState,
    next_id: usize,
    out: Vec<Block>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            leaf: LeafState::None,
            next_id: 0,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        match &mut self.leaf {
            LeafState::Fence { span, lines, .. } => {
                *span = span.cover(c.line);
                if c.closes_fence {
                    self.flush_leaf();
                } else {
                    lines.push(c.raw.clone());
                }
                return;
            }
            LeafState::Table { span, rows, .. } if c.table_row => {
                *span = span.cover(c.line);
                rows.push(c.raw.clone());
                return;
            }
            LeafState::Table { .. } => self.flush_leaf(),
            _ => {}
        }

        match &c.kind {
            LineKind::Heading { level, text } => {
                self.flush_leaf();
                self.emit(BlockKind::Heading, text.clone(), c.line, c.number, |b| {
                    b.level = Some(*level);
                });
            }
            LineKind::ThematicBreak => {
                self.flush_leaf();
                self.emit(BlockKind::Hr, String::new(), c.line, c.number, |_| {});
            }
            LineKind::ListItem(item) => {
                self.flush_leaf();
                self.emit(BlockKind::ListItem, item.text.clone(), c.line, c.number, |b| {
                    b.level = Some(item.depth);
                    b.checked = item.checked;
                });
            }
            LineKind::BlockQuote { text } => {
                self.flush_leaf();
                self.emit(BlockKind::Blockquote, text.clone(), c.line, c.number, |_| {});
            }
            LineKind::FenceOpen { language } => {
                self.flush_leaf();
                self.leaf = LeafState::Fence {
                    language: language.clone(),
                    span: c.line,
                    start_line: c.number,
                    lines: vec![],
                };
            }
            LineKind::TableRow => {
                self.flush_leaf();
                self.leaf = LeafState::Table {
                    span: c.line,
                    start_line: c.number,
                    rows: vec![c.raw.clone()],
                };
            }
            LineKind::Blank => self.flush_leaf(),
            LineKind::Text => self.extend_paragraph(c),
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        // EOF flush; an unterminated fence keeps everything up to the end.
        self.flush_leaf();
        self.out
    }

    fn extend_paragraph(&mut self, c: &LineClass) {
        match &mut self.leaf {
            LeafState::Paragraph { span, lines, .. } => {
                *span = span.cover(c.line);
                lines.push(c.raw.clone());
            }
            _ => {
                self.leaf = LeafState::Paragraph {
                    span: c.line,
                    start_line: c.number,
                    lines: vec![c.raw.clone()],
                };
            }
        }
    }

    fn flush_leaf(&mut self) {
        match std::mem::replace(&mut self.leaf, LeafState::None) {
            LeafState::None => {}
            LeafState::Paragraph {
                span,
                start_line,
                lines,
            } => {
                self.emit(BlockKind::Paragraph, lines.join("\n"), span, start_line, |_| {});
            }
            LeafState::Fence {
                language,
                span,
                start_line,
                lines,
            } => {
                self.emit(BlockKind::Code, lines.join("\n"), span, start_line, |b| {
                    b.language = language;
                });
            }
            LeafState::Table {
                span,
                start_line,
                rows,
            } => {
                self.emit(BlockKind::Table, rows.join("\n"), span, start_line, |_| {});
            }
        }
    }

    fn emit(
        &mut self,
        kind: BlockKind,
        content: String,
        span: Span,
        start_line: usize,
        fill: impl FnOnce(&mut Block),
    ) {
        let n = self.next_id;
        self.next_id += 1;

        let mut block = Block {
            id: format!("block-{n}"),
            kind,
            content,
            level: None,
            language: None,
            checked: None,
            order: self.next_id,
            start_line,
            span,
        };
        fill(&mut block);
        self.out.push(block);
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
