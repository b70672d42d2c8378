pub mod blocks;
pub mod rope;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{Block, BlockBuilder, MarkdownLineClassifier, kinds::Heading};
use rope::{lines_with_spans, slice::slice_to_string};

/// Blocks together with the rope they were parsed from.
#[derive(Debug)]
pub struct ParsedDoc {
    pub rope: Rope,
    pub blocks: Vec<Block>,
}

impl ParsedDoc {
    /// The exact markdown source behind a block.
    pub fn source_of(&self, block: &Block) -> String {
        slice_to_string(&self.rope, block.span)
    }
}

pub fn parse_document(rope: Rope) -> ParsedDoc {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new();

    for lr in lines_with_spans(&rope) {
        let lc = classifier.classify(&lr);
        builder.push(&lc);
    }

    ParsedDoc {
        blocks: builder.finish(),
        rope,
    }
}

/// Parses plan markdown into blocks. Never fails.
pub fn parse(markdown: &str) -> Vec<Block> {
    parse_document(Rope::from(markdown)).blocks
}

/// A display title for a plan: the first heading, else the first non-blank line.
pub fn plan_title(markdown: &str) -> String {
    let Some(first) = markdown.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return "untitled".to_string();
    };
    if first.starts_with(Heading::MARKER) {
        return first.trim_start_matches(Heading::MARKER).trim().to_string();
    }
    first.to_string()
}
