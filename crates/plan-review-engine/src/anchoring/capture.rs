use crate::models::DomMeta;
use crate::render::{Dom, DomRange, block_element, enclosing_block_id};

use super::AnchorError;
use super::meta::capture_meta;

/// Where a new annotation sits, before its kind is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub block_id: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub original_text: String,
    pub start_meta: Option<DomMeta>,
    pub end_meta: Option<DomMeta>,
}

/// Anchors a user selection to the block containing its start.
///
/// The start offset is the first occurrence of the selected text in the
/// block's rendered text, so repeated substrings share one anchor. A selection
/// whose text does not occur in that block (it runs into the next one) gets
/// offset zero.
pub fn capture_anchor(dom: &Dom, range: &DomRange) -> Result<Anchor, AnchorError> {
    let original_text = dom.range_text(range).ok_or(AnchorError::InvalidRange)?;
    if original_text.is_empty() {
        return Err(AnchorError::EmptySelection);
    }
    let block_id = enclosing_block_id(dom, range.start.node).ok_or(AnchorError::OutsideBlock)?;
    let block = block_element(dom, &block_id).ok_or(AnchorError::OutsideBlock)?;

    let block_text = dom.text_content(block);
    let start_offset = match block_text.find(&original_text) {
        Some(byte) => block_text[..byte].chars().count(),
        None => {
            log::debug!("selection is not contained in {block_id}; anchoring at its start");
            0
        }
    };

    Ok(Anchor {
        end_offset: start_offset + original_text.chars().count(),
        start_offset,
        start_meta: capture_meta(dom, range.start),
        end_meta: capture_meta(dom, range.end),
        block_id,
        original_text,
    })
}

/// Anchors the whole rendered text of a block, as used for code blocks.
pub fn capture_block(dom: &Dom, block_id: &str) -> Result<Anchor, AnchorError> {
    let block = block_element(dom, block_id)
        .ok_or_else(|| AnchorError::UnknownBlock(block_id.to_string()))?;
    let range = dom
        .range_over(block)
        .ok_or(AnchorError::EmptySelection)?;
    let original_text = dom.text_content(block);

    Ok(Anchor {
        block_id: block_id.to_string(),
        start_offset: 0,
        end_offset: original_text.chars().count(),
        start_meta: capture_meta(dom, range.start),
        end_meta: capture_meta(dom, range.end),
        original_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use crate::render::{DomPoint, render_blocks};
    use pretty_assertions::assert_eq;

    #[test]
    fn offset_is_first_occurrence_in_block() {
        let blocks = parse("Intro\n\nrun the test then run the test again");
        let dom = render_blocks(&blocks);
        let p = block_element(&dom, &blocks[1].id).unwrap();
        let text = dom.text_nodes(p)[0];
        // Select the second "run the test".
        let range = DomRange {
            start: DomPoint { node: text, offset: 18 },
            end: DomPoint { node: text, offset: 30 },
        };

        let anchor = capture_anchor(&dom, &range).unwrap();

        assert_eq!(anchor.block_id, blocks[1].id);
        assert_eq!(anchor.original_text, "run the test");
        assert_eq!((anchor.start_offset, anchor.end_offset), (0, 12));
        assert_eq!(anchor.start_meta.unwrap().text_offset, 18);
    }

    #[test]
    fn cross_block_selection_anchors_at_zero() {
        let blocks = parse("First block\n\nSecond block");
        let dom = render_blocks(&blocks);
        let texts = dom.text_nodes(dom.root());
        let range = DomRange {
            start: DomPoint { node: texts[0], offset: 6 },
            end: DomPoint { node: texts[1], offset: 6 },
        };

        let anchor = capture_anchor(&dom, &range).unwrap();

        assert_eq!(anchor.block_id, blocks[0].id);
        assert_eq!(anchor.original_text, "blockSecond");
        assert_eq!(anchor.start_offset, 0);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let blocks = parse("Words");
        let dom = render_blocks(&blocks);
        let text = dom.text_nodes(dom.root())[0];
        let point = DomPoint { node: text, offset: 2 };

        assert_eq!(
            capture_anchor(&dom, &DomRange { start: point, end: point }),
            Err(AnchorError::EmptySelection)
        );
    }

    #[test]
    fn code_block_anchors_whole_body() {
        let blocks = parse("```sh\ncargo test\n```");
        let dom = render_blocks(&blocks);

        let anchor = capture_block(&dom, &blocks[0].id).unwrap();

        assert_eq!(anchor.original_text, "cargo test");
        assert_eq!((anchor.start_offset, anchor.end_offset), (0, 10));
    }

    #[test]
    fn unknown_block_is_an_error() {
        let dom = render_blocks(&parse("x"));
        assert_eq!(
            capture_block(&dom, "block-9"),
            Err(AnchorError::UnknownBlock("block-9".to_string()))
        );
    }
}
