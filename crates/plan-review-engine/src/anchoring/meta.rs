//! Structural hints: "the Nth `<tag>` element, K characters in".

use crate::models::DomMeta;
use crate::render::{Dom, DomPoint, NodeId};

use super::surface::is_highlight_wrapper;

/// Describes `point` by its nearest non-highlight element ancestor.
///
/// Tag names are stored upper-case, the form browsers report and that
/// persisted annotations from other clients carry.
pub fn capture_meta(dom: &Dom, point: DomPoint) -> Option<DomMeta> {
    let parent = dom.closest(point.node, |d, n| {
        d.tag(n).is_some() && !is_highlight_wrapper(d, n)
    })?;
    let tag = dom.tag(parent)?;
    let parent_index = dom.elements_by_tag(tag).iter().position(|&n| n == parent)?;

    let mut text_offset = 0;
    for node in dom.text_nodes(parent) {
        if node == point.node {
            return Some(DomMeta {
                parent_tag_name: tag.to_ascii_uppercase(),
                parent_index,
                text_offset: text_offset + point.offset,
            });
        }
        text_offset += dom.text_len(node);
    }
    None
}

/// Finds the text position a hint describes in the current tree.
///
/// A position on the boundary between two text nodes resolves to the end of
/// the earlier one.
pub fn resolve_meta(dom: &Dom, meta: &DomMeta) -> Option<DomPoint> {
    let parent: NodeId = *dom
        .elements_by_tag(&meta.parent_tag_name)
        .get(meta.parent_index)?;

    let mut remaining = meta.text_offset;
    for node in dom.text_nodes(parent) {
        let len = dom.text_len(node);
        if remaining <= len {
            return Some(DomPoint {
                node,
                offset: remaining,
            });
        }
        remaining -= len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use crate::render::{block_element, render_blocks};
    use pretty_assertions::assert_eq;

    #[test]
    fn captures_offset_within_parent_text() {
        let blocks = parse("First para\n\nSecond *para* here");
        let dom = render_blocks(&blocks);
        let p = block_element(&dom, &blocks[1].id).unwrap();
        let last_text = *dom.text_nodes(p).last().unwrap();

        let meta = capture_meta(&dom, DomPoint { node: last_text, offset: 1 }).unwrap();

        assert_eq!(
            meta,
            DomMeta {
                parent_tag_name: "P".to_string(),
                parent_index: 1,
                text_offset: "Second para".chars().count() + 1,
            }
        );
    }

    #[test]
    fn resolve_inverts_capture() {
        let blocks = parse("Alpha\n\nBeta gamma");
        let dom = render_blocks(&blocks);
        let p = block_element(&dom, &blocks[1].id).unwrap();
        let text = dom.text_nodes(p)[0];
        let point = DomPoint { node: text, offset: 5 };

        let meta = capture_meta(&dom, point).unwrap();
        assert_eq!(resolve_meta(&dom, &meta), Some(point));
    }

    #[test]
    fn resolve_rejects_missing_parent() {
        let dom = render_blocks(&parse("Only one"));
        let meta = DomMeta {
            parent_tag_name: "P".to_string(),
            parent_index: 3,
            text_offset: 0,
        };
        assert_eq!(resolve_meta(&dom, &meta), None);
    }
}
