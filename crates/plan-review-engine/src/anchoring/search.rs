use crate::render::{Dom, DomPoint, DomRange, NodeId};

#[derive(Debug, Clone, Copy)]
struct Segment {
    node: NodeId,
    start: usize,
    len: usize,
}

/// Concatenated text of a subtree with a map from character offsets back to
/// the text nodes they came from.
#[derive(Debug, Clone)]
pub struct TextIndex {
    text: String,
    segments: Vec<Segment>,
}

impl TextIndex {
    pub fn build(dom: &Dom, container: NodeId) -> Self {
        let mut text = String::new();
        let mut segments = vec![];
        let mut start = 0;
        for node in dom.text_nodes(container) {
            let t = dom.text(node).unwrap_or_default();
            let len = t.chars().count();
            text.push_str(t);
            segments.push(Segment { node, start, len });
            start += len;
        }
        Self { text, segments }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Range of the first occurrence of `needle`, if any.
    pub fn find(&self, needle: &str) -> Option<DomRange> {
        if needle.is_empty() {
            return None;
        }
        let byte = self.text.find(needle)?;
        let start = self.text[..byte].chars().count();
        let end = start + needle.chars().count();
        Some(DomRange {
            start: self.point_at(start, false)?,
            end: self.point_at(end, true)?,
        })
    }

    /// Maps an absolute character offset to a node position. A start point on
    /// a node boundary goes to the following node, an end point to the
    /// preceding one, so neither end selects an empty slice.
    fn point_at(&self, offset: usize, is_end: bool) -> Option<DomPoint> {
        self.segments
            .iter()
            .find(|s| {
                if is_end {
                    offset > s.start && offset <= s.start + s.len
                } else {
                    offset >= s.start && offset < s.start + s.len
                }
            })
            .map(|s| DomPoint {
                node: s.node,
                offset: offset - s.start,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use crate::render::render_blocks;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_text_spanning_nodes() {
        let dom = render_blocks(&parse("Use the **fast** path here"));
        let index = TextIndex::build(&dom, dom.root());

        let range = index.find("fast path").unwrap();

        assert_eq!(dom.range_text(&range).as_deref(), Some("fast path"));
        assert_ne!(range.start.node, range.end.node);
    }

    #[test]
    fn boundary_points_avoid_empty_slices() {
        let dom = render_blocks(&parse("ab **cd** ef"));
        let index = TextIndex::build(&dom, dom.root());

        let range = index.find("cd").unwrap();

        assert_eq!(range.start.offset, 0);
        assert_eq!(range.start.node, range.end.node);
        assert_eq!(range.end.offset, 2);
    }

    #[test]
    fn missing_or_empty_needle() {
        let dom = render_blocks(&parse("hello"));
        let index = TextIndex::build(&dom, dom.root());

        assert_eq!(index.find("absent"), None);
        assert_eq!(index.find(""), None);
    }

    #[test]
    fn offsets_count_characters() {
        let dom = render_blocks(&parse("naïve café"));
        let index = TextIndex::build(&dom, dom.root());
        let range = index.find("café").unwrap();

        assert_eq!(range.start.offset, 6);
        assert_eq!(range.end.offset, 10);
    }
}
