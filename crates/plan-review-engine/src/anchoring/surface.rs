//! Visual highlights layered over the rendered document.

use crate::models::{AnnotationType, DomMeta};
use crate::render::{Dom, DomRange, NodeId, block_element};

use super::capture::{Anchor, capture_anchor};
use super::meta::resolve_meta;
use super::search::TextIndex;
use super::AnchorError;

pub const HIGHLIGHT_TAG: &str = "mark";
pub const HIGHLIGHT_CLASS: &str = "annotation-highlight";
pub const BIND_ID_ATTR: &str = "data-bind-id";

const KIND_CLASSES: [AnnotationType; 4] = [
    AnnotationType::Deletion,
    AnnotationType::Insertion,
    AnnotationType::Replacement,
    AnnotationType::Comment,
];

/// Something that can show highlighted spans and locate them again.
///
/// Highlights are keyed by annotation id; one id may own several wrappers when
/// its range crosses element boundaries. Every successful wrap records a
/// created event that the owner drains.
pub trait HighlightSurface {
    type Range;

    fn has_highlight(&self, id: &str) -> bool;

    /// Sets the kind class on every wrapper of `id`, replacing any previous one.
    fn apply_kind(&mut self, id: &str, kind: AnnotationType);

    fn capture(&self, range: &Self::Range) -> Result<Anchor, AnchorError>;

    fn wrap_range(&mut self, id: &str, range: &Self::Range) -> Result<(), AnchorError>;

    /// Rebuilds a range from structural hints and wraps it, but only if the
    /// text it covers is still `expected`.
    fn wrap_from_meta(&mut self, id: &str, start: &DomMeta, end: &DomMeta, expected: &str) -> bool;

    fn wrap_first_occurrence(&mut self, id: &str, text: &str) -> bool;

    /// Unwraps every wrapper of `id`. Returns false if there were none.
    fn remove_highlight(&mut self, id: &str) -> bool;

    fn drain_created(&mut self) -> Vec<String>;

    /// A range covering the whole rendered text of a block.
    fn block_range(&self, block_id: &str) -> Option<Self::Range>;
}

/// True for the `<mark>` elements this module inserts.
pub fn is_highlight_wrapper(dom: &Dom, node: NodeId) -> bool {
    dom.tag(node) == Some(HIGHLIGHT_TAG) && dom.has_class(node, HIGHLIGHT_CLASS)
}

/// A rendered plan that highlights can be drawn on.
#[derive(Debug, Clone)]
pub struct DomSurface {
    dom: Dom,
    created: Vec<String>,
}

impl DomSurface {
    pub fn new(dom: Dom) -> Self {
        Self {
            dom,
            created: vec![],
        }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn into_dom(self) -> Dom {
        self.dom
    }

    fn wrappers(&self, id: &str) -> Vec<NodeId> {
        self.dom
            .elements_with_attr(BIND_ID_ATTR, id)
            .into_iter()
            .filter(|&n| is_highlight_wrapper(&self.dom, n))
            .collect()
    }

    fn wrap(&mut self, id: &str, range: &DomRange) -> Result<(), AnchorError> {
        if self.has_highlight(id) {
            return Err(AnchorError::DuplicateHighlight(id.to_string()));
        }
        let wrappers = self.dom.wrap_range(range, |dom| {
            let mark = dom.create_element(HIGHLIGHT_TAG);
            dom.add_class(mark, HIGHLIGHT_CLASS);
            dom.set_attr(mark, BIND_ID_ATTR, id);
            mark
        });
        if wrappers.is_empty() {
            return Err(AnchorError::EmptySelection);
        }
        self.created.push(id.to_string());
        Ok(())
    }
}

impl HighlightSurface for DomSurface {
    type Range = DomRange;

    fn has_highlight(&self, id: &str) -> bool {
        !self.wrappers(id).is_empty()
    }

    fn apply_kind(&mut self, id: &str, kind: AnnotationType) {
        for node in self.wrappers(id) {
            for other in KIND_CLASSES {
                if let Some(class) = other.highlight_class() {
                    self.dom.remove_class(node, class);
                }
            }
            if let Some(class) = kind.highlight_class() {
                self.dom.add_class(node, class);
            }
        }
    }

    fn capture(&self, range: &DomRange) -> Result<Anchor, AnchorError> {
        capture_anchor(&self.dom, range)
    }

    fn wrap_range(&mut self, id: &str, range: &DomRange) -> Result<(), AnchorError> {
        self.wrap(id, range)
    }

    fn wrap_from_meta(&mut self, id: &str, start: &DomMeta, end: &DomMeta, expected: &str) -> bool {
        let (Some(start), Some(end)) = (resolve_meta(&self.dom, start), resolve_meta(&self.dom, end))
        else {
            return false;
        };
        let range = DomRange { start, end };
        if self.dom.range_text(&range).as_deref() != Some(expected) {
            log::debug!("structural hint for {id} no longer covers its text");
            return false;
        }
        self.wrap(id, &range).is_ok()
    }

    fn wrap_first_occurrence(&mut self, id: &str, text: &str) -> bool {
        let index = TextIndex::build(&self.dom, self.dom.root());
        match index.find(text) {
            Some(range) => self.wrap(id, &range).is_ok(),
            None => false,
        }
    }

    fn remove_highlight(&mut self, id: &str) -> bool {
        let wrappers = self.wrappers(id);
        for &node in &wrappers {
            self.dom.unwrap(node);
        }
        !wrappers.is_empty()
    }

    fn drain_created(&mut self) -> Vec<String> {
        std::mem::take(&mut self.created)
    }

    fn block_range(&self, block_id: &str) -> Option<DomRange> {
        let block = block_element(&self.dom, block_id)?;
        self.dom.range_over(block)
    }
}
