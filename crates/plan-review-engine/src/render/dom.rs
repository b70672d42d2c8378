//! Arena-backed document tree for rendered plans.
//!
//! Nodes are never freed; detaching a node only unlinks it from its parent, so
//! `NodeId`s stay valid for the life of the `Dom`. All text offsets are in
//! characters, not bytes.

use std::collections::BTreeMap;

/// Index of a node in a [`Dom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        classes: Vec<String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// A position inside a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomPoint {
    pub node: NodeId,
    pub offset: usize,
}

/// A selection between two text positions, start before end in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomRange {
    pub start: DomPoint,
    pub end: DomPoint,
}

#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Dom {
    pub fn new(root_tag: &str) -> Self {
        let mut dom = Self {
            nodes: vec![],
            root: NodeId(0),
        };
        dom.root = dom.create_element(root_tag);
        dom
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            classes: vec![],
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(text.to_string()))
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: vec![],
            data,
        });
        id
    }

    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0].data
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Text(t) => Some(t),
            NodeData::Element { .. } => None,
        }
    }

    pub fn text_len(&self, node: NodeId) -> usize {
        self.text(node).map_or(0, |t| t.chars().count())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].data {
            NodeData::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.nodes[node.0].data {
            attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        match &self.nodes[node.0].data {
            NodeData::Element { classes, .. } => classes.iter().any(|c| c == class),
            NodeData::Text(_) => false,
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let NodeData::Element { classes, .. } = &mut self.nodes[node.0].data
            && !classes.iter().any(|c| c == class)
        {
            classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let NodeData::Element { classes, .. } = &mut self.nodes[node.0].data {
            classes.retain(|c| c != class);
        }
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        match &self.nodes[node.0].data {
            NodeData::Element { classes, .. } => classes,
            NodeData::Text(_) => &[],
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Appends text to `parent`, extending a trailing text node if there is one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(&last) = self.nodes[parent.0].children.last()
            && let NodeData::Text(t) = &mut self.nodes[last.0].data
        {
            t.push_str(text);
            return;
        }
        let node = self.create_text(text);
        self.append_child(parent, node);
    }

    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        let children = &mut self.nodes[parent.0].children;
        children.insert(index.min(children.len()), child);
    }

    /// Unlinks `node` from its parent. The subtree stays intact.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    /// Pre-order descendants of `node`, excluding `node` itself.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = vec![];
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Text nodes under `node` in document order.
    pub fn text_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|&n| self.text(n).is_some())
            .collect()
    }

    /// Concatenated text of every text node under `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(t) = self.text(node) {
            return t.to_string();
        }
        self.text_nodes(node)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Elements under the root whose tag matches case-insensitively, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|&n| self.tag(n).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
            .collect()
    }

    /// Attached elements under the root carrying `name="value"`.
    pub fn elements_with_attr(&self, name: &str, value: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&n| self.attr(n, name) == Some(value))
            .collect()
    }

    /// The nearest ancestor-or-self matching `pred`.
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Dom, NodeId) -> bool) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if pred(self, n) {
                return Some(n);
            }
            cur = self.parent(n);
        }
        None
    }

    /// Splits a text node at a character offset.
    ///
    /// `node` keeps `[0, offset)`; the returned new sibling holds the rest and
    /// is inserted right after it. Returns `None` when the offset is not
    /// strictly inside the text.
    pub fn split_text(&mut self, node: NodeId, offset: usize) -> Option<NodeId> {
        let text = self.text(node)?;
        let len = text.chars().count();
        if offset == 0 || offset >= len {
            return None;
        }
        let cut = byte_index(text, offset);
        let tail = text[cut..].to_string();
        if let NodeData::Text(t) = &mut self.nodes[node.0].data {
            t.truncate(cut);
        }

        let new = self.create_text(&tail);
        if let (Some(parent), Some(idx)) = (self.parent(node), self.index_in_parent(node)) {
            self.insert_child(parent, idx + 1, new);
        }
        Some(new)
    }

    /// Replaces `node` with its children.
    ///
    /// Text nodes are left split where the wrapper was, so points taken
    /// before the unwrap still address the same characters. Call
    /// [`Dom::normalize`] to merge them.
    pub fn unwrap(&mut self, node: NodeId) {
        let (Some(parent), Some(idx)) = (self.parent(node), self.index_in_parent(node)) else {
            return;
        };
        let children = self.nodes[node.0].children.clone();
        self.detach(node);
        for (i, child) in children.into_iter().enumerate() {
            self.insert_child(parent, idx + i, child);
        }
    }

    /// Merges adjacent text children of `node` and drops empty ones.
    pub fn normalize(&mut self, node: NodeId) {
        let children = self.nodes[node.0].children.clone();
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());
        for child in children {
            let Some(text) = self.text(child).map(str::to_string) else {
                kept.push(child);
                continue;
            };
            match kept.last().copied() {
                Some(prev) if self.text(prev).is_some() => {
                    if let NodeData::Text(t) = &mut self.nodes[prev.0].data {
                        t.push_str(&text);
                    }
                    self.nodes[child.0].parent = None;
                }
                _ if text.is_empty() => self.nodes[child.0].parent = None,
                _ => kept.push(child),
            }
        }
        self.nodes[node.0].children = kept;
    }

    /// The characters covered by `range`, or `None` if its ends are out of order.
    pub fn range_text(&self, range: &DomRange) -> Option<String> {
        let texts = self.text_nodes(self.root);
        let si = texts.iter().position(|&n| n == range.start.node)?;
        let ei = texts.iter().position(|&n| n == range.end.node)?;
        if si > ei || (si == ei && range.start.offset > range.end.offset) {
            return None;
        }

        let mut out = String::new();
        for (i, &n) in texts.iter().enumerate().take(ei + 1).skip(si) {
            let t = self.text(n).unwrap_or_default();
            let from = if i == si { range.start.offset } else { 0 };
            let to = if i == ei {
                range.end.offset
            } else {
                t.chars().count()
            };
            out.extend(t.chars().skip(from).take(to.saturating_sub(from)));
        }
        Some(out)
    }

    /// A range spanning all text under `node`.
    pub fn range_over(&self, node: NodeId) -> Option<DomRange> {
        let texts = self.text_nodes(node);
        let first = *texts.first()?;
        let last = *texts.last()?;
        Some(DomRange {
            start: DomPoint {
                node: first,
                offset: 0,
            },
            end: DomPoint {
                node: last,
                offset: self.text_len(last),
            },
        })
    }

    /// Wraps every text segment inside `range` in a fresh element built by `make`.
    ///
    /// Text nodes cut by the range ends are split first. Returns the wrappers in
    /// document order; empty if the range selects no characters.
    pub fn wrap_range(
        &mut self,
        range: &DomRange,
        mut make: impl FnMut(&mut Dom) -> NodeId,
    ) -> Vec<NodeId> {
        let texts = self.text_nodes(self.root);
        let (Some(si), Some(ei)) = (
            texts.iter().position(|&n| n == range.start.node),
            texts.iter().position(|&n| n == range.end.node),
        ) else {
            return vec![];
        };
        if si > ei || (si == ei && range.start.offset >= range.end.offset) {
            return vec![];
        }

        // The end is split first so the start offset stays valid when both
        // ends sit in the same node.
        self.split_text(range.end.node, range.end.offset);
        let first = if range.start.offset == 0 {
            Some(range.start.node)
        } else {
            self.split_text(range.start.node, range.start.offset)
        };

        let mut selected: Vec<NodeId> = first.into_iter().collect();
        if si != ei {
            selected.extend_from_slice(&texts[si + 1..ei]);
            if range.end.offset > 0 {
                selected.push(range.end.node);
            }
        }

        let mut wrappers = vec![];
        for node in selected {
            if self.text_len(node) == 0 {
                continue;
            }
            let (Some(parent), Some(idx)) = (self.parent(node), self.index_in_parent(node)) else {
                continue;
            };
            let wrapper = make(self);
            self.insert_child(parent, idx, wrapper);
            self.append_child(wrapper, node);
            wrappers.push(wrapper);
        }
        wrappers
    }
}

/// Byte index of the `offset`-th character, clamped to the string length.
pub(crate) fn byte_index(s: &str, offset: usize) -> usize {
    s.char_indices().nth(offset).map_or(s.len(), |(b, _)| b)
}
