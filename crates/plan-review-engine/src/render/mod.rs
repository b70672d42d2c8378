//! Rendering of parsed blocks into a document tree that highlights attach to.
//!
//! Each block becomes one element under an `<article>` root and carries its id
//! in `data-block-id`. The text content of that element is the "rendered
//! text" annotation offsets are measured against.

pub mod dom;
pub mod html;
pub mod inline;

pub use dom::{Dom, DomPoint, DomRange, NodeData, NodeId};
pub use html::to_html;
pub use inline::render_inline;

use crate::parsing::blocks::{Block, BlockKind, parse_table};

pub const ROOT_TAG: &str = "article";
pub const BLOCK_ID_ATTR: &str = "data-block-id";

/// Builds the document tree for a parsed plan.
pub fn render_blocks(blocks: &[Block]) -> Dom {
    let mut dom = Dom::new(ROOT_TAG);
    let root = dom.root();
    for block in blocks {
        let el = render_block(&mut dom, block);
        dom.set_attr(el, BLOCK_ID_ATTR, &block.id);
        dom.append_child(root, el);
    }
    dom
}

fn render_block(dom: &mut Dom, block: &Block) -> NodeId {
    match block.kind {
        BlockKind::Heading => {
            let level = block.level.unwrap_or(1).clamp(1, 6);
            let el = dom.create_element(&format!("h{level}"));
            render_inline(dom, el, &block.content);
            el
        }
        BlockKind::Paragraph => inline_element(dom, "p", &block.content),
        BlockKind::Blockquote => inline_element(dom, "blockquote", &block.content),
        BlockKind::ListItem => {
            let el = inline_element(dom, "li", &block.content);
            dom.set_attr(el, "data-level", &block.level.unwrap_or(0).to_string());
            if let Some(checked) = block.checked {
                dom.set_attr(el, "data-checked", &checked.to_string());
            }
            el
        }
        BlockKind::Code => {
            let pre = dom.create_element("pre");
            let code = dom.create_element("code");
            if let Some(lang) = &block.language {
                dom.set_attr(code, "data-language", lang);
            }
            dom.append_child(pre, code);
            dom.append_text(code, &block.content);
            pre
        }
        BlockKind::Hr => dom.create_element("hr"),
        BlockKind::Table => render_table(dom, &block.content),
    }
}

fn inline_element(dom: &mut Dom, tag: &str, source: &str) -> NodeId {
    let el = dom.create_element(tag);
    render_inline(dom, el, source);
    el
}

fn render_table(dom: &mut Dom, content: &str) -> NodeId {
    let table = parse_table(content);
    let el = dom.create_element("table");

    let thead = dom.create_element("thead");
    dom.append_child(el, thead);
    let head_row = dom.create_element("tr");
    dom.append_child(thead, head_row);
    for cell in &table.headers {
        let th = inline_element(dom, "th", cell);
        dom.append_child(head_row, th);
    }

    let tbody = dom.create_element("tbody");
    dom.append_child(el, tbody);
    for row in &table.rows {
        let tr = dom.create_element("tr");
        dom.append_child(tbody, tr);
        for cell in row {
            let td = inline_element(dom, "td", cell);
            dom.append_child(tr, td);
        }
    }
    el
}

/// The rendered element for a block id.
pub fn block_element(dom: &Dom, block_id: &str) -> Option<NodeId> {
    dom.elements_with_attr(BLOCK_ID_ATTR, block_id)
        .into_iter()
        .next()
}

/// Id of the block that contains `node`.
pub fn enclosing_block_id(dom: &Dom, node: NodeId) -> Option<String> {
    let el = dom.closest(node, |d, n| d.attr(n, BLOCK_ID_ATTR).is_some())?;
    dom.attr(el, BLOCK_ID_ATTR).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_one_element_per_block() {
        let blocks = parse("# Plan\n\nDo **this**.\n\n- [x] done\n\n```rs\nfn a() {}\n```\n\n---");
        let dom = render_blocks(&blocks);

        let tags: Vec<_> = dom
            .children(dom.root())
            .iter()
            .map(|&n| dom.tag(n).unwrap_or_default().to_string())
            .collect();
        assert_eq!(tags, vec!["h1", "p", "li", "pre", "hr"]);

        let p = block_element(&dom, &blocks[1].id).unwrap();
        assert_eq!(dom.text_content(p), "Do this.");
        let li = block_element(&dom, &blocks[2].id).unwrap();
        assert_eq!(dom.attr(li, "data-checked"), Some("true"));
    }

    #[test]
    fn code_is_not_parsed_as_markdown() {
        let blocks = parse("```\nlet x = **y**;\n```");
        let dom = render_blocks(&blocks);
        let pre = block_element(&dom, &blocks[0].id).unwrap();

        assert_eq!(dom.text_content(pre), "let x = **y**;");
    }

    #[test]
    fn tables_render_cells() {
        let blocks = parse("| a | b |\n|---|---|\n| 1 | 2 |");
        let dom = render_blocks(&blocks);

        assert_eq!(dom.elements_by_tag("th").len(), 2);
        assert_eq!(dom.elements_by_tag("td").len(), 2);
    }

    #[test]
    fn enclosing_block_walks_up_from_text() {
        let blocks = parse("Some *nested* text");
        let dom = render_blocks(&blocks);
        let em = dom.elements_by_tag("em")[0];
        let text = dom.children(em)[0];

        assert_eq!(enclosing_block_id(&dom, text), Some(blocks[0].id.clone()));
    }

    #[test]
    fn html_carries_block_ids() {
        let blocks = parse("Hello");
        let html = to_html(&render_blocks(&blocks));
        assert_eq!(html, "<article><p data-block-id=\"block-0\">Hello</p></article>");
    }
}
