//! Inline markdown (emphasis, strong, code spans, links) rendered into the DOM.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::dom::{Dom, NodeId};

/// Renders the inline markup of `source` as children of `parent`.
///
/// Block-level structure that pulldown-cmark infers (paragraphs, stray list or
/// heading syntax) is flattened: only its text survives, so the element's text
/// content reads the way the block does on screen.
pub fn render_inline(dom: &mut Dom, parent: NodeId, source: &str) {
    let mut stack = vec![parent];
    let options = Options::ENABLE_STRIKETHROUGH;

    for event in Parser::new_ext(source, options) {
        let top = stack.last().copied().unwrap_or(parent);
        match event {
            Event::Start(tag) => {
                if let Some(el) = inline_element(dom, &tag) {
                    dom.append_child(top, el);
                    stack.push(el);
                }
            }
            Event::End(end) => {
                if is_inline_end(end) && stack.len() > 1 {
                    stack.pop();
                }
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                dom.append_text(top, &text);
            }
            Event::Code(code) => {
                let el = dom.create_element("code");
                dom.append_child(top, el);
                dom.append_text(el, &code);
            }
            Event::SoftBreak => dom.append_text(top, "\n"),
            Event::HardBreak => {
                let br = dom.create_element("br");
                dom.append_child(top, br);
            }
            Event::TaskListMarker(checked) => {
                dom.append_text(top, if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }
}

fn inline_element(dom: &mut Dom, tag: &Tag) -> Option<NodeId> {
    let el = match tag {
        Tag::Emphasis => dom.create_element("em"),
        Tag::Strong => dom.create_element("strong"),
        Tag::Strikethrough => dom.create_element("del"),
        Tag::Link { dest_url, .. } => {
            let a = dom.create_element("a");
            dom.set_attr(a, "href", dest_url);
            a
        }
        _ => return None,
    };
    Some(el)
}

fn is_inline_end(end: TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link
    )
}
