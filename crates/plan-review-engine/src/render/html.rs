use super::dom::{Dom, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &["br", "hr"];

/// Serializes the tree under the root as HTML.
pub fn to_html(dom: &Dom) -> String {
    let mut out = String::new();
    write_node(dom, dom.root(), &mut out);
    out
}

fn write_node(dom: &Dom, node: NodeId, out: &mut String) {
    match dom.data(node) {
        NodeData::Text(text) => {
            html_escape::encode_text_to_string(text, out);
        }
        NodeData::Element {
            tag,
            attrs,
            classes,
        } => {
            out.push('<');
            out.push_str(tag);
            if !classes.is_empty() {
                out.push_str(" class=\"");
                html_escape::encode_double_quoted_attribute_to_string(classes.join(" "), out);
                out.push('"');
            }
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                html_escape::encode_double_quoted_attribute_to_string(value, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            for &child in dom.children(node) {
                write_node(dom, child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
