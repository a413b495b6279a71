use lazy_static::lazy_static;
use std::collections::HashSet;

use super::document::{DomError, NodeData};
use super::{Document, NodeId};

lazy_static! {
    /// Elements that never have an end tag
    pub(super) static ref VOID_ELEMENTS: HashSet<&'static str> = [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ]
    .into_iter()
    .collect();
    /// Elements whose text is written out unescaped
    static ref RAW_TEXT_ELEMENTS: HashSet<&'static str> =
        ["script", "style"].into_iter().collect();
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

impl Document {
    /// Serializes a node with its descendants, the way a browser's `outerHTML` does.
    /// Event listeners are not part of the markup.
    pub fn outer_html(&self, node: NodeId) -> Result<String, DomError> {
        let mut out = String::new();
        self.write_node(node, false, &mut out)?;
        Ok(out)
    }

    /// Serializes only the descendants of a node
    pub fn inner_html(&self, node: NodeId) -> Result<String, DomError> {
        let mut out = String::new();
        let raw = self
            .tag_name(node)
            .map(|t| RAW_TEXT_ELEMENTS.contains(t))
            .unwrap_or(false);
        for child in self.children(node) {
            self.write_node(*child, raw, &mut out)?;
        }
        Ok(out)
    }

    fn write_node(&self, node: NodeId, raw_text: bool, out: &mut String) -> Result<(), DomError> {
        match &self.node(node)?.data {
            NodeData::Text(text) if raw_text => out.push_str(text),
            NodeData::Text(text) => escape_text(text, out),
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(&el.tag_name);
                for (name, value) in &el.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(el.tag_name.as_str()) {
                    return Ok(());
                }
                let raw = RAW_TEXT_ELEMENTS.contains(el.tag_name.as_str());
                for child in &el.children {
                    self.write_node(*child, raw, out)?;
                }
                out.push_str("</");
                out.push_str(&el.tag_name);
                out.push('>');
            }
        }
        Ok(())
    }
}
