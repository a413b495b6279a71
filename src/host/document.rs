use thiserror::Error;
use tracing::trace;

use super::{Host, OuterHtml};
use crate::vdom::{Event, Handler};

/// Handle to a node owned by a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("`{0}` is not a valid name")]
    InvalidCharacter(String),

    #[error("no node with id {0:?} in this document")]
    NotFound(NodeId),

    #[error("{0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("cannot insert {child:?} under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("could not parse markup: {0}")]
    Parse(String),
}

#[derive(Debug)]
pub(super) enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug)]
pub(super) struct ElementData {
    pub tag_name: String,
    pub attributes: Vec<(String, String)>,
    pub listeners: Vec<(String, Handler)>,
    pub children: Vec<NodeId>,
}

#[derive(Debug)]
pub(super) struct DomNode {
    pub parent: Option<NodeId>,
    pub data: NodeData,
}

/// Arena-backed document. Nodes live as long as the document does; detaching
/// a node from its parent doesn't free it.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<DomNode>,
}

/// Characters that may not appear in an attribute name
pub(super) const NAME_STOP_CHARS: &str = " \t\r\n\x0c\"'>/=";

/// Characters that end a tag name started with an ASCII letter
pub(super) const TAG_STOP_CHARS: &str = " \t\r\n\x0c\0/>";

/// Element names as `createElement` takes them.
///
/// A name starting with an ASCII letter may continue with anything but
/// whitespace, NUL, `/` and `>`. Otherwise it must start with `:`, `_` or a
/// non-ASCII character and continue with ASCII alphanumerics, `-`, `.`, `:`,
/// `_` or non-ASCII characters.
pub(super) fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| !TAG_STOP_CHARS.contains(c)),
        Some(c) if c == ':' || c == '_' || !c.is_ascii() => {
            chars.all(|c| c.is_ascii_alphanumeric() || "-.:_".contains(c) || !c.is_ascii())
        }
        _ => false,
    }
}

pub(super) fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_control() || NAME_STOP_CHARS.contains(c))
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn node(&self, id: NodeId) -> Result<&DomNode, DomError> {
        self.nodes.get(id.0 as usize).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut DomNode, DomError> {
        self.nodes.get_mut(id.0 as usize).ok_or(DomError::NotFound(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(el) => Ok(el),
            NodeData::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(DomNode { parent: None, data });
        id
    }

    /// Creates a detached element. Names are case-insensitive and stored lower-cased.
    pub fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        if !is_valid_tag_name(tag) {
            return Err(DomError::InvalidCharacter(tag.to_string()));
        }
        let id = self.push(NodeData::Element(ElementData {
            tag_name: tag.to_ascii_lowercase(),
            attributes: vec![],
            listeners: vec![],
            children: vec![],
        }));
        trace!(?id, tag, "created element");
        Ok(id)
    }

    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.push(NodeData::Text(data.to_string()))
    }

    /// Sets an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        if !is_valid_attribute_name(name) {
            return Err(DomError::InvalidCharacter(name.to_string()));
        }
        let name = name.to_ascii_lowercase();
        let el = self.element_mut(element)?;
        match el.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name, value.to_string())),
        }
        Ok(())
    }

    pub fn add_event_listener(
        &mut self,
        element: NodeId,
        event_type: &str,
        handler: Handler,
    ) -> Result<(), DomError> {
        self.element_mut(element)?
            .listeners
            .push((event_type.to_string(), handler));
        Ok(())
    }

    /// Appends `child` as the last child of `parent`, moving it out of its current parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node(child)?;
        if !matches!(self.node(parent)?.data, NodeData::Element(_)) || self.is_inclusive_ancestor(child, parent)? {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(old_parent) = self.node(child)?.parent {
            self.element_mut(old_parent)?.children.retain(|c| *c != child);
        }
        self.element_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> Result<bool, DomError> {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.node(id)?.parent;
        }
        Ok(false)
    }

    /// Runs the listeners registered on `target` for `event_type`, in the order
    /// they were added. Returns how many ran. Events don't bubble.
    pub fn dispatch_event(&self, target: NodeId, event_type: &str) -> Result<usize, DomError> {
        let listeners: Vec<Handler> = match &self.node(target)?.data {
            NodeData::Element(el) => el
                .listeners
                .iter()
                .filter(|(t, _)| t == event_type)
                .map(|(_, h)| h.clone())
                .collect(),
            NodeData::Text(_) => vec![],
        };
        let event = Event::new(event_type);
        for handler in &listeners {
            handler.call(&event);
        }
        trace!(?target, event_type, count = listeners.len(), "dispatched event");
        Ok(listeners.len())
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).ok()?.data {
            NodeData::Element(el) => Some(&el.tag_name),
            NodeData::Text(_) => None,
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match self.node(node).map(|n| &n.data) {
            Ok(NodeData::Element(el)) => &el.attributes,
            _ => &[],
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.node(node).map(|n| &n.data) {
            Ok(NodeData::Element(el)) => &el.children,
            _ => &[],
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).ok()?.parent
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.node(node).map(|n| &n.data), Ok(NodeData::Text(_)))
    }

    /// Concatenated text of the node and all its descendants
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match self.node(node).map(|n| &n.data) {
            Ok(NodeData::Text(t)) => out.push_str(t),
            Ok(NodeData::Element(el)) => el.children.iter().for_each(|c| self.collect_text(*c, out)),
            Err(_) => {}
        }
    }

    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        match self.node(node).map(|n| &n.data) {
            Ok(NodeData::Element(el)) => el.listeners.iter().filter(|(t, _)| t == event_type).count(),
            _ => 0,
        }
    }
}

impl Host for Document {
    type Node = NodeId;
    type Error = DomError;

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        Document::create_element(self, tag)
    }

    fn create_text(&mut self, data: &str) -> NodeId {
        Document::create_text(self, data)
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        Document::set_attribute(self, *element, name, value)
    }

    fn add_event_listener(&mut self, element: &NodeId, event_type: &str, handler: Handler) -> Result<(), DomError> {
        Document::add_event_listener(self, *element, event_type, handler)
    }

    fn append_child(&mut self, parent: &NodeId, child: NodeId) -> Result<(), DomError> {
        Document::append_child(self, *parent, child)
    }
}

impl OuterHtml for Document {
    fn outer_html(&self, node: &NodeId) -> Result<String, DomError> {
        Document::outer_html(self, *node)
    }
}
