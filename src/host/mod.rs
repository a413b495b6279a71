//! The document a tree is materialized into.
//!
//! [`Host`] is the set of node-creation primitives the materializer needs;
//! [`Document`] is an in-memory implementation of it.

use crate::vdom::Handler;

mod document;
mod parsing;
mod serialize;

pub use document::{Document, DomError, NodeId};

/// Node-creation primitives of a display host
pub trait Host {
    type Node;
    type Error;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

    fn create_text(&mut self, data: &str) -> Self::Node;

    fn set_attribute(&mut self, element: &Self::Node, name: &str, value: &str) -> Result<(), Self::Error>;

    fn add_event_listener(
        &mut self,
        element: &Self::Node,
        event_type: &str,
        handler: Handler,
    ) -> Result<(), Self::Error>;

    fn append_child(&mut self, parent: &Self::Node, child: Self::Node) -> Result<(), Self::Error>;
}

/// Hosts that can print a node and its descendants as markup
pub trait OuterHtml: Host {
    fn outer_html(&self, node: &Self::Node) -> Result<String, Self::Error>;
}
