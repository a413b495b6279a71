use tracing::{span, trace, warn, Level};

use crate::host::Host;
use crate::vdom::attrs::{classify, AttrKind};
use crate::vdom::{NodeValue, VNode};

/// Builds host nodes for a tree.
///
/// Leaves become text nodes. Elements get their static attributes set verbatim,
/// their event attributes registered as listeners, and their children
/// appended in order. Every call creates a fresh subtree; nothing is reused
/// from earlier calls. Host errors are returned as they are.
pub fn materialize<H: Host>(host: &mut H, node: &NodeValue) -> Result<H::Node, H::Error> {
    match node {
        NodeValue::Element(element) => materialize_element(host, element),
        leaf => {
            let text = leaf.leaf_text().unwrap_or_default();
            trace!(%text, "text node");
            Ok(host.create_text(&text))
        }
    }
}

/// [`materialize`] for a tree whose root is known to be an element
pub fn materialize_element<H: Host>(host: &mut H, node: &VNode) -> Result<H::Node, H::Error> {
    let span = span!(Level::TRACE, "Materializing", tag = node.tag());
    let _enter = span.enter();

    let element = host.create_element(node.tag())?;
    for (name, value) in node.attributes().iter() {
        match classify(name, value) {
            Ok(AttrKind::Event { event_type, handler }) => {
                trace!(event_type, "binding listener");
                host.add_event_listener(&element, event_type, handler.clone())?;
            }
            Ok(AttrKind::Static(value)) => host.set_attribute(&element, name, value)?,
            // construct() already rejected these
            Err(e) => warn!(%e, "skipping attribute"),
        }
    }
    for child in node.children() {
        let child = materialize(host, child)?;
        host.append_child(&element, child)?;
    }
    Ok(element)
}
