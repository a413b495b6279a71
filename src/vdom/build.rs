use super::attrs::classify;
use super::{Attributes, NodeValue, VNode};
use crate::Error;

/// Builds an element from a tag, its attributes and its children.
///
/// The tag must be non-empty; whether the host accepts it is only known once the
/// tree is materialized. Every attribute has to fit its name: event-shaped
/// names (see [`super::attrs::is_event_attribute`]) take a handler, all others a
/// static string. Children are kept exactly as given.
pub fn construct(
    tag: impl Into<String>,
    attributes: Attributes,
    children: Vec<NodeValue>,
) -> Result<VNode, Error> {
    let tag = tag.into();
    if tag.is_empty() {
        return Err(Error::EmptyTag);
    }
    for (name, value) in attributes.iter() {
        classify(name, value)?;
    }
    Ok(VNode {
        tag,
        attributes,
        children,
    })
}

/// Short name for [`construct`]
pub fn h(
    tag: impl Into<String>,
    attributes: Attributes,
    children: Vec<NodeValue>,
) -> Result<VNode, Error> {
    construct(tag, attributes, children)
}

/// Backs the [`h!`](crate::h) macro: the first failing attribute set or child wins
pub fn build(
    tag: impl Into<String>,
    attributes: impl IntoAttributes,
    children: Vec<Result<NodeValue, Error>>,
) -> Result<VNode, Error> {
    let attributes = attributes.into_attributes()?;
    let children = children.into_iter().collect::<Result<Vec<_>, _>>()?;
    construct(tag, attributes, children)
}

/// Anything usable as the attribute argument of [`h!`](crate::h)
pub trait IntoAttributes {
    fn into_attributes(self) -> Result<Attributes, Error>;
}

impl IntoAttributes for Attributes {
    fn into_attributes(self) -> Result<Attributes, Error> {
        Ok(self)
    }
}

impl IntoAttributes for Result<Attributes, Error> {
    fn into_attributes(self) -> Result<Attributes, Error> {
        self
    }
}

/// Anything usable as a child argument of [`h!`](crate::h)
pub trait IntoChild {
    fn into_child(self) -> Result<NodeValue, Error>;
}

impl IntoChild for Result<VNode, Error> {
    fn into_child(self) -> Result<NodeValue, Error> {
        self.map(NodeValue::Element)
    }
}

macro_rules! infallible_child {
    ($($t:ty),*) => {
        $(impl IntoChild for $t {
            fn into_child(self) -> Result<NodeValue, Error> {
                Ok(NodeValue::from(self))
            }
        })*
    };
}

infallible_child!(VNode, &str, String, i32, i64, u32, u64, usize, f32, f64);

impl IntoChild for NodeValue {
    fn into_child(self) -> Result<NodeValue, Error> {
        Ok(self)
    }
}
