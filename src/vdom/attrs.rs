use super::{AttrValue, Handler};
use crate::Error;

/// Attribute names starting with this are bound as event listeners
pub const EVENT_PREFIX: &str = "on";

/// How the materializer applies one attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttrKind<'a> {
    Event { event_type: &'a str, handler: &'a Handler },
    Static(&'a str),
}

pub fn is_event_attribute(name: &str) -> bool {
    name.starts_with(EVENT_PREFIX)
}

/// The event an attribute listens for, `"onclick"` -> `"click"`.
///
/// A bare `"on"` listens for the empty event type.
pub fn event_type(name: &str) -> Option<&str> {
    name.strip_prefix(EVENT_PREFIX)
}

/// Routes an attribute by its name, failing if the value doesn't fit the name
pub fn classify<'a>(name: &'a str, value: &'a AttrValue) -> Result<AttrKind<'a>, Error> {
    match (event_type(name), value) {
        (Some(event_type), AttrValue::Handler(handler)) => Ok(AttrKind::Event { event_type, handler }),
        (None, AttrValue::Static(value)) => Ok(AttrKind::Static(value)),
        (Some(_), AttrValue::Static(_)) => Err(Error::NonCallableEventAttribute {
            name: name.to_string(),
        }),
        (None, AttrValue::Handler(_)) => Err(Error::HandlerOnStaticAttribute {
            name: name.to_string(),
        }),
    }
}
