use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

use crate::Error;

/// Telling event bindings apart from static attributes
pub mod attrs;
mod build;

pub use build::{build, construct, h, IntoAttributes, IntoChild};

/// A child of a [`VNode`]: either another element or a text leaf
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Element(VNode),
    Text(String),
    Number(Number),
}

impl NodeValue {
    /// The text a leaf renders as, or `None` for elements
    pub fn leaf_text(&self) -> Option<String> {
        match self {
            NodeValue::Element(_) => None,
            NodeValue::Text(s) => Some(s.clone()),
            NodeValue::Number(n) => Some(n.to_string()),
        }
    }

    pub fn as_element(&self) -> Option<&VNode> {
        match self {
            NodeValue::Element(node) => Some(node),
            _ => None,
        }
    }
}

impl From<VNode> for NodeValue {
    fn from(node: VNode) -> Self {
        NodeValue::Element(node)
    }
}

impl From<&str> for NodeValue {
    fn from(s: &str) -> Self {
        NodeValue::Text(s.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(s: String) -> Self {
        NodeValue::Text(s)
    }
}

/// A numeric leaf. Integers stay exact; floats keep the width they were given in.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
}

impl Number {
    fn as_i128(self) -> Option<i128> {
        match self {
            Number::Int(n) => Some(n as i128),
            Number::Uint(n) => Some(n as i128),
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Uint(n) => n as f64,
            Number::F32(n) => n as f64,
            Number::F64(n) => n,
        }
    }
}

/// Numbers compare by value across variants; `NaN` never equals anything
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

/// Prints the way a script engine prints a number as text content
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Uint(n) => write!(f, "{}", n),
            Number::F32(n) => write_float(f, n.is_nan(), n.is_infinite(), n as f64, || {
                (n.to_string(), format!("{:e}", n))
            }),
            Number::F64(n) => write_float(f, n.is_nan(), n.is_infinite(), n, || {
                (n.to_string(), format!("{:e}", n))
            }),
        }
    }
}

/// `forms` yields the positional and the exponent form in the float's own precision
fn write_float(
    f: &mut fmt::Formatter<'_>,
    nan: bool,
    infinite: bool,
    value: f64,
    forms: impl FnOnce() -> (String, String),
) -> fmt::Result {
    if nan {
        return f.write_str("NaN");
    }
    if infinite {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        // -0 prints as 0
        return f.write_str("0");
    }
    let (positional, exponent) = forms();
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.write_str(&positional);
    }
    // 1.5e21 -> 1.5e+21
    match exponent.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{}e+{}", mantissa, exp),
        _ => f.write_str(&exponent),
    }
}

macro_rules! number_leaf {
    ($($t:ty => $variant:ident as $into:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                Number::$variant(n as $into)
            }
        }

        impl From<$t> for NodeValue {
            fn from(n: $t) -> Self {
                NodeValue::Number(Number::from(n))
            }
        })*
    };
}

number_leaf!(
    i32 => Int as i64,
    i64 => Int as i64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    usize => Uint as u64,
    f32 => F32 as f32,
    f64 => F64 as f64
);

impl From<Number> for NodeValue {
    fn from(n: Number) -> Self {
        NodeValue::Number(n)
    }
}

/// Payload handed to a [`Handler`] when the host fires an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_type: String,
}

impl Event {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }
}

/// A shared event callback. Two handlers are equal only if they are the same callback.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event)>);

impl Handler {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Static(String),
    Handler(Handler),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Static(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Static(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        AttrValue::Static(s.clone())
    }
}

impl From<Handler> for AttrValue {
    fn from(handler: Handler) -> Self {
        AttrValue::Handler(handler)
    }
}

impl From<&Handler> for AttrValue {
    fn from(handler: &Handler) -> Self {
        AttrValue::Handler(handler.clone())
    }
}

/// Attribute mapping of an element. Keeps insertion order; compares as a map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(IndexMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builds a mapping from `(name, value)` pairs, rejecting repeated names
    pub fn from_pairs<I, N, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<AttrValue>,
    {
        let mut attributes = Self::new();
        for (name, value) in pairs {
            attributes.insert(name, value)?;
        }
        Ok(attributes)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Result<(), Error> {
        let name = name.into();
        if self.0.contains_key(&name) {
            return Err(Error::DuplicateAttribute(name));
        }
        self.0.insert(name, value.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An immutable element description: tag, attributes and ordered children.
///
/// Only [`construct`] creates these, so every value has passed its checks.
#[derive(Debug, Clone, PartialEq)]
pub struct VNode {
    tag: String,
    attributes: Attributes,
    children: Vec<NodeValue>,
}

impl VNode {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeValue] {
        &self.children
    }
}

/// Builds an attribute mapping, `attributes! { "id" => "app", "onclick" => handler }`.
///
/// Evaluates to `Result<Attributes, Error>`.
#[macro_export]
macro_rules! attributes {
    () => {
        ::std::result::Result::<$crate::vdom::Attributes, $crate::Error>::Ok(
            $crate::vdom::Attributes::new(),
        )
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::vdom::Attributes::from_pairs([
            $(($name, $crate::vdom::AttrValue::from($value))),+
        ])
    };
}

/// Variadic form of [`construct`]: `h!(tag, attributes, children...)`.
///
/// Both the attributes and each child may be a `Result`, so nested calls
/// compose without `?` at every level.
#[macro_export]
macro_rules! h {
    ($tag:expr, $attrs:expr $(, $child:expr)* $(,)?) => {
        $crate::vdom::build(
            $tag,
            $attrs,
            vec![$($crate::vdom::IntoChild::into_child($child)),*],
        )
    };
}

#[cfg(test)]
mod tests;
