//! A small virtual DOM.
//!
//! Trees are built with [`construct`] (or the [`h!`] macro), turned into live
//! nodes of a [`host::Host`] with [`materialize`], and checked against expected
//! trees or markup with the functions in [`equiv`].
//!
//! ```
//! use vnode::host::Document;
//! use vnode::{attributes, h, materialize_element};
//!
//! let tree = h!("p", attributes! { "id" => "counter" }, 0).unwrap();
//! let mut doc = Document::new();
//! let p = materialize_element(&mut doc, &tree).unwrap();
//! assert_eq!(doc.outer_html(p).unwrap(), r#"<p id="counter">0</p>"#);
//! ```

/// The counter app used by the demo binary
pub mod counter;
/// Structural and markup comparison of trees
pub mod equiv;
mod error;
/// Host documents trees are materialized into
pub mod host;
mod materialize;
/// The virtual node model and its construction
pub mod vdom;
/// Views over caller-owned state
pub mod view;

pub use equiv::{detailed_diff, same_markup, structurally_equal, DetailedDiff};
pub use error::Error;
pub use materialize::{materialize, materialize_element};
pub use vdom::attrs::{event_type, is_event_attribute};
pub use vdom::{construct, h, AttrValue, Attributes, Event, Handler, NodeValue, Number, VNode};
pub use view::{render, RenderError, View};

#[cfg(test)]
mod tests;
