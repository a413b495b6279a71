//! Checking two trees against each other.
//!
//! [`detailed_diff`] and [`structurally_equal`] compare trees by value: an
//! attribute mapping is a map, so its order doesn't matter, while children are
//! compared position by position. [`same_markup`] compares already materialized
//! nodes by their serialized markup, where attribute order does matter.

use std::fmt;

use crate::host::OuterHtml;
use crate::vdom::{AttrValue, Attributes, NodeValue, VNode};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Tag,
    Attribute(String),
    Child(usize),
}

/// Location of a difference, from the root of the compared trees
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    fn join(&self, segment: Segment) -> Path {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Tag => f.write_str("tag")?,
                Segment::Attribute(name) => write!(f, "attributes.{}", name)?,
                Segment::Child(index) => write!(f, "children.{}", index)?,
            }
        }
        Ok(())
    }
}

/// Everything that differs between two trees. `added` holds what only the
/// second tree has, `deleted` what only the first has.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailedDiff {
    pub added: Vec<Path>,
    pub deleted: Vec<Path>,
    pub updated: Vec<Path>,
}

impl DetailedDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.updated.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.deleted.len() + self.updated.len()
    }
}

impl fmt::Display for DetailedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.added {
            writeln!(f, "+ {}", path)?;
        }
        for path in &self.deleted {
            writeln!(f, "- {}", path)?;
        }
        for path in &self.updated {
            writeln!(f, "~ {}", path)?;
        }
        Ok(())
    }
}

pub fn detailed_diff(a: &VNode, b: &VNode) -> DetailedDiff {
    let mut diff = DetailedDiff::default();
    diff_element(a, b, &Path::default(), &mut diff);
    diff
}

/// True when the two trees have no added, deleted or updated entries at any depth
pub fn structurally_equal(a: &VNode, b: &VNode) -> bool {
    detailed_diff(a, b).is_empty()
}

fn diff_element(a: &VNode, b: &VNode, path: &Path, diff: &mut DetailedDiff) {
    if a.tag() != b.tag() {
        diff.updated.push(path.join(Segment::Tag));
    }
    diff_attributes(a.attributes(), b.attributes(), path, diff);

    let (left, right) = (a.children(), b.children());
    for (index, (l, r)) in left.iter().zip(right).enumerate() {
        diff_value(l, r, &path.join(Segment::Child(index)), diff);
    }
    for index in right.len()..left.len() {
        diff.deleted.push(path.join(Segment::Child(index)));
    }
    for index in left.len()..right.len() {
        diff.added.push(path.join(Segment::Child(index)));
    }
}

fn diff_attributes(a: &Attributes, b: &Attributes, path: &Path, diff: &mut DetailedDiff) {
    for (name, value) in a.iter() {
        let at = path.join(Segment::Attribute(name.to_string()));
        match b.get(name) {
            None => diff.deleted.push(at),
            Some(other) if !same_attr_value(value, other) => diff.updated.push(at),
            Some(_) => {}
        }
    }
    for (name, _) in b.iter().filter(|(name, _)| !a.contains(name)) {
        diff.added.push(path.join(Segment::Attribute(name.to_string())));
    }
}

fn same_attr_value(a: &AttrValue, b: &AttrValue) -> bool {
    match (a, b) {
        (AttrValue::Static(a), AttrValue::Static(b)) => a == b,
        (AttrValue::Handler(a), AttrValue::Handler(b)) => a.ptr_eq(b),
        _ => false,
    }
}

fn diff_value(a: &NodeValue, b: &NodeValue, path: &Path, diff: &mut DetailedDiff) {
    match (a, b) {
        (NodeValue::Element(a), NodeValue::Element(b)) => diff_element(a, b, path, diff),
        (NodeValue::Text(a), NodeValue::Text(b)) if a == b => {}
        // NaN never equals itself, the same as a strict comparison would decide
        (NodeValue::Number(a), NodeValue::Number(b)) if a == b => {}
        _ => diff.updated.push(path.clone()),
    }
}

/// Compares two materialized nodes by their serialized markup.
///
/// Stricter than [`structurally_equal`]: attributes set in a different order
/// produce different markup.
pub fn same_markup<H: OuterHtml>(host: &H, a: &H::Node, b: &H::Node) -> Result<bool, H::Error> {
    Ok(host.outer_html(a)? == host.outer_html(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Document;
    use crate::materialize::materialize_element;
    use crate::vdom::Handler;
    use crate::{attributes, h};

    fn sample(handler: &Handler) -> VNode {
        h!(
            "div",
            attributes! { "id" => "app" },
            h!("p", attributes! { "id" => "counter" }, 0i32),
            h!(
                "button",
                attributes! { "type" => "button", "id" => "increment", "onclick" => handler },
                "+1",
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_identical_trees() {
        let handler = Handler::new(|_| {});
        let (a, b) = (sample(&handler), sample(&handler));
        assert!(detailed_diff(&a, &b).is_empty());
        assert!(structurally_equal(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_attribute_order_irrelevant() {
        let a = h!("button", attributes! { "type" => "button", "id" => "x" }).unwrap();
        let b = h!("button", attributes! { "id" => "x", "type" => "button" }).unwrap();
        assert!(structurally_equal(&a, &b));
    }

    #[test]
    fn test_different_handlers() {
        let a = sample(&Handler::new(|_| {}));
        let b = sample(&Handler::new(|_| {}));
        let diff = detailed_diff(&a, &b);
        assert_eq!(
            diff.updated,
            vec![Path::from(vec![
                Segment::Child(1),
                Segment::Attribute("onclick".into())
            ])]
        );
        assert!(!structurally_equal(&a, &b));
    }

    #[test]
    fn test_deep_changes() {
        let handler = Handler::new(|_| {});
        let a = sample(&handler);
        let b = h!(
            "div",
            attributes! { "id" => "app", "class" => "new" },
            h!("p", attributes! {}, "0"),
            h!(
                "a",
                attributes! { "type" => "button", "id" => "increment", "onclick" => &handler },
                "+1",
            ),
            "extra",
        )
        .unwrap();

        let diff = detailed_diff(&a, &b);
        let show = |paths: &[Path]| paths.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        assert_eq!(show(&diff.added), ["attributes.class", "children.2"]);
        assert_eq!(show(&diff.deleted), ["children.0.attributes.id"]);
        assert_eq!(show(&diff.updated), ["children.0.children.0", "children.1.tag"]);
        assert_eq!(diff.len(), 5);
    }

    #[test]
    fn test_removed_child() {
        let a = h!("ul", attributes! {}, "a", "b").unwrap();
        let b = h!("ul", attributes! {}, "a").unwrap();
        let diff = detailed_diff(&a, &b);
        assert_eq!(diff.deleted, vec![Path::from(vec![Segment::Child(1)])]);
        assert_eq!(diff.to_string(), "- children.1\n");
    }

    #[test]
    fn test_element_vs_leaf() {
        let a = h!("p", attributes! {}, h!("b", attributes! {}, "x")).unwrap();
        let b = h!("p", attributes! {}, "x").unwrap();
        assert_eq!(
            detailed_diff(&a, &b).updated,
            vec![Path::from(vec![Segment::Child(0)])]
        );
    }

    #[test]
    fn test_path_display() {
        assert_eq!(Path::default().to_string(), "(root)");
        let path = Path::from(vec![Segment::Child(1), Segment::Attribute("id".into())]);
        assert_eq!(path.to_string(), "children.1.attributes.id");
    }

    #[test]
    fn test_markup_order_sensitive() {
        let a = h!("button", attributes! { "type" => "button", "id" => "x" }).unwrap();
        let b = h!("button", attributes! { "id" => "x", "type" => "button" }).unwrap();
        let mut doc = Document::new();
        let (na, nb) = (
            materialize_element(&mut doc, &a).unwrap(),
            materialize_element(&mut doc, &b).unwrap(),
        );
        assert!(structurally_equal(&a, &b));
        assert_eq!(same_markup(&doc, &na, &nb), Ok(false));

        let nc = materialize_element(&mut doc, &a).unwrap();
        assert_eq!(same_markup(&doc, &na, &nc), Ok(true));
    }
}
