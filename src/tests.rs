use super::*;
use crate::counter::{expected_markup, expected_tree, view, Actions, State};
use crate::host::Document;
use std::cell::RefCell;
use std::rc::Rc;

fn counter() -> (Rc<RefCell<State>>, Actions) {
    let state = Rc::new(RefCell::new(State::default()));
    let actions = Actions::new(&state);
    (state, actions)
}

#[test]
fn test_view_builds_expected_tree() {
    let (state, actions) = counter();
    let dom = view(&state.borrow(), &actions).unwrap();
    let target = expected_tree(&state.borrow(), &actions).unwrap();
    assert!(detailed_diff(&dom, &target).is_empty());
    assert!(structurally_equal(&dom, &target));
}

#[test]
fn test_view_differs_from_other_state() {
    let (state, actions) = counter();
    let dom = view(&state.borrow(), &actions).unwrap();
    let target = expected_tree(&State { count: 1 }, &actions).unwrap();
    assert!(!structurally_equal(&dom, &target));
    assert_eq!(detailed_diff(&dom, &target).to_string(), "~ children.0.children.0\n");
}

#[test]
fn test_materialized_markup() {
    let (state, actions) = counter();
    let mut doc = Document::new();
    let dom = render(&mut doc, &view, &*state.borrow(), &actions).unwrap();
    let target = doc
        .parse_fragment(&format!("\n{}\n", expected_markup(0)))
        .unwrap();

    assert_eq!(
        doc.outer_html(dom).unwrap(),
        r#"<div id="app"><p id="counter">0</p><button type="button" id="increment">+1</button></div>"#
    );
    assert!(same_markup(&doc, &dom, &target).unwrap());

    let button = doc.children(dom)[1];
    assert_eq!(doc.tag_name(button), Some("button"));
    assert_eq!(doc.attribute(button, "onclick"), None);
    assert_eq!(doc.listener_count(button, "click"), 1);
}

#[test]
fn test_click_updates_caller_state() {
    let (state, actions) = counter();
    let mut doc = Document::new();
    let dom = render(&mut doc, &view, &*state.borrow(), &actions).unwrap();
    let button = doc.children(dom)[1];

    assert_eq!(doc.dispatch_event(button, "click"), Ok(1));
    assert_eq!(doc.dispatch_event(button, "click"), Ok(1));
    assert_eq!(state.borrow().count, 2);

    // The old subtree is untouched; a fresh render shows the new count
    assert_eq!(doc.text_content(doc.children(dom)[0]), "0");
    let dom = render(&mut doc, &view, &*state.borrow(), &actions).unwrap();
    assert_eq!(doc.outer_html(dom).unwrap(), expected_markup(2));
}

#[test]
fn test_rendering_twice_gives_same_markup() {
    let (state, actions) = counter();
    let mut doc = Document::new();
    let first = render(&mut doc, &view, &*state.borrow(), &actions).unwrap();
    let second = render(&mut doc, &view, &*state.borrow(), &actions).unwrap();
    assert_ne!(first, second);
    assert!(same_markup(&doc, &first, &second).unwrap());
}
