//! The counter app: a paragraph showing a count and a button bumping it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::vdom::{Attributes, AttrValue, Handler, VNode};
use crate::{attributes, construct, h, Error};

/// The markup the counter view should materialize to
pub fn expected_markup(count: i64) -> String {
    format!(
        r#"<div id="app"><p id="counter">{}</p><button type="button" id="increment">+1</button></div>"#,
        count
    )
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct State {
    pub count: i64,
}

pub struct Actions {
    pub increment: Handler,
}

impl Actions {
    /// Actions mutating the given state when the host fires them
    pub fn new(state: &Rc<RefCell<State>>) -> Self {
        let state = Rc::clone(state);
        Self {
            increment: Handler::new(move |_| state.borrow_mut().count += 1),
        }
    }
}

pub fn view(state: &State, actions: &Actions) -> Result<VNode, Error> {
    h!(
        "div",
        attributes! { "id" => "app" },
        h!("p", attributes! { "id" => "counter" }, state.count),
        h!(
            "button",
            attributes! {
                "type" => "button",
                "id" => "increment",
                "onclick" => &actions.increment,
            },
            "+1",
        ),
    )
}

/// The tree [`view`] should build, spelled out node by node
pub fn expected_tree(state: &State, actions: &Actions) -> Result<VNode, Error> {
    let mut button = Attributes::new();
    button.insert("type", "button")?;
    button.insert("id", "increment")?;
    button.insert("onclick", AttrValue::Handler(actions.increment.clone()))?;
    construct(
        "div",
        Attributes::from_pairs([("id", "app")])?,
        vec![
            construct(
                "p",
                Attributes::from_pairs([("id", "counter")])?,
                vec![state.count.into()],
            )?
            .into(),
            construct("button", button, vec!["+1".into()])?.into(),
        ],
    )
}
