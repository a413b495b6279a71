use std::error::Error as StdError;
use tracing::{span, Level};

use crate::host::Host;
use crate::materialize::materialize_element;
use crate::vdom::VNode;
use crate::Error;

/// Builds a tree from caller-owned state and actions
pub trait View<S, A> {
    fn view(&self, state: &S, actions: &A) -> Result<VNode, Error>;
}

impl<S, A, F> View<S, A> for F
where
    F: Fn(&S, &A) -> Result<VNode, Error>,
{
    fn view(&self, state: &S, actions: &A) -> Result<VNode, Error> {
        self(state, actions)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError<E: StdError + 'static> {
    #[error(transparent)]
    View(#[from] Error),

    #[error("host rejected the tree: {0}")]
    Host(#[source] E),
}

/// Builds the view's tree for `state` and materializes it into `host`
pub fn render<H, V, S, A>(host: &mut H, view: &V, state: &S, actions: &A) -> Result<H::Node, RenderError<H::Error>>
where
    H: Host,
    H::Error: StdError + 'static,
    V: View<S, A> + ?Sized,
{
    let span = span!(Level::DEBUG, "Rendering view");
    let _enter = span.enter();
    let tree = view.view(state, actions)?;
    materialize_element(host, &tree).map_err(RenderError::Host)
}
