use thiserror::Error;

/// Precondition violations caught while building a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("element tag must not be empty")]
    EmptyTag,

    #[error("attribute `{0}` given more than once")]
    DuplicateAttribute(String),

    #[error("event attribute `{name}` must be bound to a handler")]
    NonCallableEventAttribute { name: String },

    #[error("attribute `{name}` is not an event attribute but was given a handler")]
    HandlerOnStaticAttribute { name: String },
}
