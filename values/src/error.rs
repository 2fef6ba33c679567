/// Errors raised by the reference [`State`](crate::State) runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("stack overflow: {requested} slot(s) requested, {available} available (limit {limit})")]
    StackOverflow {
        requested: usize,
        available: usize,
        limit: usize,
    },

    #[error("invalid stack index {index} (top is {top})")]
    InvalidIndex { index: i32, top: i32 },
}
