#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "No active traversal. A traversal state must be established (fresh or restored from a continuation) before it can be queried or updated."
    )]
    NoActiveTraversal,
    #[error("{0}")]
    SerdeJsonError(#[from] serde_json::Error),
}
