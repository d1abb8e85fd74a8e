use thiserror::Error;

use crate::mcts::NodeId;

/// Errors that can occur during a search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MctsError {
    #[error("node has no children to choose from (was the root already terminal?)")]
    NoMoves,

    #[error("non-terminal state reported no legal moves")]
    NoLegalMoves,

    #[error("no search tree has been planted")]
    NoTree,

    #[error("{0} does not belong to the current tree")]
    InvalidNode(NodeId),
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, MctsError>;
