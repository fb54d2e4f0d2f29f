use thiserror::Error;

/// Errors surfaced by the game contract and the search.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UctError {
    /// A terminal-only operation (outcome scoring) was attempted on a
    /// state the engine does not report as ended.
    #[error("state is not terminal")]
    NotTerminal,

    /// The search was asked to pick a move in a position where the game
    /// is already over.
    #[error("search invoked on a terminal state")]
    SearchFromTerminal,

    /// No root child accumulated any visits, so no action can be ranked.
    /// Happens with a zero iteration budget or a root without legal moves.
    #[error("no root child was visited, cannot decide an action")]
    NoDecidableAction,
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, UctError>;
