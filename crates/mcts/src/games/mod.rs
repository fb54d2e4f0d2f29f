//! Game-engine implementations bundled with the search.
//!
//! Classic tic-tac-toe is used to validate the search; the nested
//! variant is the game the agent is primarily tuned for.

pub mod nested;
pub mod tictactoe;

pub use nested::{NestedMove, NestedState, NestedTicTacToe};
pub use tictactoe::{Cell, TicTacToe, TicTacToeState};
