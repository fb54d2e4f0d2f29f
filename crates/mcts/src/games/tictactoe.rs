//! Tic-tac-toe implementation for search validation.
//!
//! Tic-tac-toe is a solved game where perfect play always results in a
//! draw, which makes it ideal for validating the search:
//! - it should never lose against any opponent
//! - it should exploit one-ply mistakes immediately

use std::fmt;
use uct_core::{Game, Player, PointsValues};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Winner of a 3x3 grid, if any.
pub(crate) fn line_winner(cells: &[Option<Player>; 9]) -> Option<Player> {
    for line in LINES {
        if let Some(player) = cells[line[0]] {
            if cells[line[1]] == Some(player) && cells[line[2]] == Some(player) {
                return Some(player);
            }
        }
    }
    None
}

/// Tic-tac-toe board state.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Player>; 9],

    /// Player to move. Player One plays X.
    current: Player,

    /// Cached winner (if any).
    winner: Option<Player>,
}

impl TicTacToeState {
    /// Create a new empty board with player One (X) to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Player::One,
            winner: None,
        }
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Get the mark at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, " | ")?;
                }
                match self.board[row * 3 + col] {
                    Some(Player::One) => write!(f, " X ")?,
                    Some(Player::Two) => write!(f, " O ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Tic-tac-toe action (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell(pub u8);

impl Cell {
    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// Tic-tac-toe game implementation.
#[derive(Clone, Debug)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = TicTacToeState;
    type Action = Cell;

    fn initial_state(&self) -> Self::State {
        TicTacToeState::new()
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_ended(state) {
            return Vec::new();
        }
        state
            .board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Cell(i as u8))
            .collect()
    }

    fn next_state(&self, state: &Self::State, action: Self::Action) -> Self::State {
        let mut next = state.clone();
        next.board[action.0 as usize] = Some(state.current);
        next.current = state.current.opponent();
        next.winner = line_winner(&next.board);
        next
    }

    fn is_ended(&self, state: &Self::State) -> bool {
        state.winner.is_some() || state.is_full()
    }

    fn current_player(&self, state: &Self::State) -> Player {
        state.current
    }

    fn points_values(&self, state: &Self::State) -> Option<PointsValues> {
        if let Some(winner) = state.winner {
            Some(PointsValues::win_for(winner))
        } else if state.is_full() {
            Some(PointsValues::draw())
        } else {
            None
        }
    }
}
