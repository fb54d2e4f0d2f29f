//! Nested (ultimate) tic-tac-toe.
//!
//! Nine local 3x3 boards arranged in a 3x3 macro grid. A move marks one
//! cell of one local board; the cell index dictates which local board
//! the opponent must play in next, with a free choice whenever that
//! board is already decided or full. Claiming three local boards in a
//! line wins the game; it is drawn when no playable board remains.

use crate::games::tictactoe::line_winner;
use std::fmt;
use uct_core::{Game, Player, PointsValues};

/// Nested tic-tac-toe position.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct NestedState {
    /// Nine local boards of nine cells each, both row-major.
    boards: [[Option<Player>; 9]; 9],

    /// Owner of each decided local board. A full but drawn local board
    /// stays unowned; it is merely unplayable.
    claimed: [Option<Player>; 9],

    /// Local board the player to move is restricted to, if any.
    active: Option<u8>,

    /// Player to move. Player One plays X.
    current: Player,

    /// Cached overall winner.
    winner: Option<Player>,
}

impl NestedState {
    /// Create an empty position with player One to move anywhere.
    pub fn new() -> Self {
        Self {
            boards: [[None; 9]; 9],
            claimed: [None; 9],
            active: None,
            current: Player::One,
            winner: None,
        }
    }

    /// Get the overall winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Owner of a decided local board.
    pub fn claimed_by(&self, board: usize) -> Option<Player> {
        self.claimed.get(board).copied().flatten()
    }

    /// Local board the player to move is restricted to, if any.
    pub fn active_board(&self) -> Option<u8> {
        self.active
    }

    /// Get the mark at a cell of a local board, if any.
    pub fn get(&self, board: usize, cell: usize) -> Option<Player> {
        self.boards[board][cell]
    }

    /// Whether a local board still accepts moves.
    fn playable(&self, board: usize) -> bool {
        self.claimed[board].is_none() && self.boards[board].iter().any(|c| c.is_none())
    }

    fn any_playable(&self) -> bool {
        (0..9).any(|b| self.playable(b))
    }
}

impl Default for NestedState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NestedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for macro_row in 0..3 {
            if macro_row > 0 {
                writeln!(f, "---------+---------+---------")?;
            }
            for row in 0..3 {
                for macro_col in 0..3 {
                    if macro_col > 0 {
                        write!(f, "|")?;
                    }
                    let board = macro_row * 3 + macro_col;
                    for col in 0..3 {
                        match self.boards[board][row * 3 + col] {
                            Some(Player::One) => write!(f, " X ")?,
                            Some(Player::Two) => write!(f, " O ")?,
                            None => write!(f, " . ")?,
                        }
                    }
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// A move: one cell of one local board, both indexed 0-8 row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NestedMove {
    pub board: u8,
    pub cell: u8,
}

impl NestedMove {
    pub fn new(board: u8, cell: u8) -> Self {
        Self { board, cell }
    }
}

impl fmt::Display for NestedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.board, self.cell)
    }
}

/// Nested tic-tac-toe game implementation.
#[derive(Clone, Debug)]
pub struct NestedTicTacToe;

impl Game for NestedTicTacToe {
    type State = NestedState;
    type Action = NestedMove;

    fn initial_state(&self) -> Self::State {
        NestedState::new()
    }

    /// Legal moves in (board, cell) ascending order, restricted to the
    /// active board when it is still playable.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_ended(state) {
            return Vec::new();
        }

        let boards: Vec<usize> = match state.active {
            Some(board) if state.playable(board as usize) => vec![board as usize],
            _ => (0..9).filter(|&b| state.playable(b)).collect(),
        };

        let mut actions = Vec::new();
        for board in boards {
            for cell in 0..9 {
                if state.boards[board][cell].is_none() {
                    actions.push(NestedMove::new(board as u8, cell as u8));
                }
            }
        }
        actions
    }

    fn next_state(&self, state: &Self::State, action: Self::Action) -> Self::State {
        let mut next = state.clone();
        let board = action.board as usize;

        next.boards[board][action.cell as usize] = Some(state.current);
        if next.claimed[board].is_none() {
            next.claimed[board] = line_winner(&next.boards[board]);
        }
        next.winner = line_winner(&next.claimed);

        // The cell played sends the opponent to the matching board,
        // unless that board is already decided or full.
        next.active = if next.playable(action.cell as usize) {
            Some(action.cell)
        } else {
            None
        };
        next.current = state.current.opponent();
        next
    }

    fn is_ended(&self, state: &Self::State) -> bool {
        state.winner.is_some() || !state.any_playable()
    }

    fn current_player(&self, state: &Self::State) -> Player {
        state.current
    }

    fn points_values(&self, state: &Self::State) -> Option<PointsValues> {
        if let Some(winner) = state.winner {
            Some(PointsValues::win_for(winner))
        } else if !state.any_playable() {
            Some(PointsValues::draw())
        } else {
            None
        }
    }
}
