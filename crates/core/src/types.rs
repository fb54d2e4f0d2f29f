//! Domain types shared between game engines and the search.

use std::fmt;

/// One of the two fixed player identities in a two-player game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "1"),
            Player::Two => write!(f, "2"),
        }
    }
}

/// Terminal outcome values for both players.
///
/// `1` denotes a win for that player, `-1` a loss, `0` a draw. Only
/// defined for terminal states; engines return `None` elsewhere.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PointsValues {
    one: i8,
    two: i8,
}

impl PointsValues {
    /// Outcome where `winner` scores `1` and the opponent `-1`.
    pub fn win_for(winner: Player) -> Self {
        match winner {
            Player::One => Self { one: 1, two: -1 },
            Player::Two => Self { one: -1, two: 1 },
        }
    }

    /// Drawn outcome: both players score `0`.
    pub fn draw() -> Self {
        Self { one: 0, two: 0 }
    }

    /// The outcome value for `player`.
    pub fn value_for(&self, player: Player) -> i8 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    /// Whether the outcome is a win for `player`.
    pub fn is_win(&self, player: Player) -> bool {
        self.value_for(player) == 1
    }

    /// The winning player, if the game was not drawn.
    pub fn winner(&self) -> Option<Player> {
        if self.one == 1 {
            Some(Player::One)
        } else if self.two == 1 {
            Some(Player::Two)
        } else {
            None
        }
    }
}
