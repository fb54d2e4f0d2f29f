use crate::{Player, PointsValues};
use std::hash::Hash;

/// A deterministic, perfect-information, turn-based two-player game.
///
/// This trait is the fixed contract between the search and the game
/// engine. The engine is otherwise opaque: the search never inspects a
/// state beyond the operations below, and never mutates one in place.
pub trait Game: Clone {
    /// The complete game position, including whose turn it is.
    type State: Clone;

    /// A move. Must carry structural equality and hashing so it can key
    /// child lookups consistently across state copies.
    type Action: Copy + Eq + Hash;

    /// Returns the starting position.
    fn initial_state(&self) -> Self::State;

    /// Returns all legal actions from `state`, empty if terminal.
    ///
    /// The order is engine-defined but must be stable and deterministic;
    /// expansion order and tie-breaking depend on it.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Applies an action, returning a new state (pure, no mutation).
    fn next_state(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns true if the game has ended.
    fn is_ended(&self, state: &Self::State) -> bool;

    /// Returns the player to move at `state`.
    fn current_player(&self, state: &Self::State) -> Player;

    /// Returns the terminal outcome values, or `None` if the game has
    /// not ended. Callers treat `None` on a supposedly terminal state as
    /// a contract violation and fail rather than defaulting.
    fn points_values(&self, state: &Self::State) -> Option<PointsValues>;
}
