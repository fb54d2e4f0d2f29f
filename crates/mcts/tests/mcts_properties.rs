//! Property-based tests for the search.
//!
//! - Decision validity: the chosen action is always legal at the root
//! - Determinism: a fixed seed reproduces the decision and statistics
//! - Counter sanity: root-child visits account for the whole budget

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uct_core::Game;
use uct_mcts::{games::TicTacToe, Mcts, SearchConfig};

/// Generate a random seed for the search RNG.
fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Generate a small iteration budget (kept low to bound test time).
fn arb_iterations() -> impl Strategy<Value = u32> {
    10u32..100
}

/// Generate a random tic-tac-toe position by playing random moves.
fn arb_position() -> impl Strategy<Value = <TicTacToe as Game>::State> {
    (0usize..9, any::<u64>()).prop_map(|(num_moves, seed)| {
        let game = TicTacToe;
        let mut state = game.initial_state();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let actions = game.legal_actions(&state);
            if actions.is_empty() {
                break;
            }
            let idx = rand::Rng::gen_range(&mut rng, 0..actions.len());
            state = game.next_state(&state, actions[idx]);
        }
        state
    })
}

proptest! {
    /// `think` never returns an action absent from the root's legal set.
    #[test]
    fn prop_decision_is_legal(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_position()
    ) {
        let game = TicTacToe;
        if game.is_ended(&state) {
            return Ok(());
        }

        let mut mcts = Mcts::new(
            SearchConfig::with_iterations(iterations),
            ChaCha8Rng::seed_from_u64(seed),
        );
        let action = mcts.think(&game, &state).unwrap();

        prop_assert!(game.legal_actions(&state).contains(&action));
    }

    /// Same seed and budget reproduce the decision and every root-child
    /// visit and win count.
    #[test]
    fn prop_deterministic(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_position()
    ) {
        let game = TicTacToe;
        if game.is_ended(&state) {
            return Ok(());
        }

        let run = || {
            let mut mcts = Mcts::new(
                SearchConfig::with_iterations(iterations),
                ChaCha8Rng::seed_from_u64(seed),
            );
            mcts.search(&game, &state).unwrap()
        };

        prop_assert_eq!(run(), run());
    }

    /// Every iteration backpropagates through exactly one root child, so
    /// the child visit counts sum to the budget, and wins never exceed
    /// visits.
    #[test]
    fn prop_visits_account_for_budget(
        seed in arb_seed(),
        iterations in arb_iterations(),
        state in arb_position()
    ) {
        let game = TicTacToe;
        if game.is_ended(&state) {
            return Ok(());
        }

        let mut mcts = Mcts::new(
            SearchConfig::with_iterations(iterations),
            ChaCha8Rng::seed_from_u64(seed),
        );
        let result = mcts.search(&game, &state).unwrap();

        let total: u32 = result.children.iter().map(|c| c.visits).sum();
        prop_assert_eq!(total, iterations);
        for child in &result.children {
            prop_assert!(child.wins <= child.visits);
        }
    }
}
