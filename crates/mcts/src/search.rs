//! Monte Carlo Tree Search implementation.
//!
//! Implements UCB1 selection with perspective inversion on opponent
//! turns, FIFO expansion, a semi-greedy rollout policy, and win-count
//! backpropagation, driven by a fixed iteration budget.

use crate::{
    config::SearchConfig,
    node::NodeId,
    tree::Tree,
};
use rand::Rng;
use std::hash::Hash;
use uct_core::{Game, Player, Result, UctError};

/// Statistics of one root child after a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildStats<A: Copy + Eq + Hash> {
    /// The action leading to this child.
    pub action: A,

    /// Backpropagation passes through the child.
    pub visits: u32,

    /// Passes that were wins for the searching agent.
    pub wins: u32,
}

impl<A: Copy + Eq + Hash> ChildStats<A> {
    /// Empirical win rate of this child.
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }
}

/// Result of an MCTS search: the decision plus the root statistics it
/// was ranked from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<A: Copy + Eq + Hash> {
    /// Root child with the highest empirical win rate.
    pub best_action: A,

    /// Per-child statistics at the root, in expansion order.
    pub children: Vec<ChildStats<A>>,
}

/// Monte Carlo Tree Search controller.
///
/// Generic over:
/// - `G`: The game being played
/// - `R`: The random number generator driving the rollout policy
///
/// The RNG stream is the only state carried across calls; the tree is
/// rebuilt from scratch on every search and discarded with the decision.
pub struct Mcts<G: Game, R: Rng> {
    config: SearchConfig,
    rng: R,
    tree: Tree<G::Action>,
}

impl<G, R> Mcts<G, R>
where
    G: Game,
    G::Action: Copy + Eq + Hash,
    R: Rng,
{
    /// Create a new MCTS instance.
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            tree: Tree::with_root(Vec::new()),
        }
    }

    /// Run the full search from `state` and return the chosen action.
    ///
    /// The searching agent is whoever is to move at `state`.
    ///
    /// # Errors
    /// - [`UctError::SearchFromTerminal`] if the game is already over.
    /// - [`UctError::NoDecidableAction`] if no root child was visited
    ///   (zero iteration budget).
    pub fn think(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        self.search(game, state).map(|result| result.best_action)
    }

    /// Like [`Mcts::think`], but also returns the root child statistics
    /// the decision was ranked from.
    pub fn search(&mut self, game: &G, state: &G::State) -> Result<SearchResult<G::Action>> {
        if game.is_ended(state) {
            return Err(UctError::SearchFromTerminal);
        }
        let bot = game.current_player(state);
        self.tree = Tree::with_root(game.legal_actions(state));

        for _ in 0..self.config.iterations {
            let (leaf, leaf_state) = self.select(game, state.clone(), bot);
            let (expanded, expanded_state) = self.expand(game, leaf, leaf_state);
            let terminal_state = self.rollout(game, expanded_state, bot);
            let won = is_win(game, &terminal_state, bot)?;
            self.backpropagate(expanded, won);
        }

        self.decide()
    }

    /// SELECT: walk from the root to an expandable or terminal node,
    /// recomputing the state by replaying each chosen child's action.
    fn select(&self, game: &G, mut state: G::State, bot: Player) -> (NodeId, G::State) {
        let mut id = NodeId::ROOT;
        loop {
            let node = self.tree.get(id);
            if node.children.is_empty() || !node.is_fully_expanded() || game.is_ended(&state) {
                return (id, state);
            }

            // Minimize the agent's advantage in subtrees the opponent
            // moves into.
            let is_opponent = game.current_player(&state) != bot;

            let mut best = None;
            let mut best_value = f64::NEG_INFINITY;
            for &(action, child_id) in &node.children {
                let child = self.tree.get(child_id);
                let value = ucb(
                    child.wins,
                    child.visits,
                    node.visits,
                    self.config.explore_factor,
                    is_opponent,
                );
                // `>=` keeps the last child among equals; `decide`
                // breaks its ties the other way. Both are fixed so that
                // seeded runs reproduce exactly.
                if value >= best_value {
                    best = Some((action, child_id));
                    best_value = value;
                }
            }

            let (action, child_id) = best.expect("BUG: fully expanded node has no children");
            state = game.next_state(&state, action);
            id = child_id;
        }
    }

    /// EXPAND: materialize a child for the first untried action, seeded
    /// with the legal actions at the state it leads to.
    ///
    /// A node without untried actions (terminal, or fully expanded and
    /// handed over by a terminal-state selector exit) is returned
    /// unchanged.
    fn expand(&mut self, game: &G, id: NodeId, state: G::State) -> (NodeId, G::State) {
        let Some(action) = self.tree.get_mut(id).untried_actions.pop_front() else {
            return (id, state);
        };
        let next = game.next_state(&state, action);
        let child = self.tree.add_child(id, action, game.legal_actions(&next));
        (child, next)
    }

    /// SIMULATE: play the game out to a terminal state with the
    /// semi-greedy rollout policy. Never touches the tree.
    fn rollout(&mut self, game: &G, mut state: G::State, bot: Player) -> G::State {
        while !game.is_ended(&state) {
            let actions = game.legal_actions(&state);
            if actions.is_empty() {
                // Engine inconsistency: a non-terminal state with no
                // moves. Bail out; scoring will reject the state.
                break;
            }

            // Any move that ends the game is taken on the spot, whoever
            // it favors. Keeps playouts short and one-ply tactics exact.
            for &action in &actions {
                let next = game.next_state(&state, action);
                if game.is_ended(&next) {
                    return next;
                }
            }

            let action = if self.rng.gen::<f64>() < self.config.rollout_exploration {
                actions[self.rng.gen_range(0..actions.len())]
            } else {
                self.least_probe_score(game, &state, &actions, bot)
            };
            state = game.next_state(&state, action);

            // One forced random half-move per cycle. Not standard MCTS,
            // but deliberate behavior of this rollout policy. The
            // successor cannot be terminal here, or the short-circuit
            // above would have returned.
            let replies = game.legal_actions(&state);
            if replies.is_empty() {
                break;
            }
            state = game.next_state(&state, replies[self.rng.gen_range(0..replies.len())]);
        }
        state
    }

    /// The action whose lookahead probe score is lowest, first-seen
    /// minimum among ties.
    fn least_probe_score(
        &mut self,
        game: &G,
        state: &G::State,
        actions: &[G::Action],
        bot: Player,
    ) -> G::Action {
        let mut best = actions[0];
        let mut best_score = i32::MAX;
        for &action in actions {
            let score = self.probe(game, state, action, bot);
            if score < best_score {
                best = action;
                best_score = score;
            }
        }
        best
    }

    /// Depth-limited random playout probe of one candidate action.
    ///
    /// A playout that ends in a win for the searching agent scores
    /// `-depth` (sooner is better); everything else, including hitting
    /// the depth cap, scores `+depth`. Callers minimize. The estimate is
    /// noisy and re-randomized per call.
    fn probe(&mut self, game: &G, state: &G::State, action: G::Action, bot: Player) -> i32 {
        let mut state = game.next_state(state, action);
        let mut depth: i32 = 0;
        loop {
            if game.is_ended(&state) || depth >= self.config.probe_depth_cap {
                let won = game.is_ended(&state)
                    && game
                        .points_values(&state)
                        .is_some_and(|points| points.is_win(bot));
                return if won { -depth } else { depth };
            }
            let actions = game.legal_actions(&state);
            if actions.is_empty() {
                return depth;
            }
            state = game.next_state(&state, actions[self.rng.gen_range(0..actions.len())]);
            depth += 1;
        }
    }

    /// BACKPROPAGATE: walk the parent chain from `id` to the root
    /// inclusive, updating visit and win counts.
    fn backpropagate(&mut self, mut id: NodeId, won: bool) {
        loop {
            let node = self.tree.get_mut(id);
            node.visits += 1;
            if won {
                node.wins += 1;
            }
            match node.parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
    }

    /// Rank the root's children by empirical win rate, strict `>` so the
    /// first-seen maximum wins, considering only visited children.
    fn decide(&self) -> Result<SearchResult<G::Action>> {
        let root = self.tree.root();
        let children: Vec<ChildStats<G::Action>> = root
            .children
            .iter()
            .map(|&(action, id)| {
                let node = self.tree.get(id);
                ChildStats {
                    action,
                    visits: node.visits,
                    wins: node.wins,
                }
            })
            .collect();

        let mut best_action = None;
        let mut best_rate = -1.0f64;
        for child in &children {
            if child.visits > 0 && child.win_rate() > best_rate {
                best_action = Some(child.action);
                best_rate = child.win_rate();
            }
        }

        let best_action = best_action.ok_or(UctError::NoDecidableAction)?;
        Ok(SearchResult {
            best_action,
            children,
        })
    }
}

/// Upper confidence bound of a child node, from the searching agent's
/// perspective.
///
/// An unvisited child scores positive infinity so it is always tried
/// before any visited sibling, regardless of perspective. Otherwise the
/// score is the empirical win rate plus the exploration bonus
/// `c * sqrt(ln(parent_visits) / visits)`. When the opponent chose the
/// move into this subtree the score is inverted to `1 - value`, so the
/// maximizing selector effectively minimizes the agent's advantage.
pub fn ucb(wins: u32, visits: u32, parent_visits: u32, explore_factor: f64, is_opponent: bool) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }
    let exploitation = f64::from(wins) / f64::from(visits);
    let exploration = explore_factor * (f64::from(parent_visits).ln() / f64::from(visits)).sqrt();
    let value = exploitation + exploration;
    if is_opponent {
        1.0 - value
    } else {
        value
    }
}

/// Whether `state` is a win for `player`.
///
/// # Errors
/// [`UctError::NotTerminal`] if the engine reports no outcome, which on
/// a rollout result means the engine contradicted itself.
fn is_win<G: Game>(game: &G, state: &G::State, player: Player) -> Result<bool> {
    let points = game.points_values(state).ok_or(UctError::NotTerminal)?;
    Ok(points.is_win(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uct_core::PointsValues;

    // Simple test game: players alternate adding 1 or 2 to a counter,
    // and whoever reaches exactly 5 wins.
    #[derive(Clone)]
    struct RaceToFive;

    #[derive(Clone, PartialEq, Eq, Debug)]
    struct RaceState {
        count: u8,
        to_move: Player,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    struct Step(u8);

    impl Game for RaceToFive {
        type State = RaceState;
        type Action = Step;

        fn initial_state(&self) -> Self::State {
            RaceState {
                count: 0,
                to_move: Player::One,
            }
        }

        fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
            match state.count {
                5.. => Vec::new(),
                4 => vec![Step(1)],
                _ => vec![Step(1), Step(2)],
            }
        }

        fn next_state(&self, state: &Self::State, action: Self::Action) -> Self::State {
            RaceState {
                count: state.count + action.0,
                to_move: state.to_move.opponent(),
            }
        }

        fn is_ended(&self, state: &Self::State) -> bool {
            state.count >= 5
        }

        fn current_player(&self, state: &Self::State) -> Player {
            state.to_move
        }

        fn points_values(&self, state: &Self::State) -> Option<PointsValues> {
            if state.count >= 5 {
                // Whoever just moved reached 5 and wins.
                Some(PointsValues::win_for(state.to_move.opponent()))
            } else {
                None
            }
        }
    }

    fn mcts(config: SearchConfig, seed: u64) -> Mcts<RaceToFive, ChaCha8Rng> {
        Mcts::new(config, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_ucb_unvisited_is_infinite() {
        assert_eq!(ucb(0, 0, 10, 2.0, false), f64::INFINITY);
        // Perspective inversion does not apply to unvisited children
        assert_eq!(ucb(0, 0, 10, 2.0, true), f64::INFINITY);
    }

    #[test]
    fn test_ucb_favors_less_visited() {
        // Fixed wins and parent visits: fewer visits must score higher
        let sparse = ucb(1, 2, 100, 2.0, false);
        let dense = ucb(1, 10, 100, 2.0, false);
        assert!(sparse > dense);
    }

    #[test]
    fn test_ucb_perspective_inversion() {
        let value = ucb(3, 7, 50, 2.0, false);
        let inverted = ucb(3, 7, 50, 2.0, true);
        assert!((inverted - (1.0 - value)).abs() < 1e-12);
    }

    #[test]
    fn test_ucb_formula() {
        // wins/visits + C * sqrt(ln(parent) / visits)
        let expected = 0.5 + 2.0 * (8.0f64.ln() / 4.0).sqrt();
        assert!((ucb(2, 4, 8, 2.0, false) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_select_stops_at_node_with_untried_actions() {
        let game = RaceToFive;
        let mut search = mcts(SearchConfig::fast(), 0);
        search.tree = Tree::with_root(game.legal_actions(&game.initial_state()));

        let (id, state) = search.select(&game, game.initial_state(), Player::One);
        assert_eq!(id, NodeId::ROOT);
        assert_eq!(state.count, 0);
    }

    #[test]
    fn test_select_tie_break_keeps_last_child() {
        let game = RaceToFive;
        let mut search = mcts(SearchConfig::fast(), 0);

        // Root fully expanded with two statistically identical children.
        let mut tree = Tree::with_root(vec![Step(1), Step(2)]);
        tree.root_mut().untried_actions.clear();
        tree.root_mut().visits = 2;
        let first = tree.add_child(NodeId::ROOT, Step(1), vec![Step(1), Step(2)]);
        let second = tree.add_child(NodeId::ROOT, Step(2), vec![Step(1), Step(2)]);
        tree.get_mut(first).visits = 1;
        tree.get_mut(second).visits = 1;
        search.tree = tree;

        let (id, state) = search.select(&game, game.initial_state(), Player::One);
        assert_eq!(id, second);
        assert_eq!(state.count, 2);
    }

    #[test]
    fn test_expand_consumes_untried_actions_fifo() {
        let game = RaceToFive;
        let root_state = game.initial_state();
        let mut search = mcts(SearchConfig::fast(), 0);
        search.tree = Tree::with_root(game.legal_actions(&root_state));

        let (first, first_state) = search.expand(&game, NodeId::ROOT, root_state.clone());
        assert_eq!(search.tree.get(first).parent_action, Some(Step(1)));
        assert_eq!(first_state.count, 1);

        let (second, second_state) = search.expand(&game, NodeId::ROOT, root_state.clone());
        assert_eq!(search.tree.get(second).parent_action, Some(Step(2)));
        assert_eq!(second_state.count, 2);

        // Exhausted: the node comes back unchanged, children cover the
        // full initial action set with no duplicates.
        let (again, again_state) = search.expand(&game, NodeId::ROOT, root_state);
        assert_eq!(again, NodeId::ROOT);
        assert_eq!(again_state.count, 0);
        assert!(search.tree.root().is_fully_expanded());
        let actions: Vec<Step> = search
            .tree
            .root()
            .children
            .iter()
            .map(|&(action, _)| action)
            .collect();
        assert_eq!(actions, vec![Step(1), Step(2)]);
    }

    #[test]
    fn test_backpropagate_updates_exactly_the_path() {
        let mut search = mcts(SearchConfig::fast(), 0);
        let mut tree: Tree<Step> = Tree::with_root(vec![]);
        let child = tree.add_child(NodeId::ROOT, Step(1), vec![]);
        let grandchild = tree.add_child(child, Step(2), vec![]);
        let off_path = tree.add_child(NodeId::ROOT, Step(2), vec![]);
        search.tree = tree;

        search.backpropagate(grandchild, true);
        search.backpropagate(grandchild, false);

        for id in [grandchild, child, NodeId::ROOT] {
            assert_eq!(search.tree.get(id).visits, 2);
            assert_eq!(search.tree.get(id).wins, 1);
        }
        assert_eq!(search.tree.get(off_path).visits, 0);
        assert_eq!(search.tree.get(off_path).wins, 0);
    }

    #[test]
    fn test_backpropagate_from_root_touches_only_root() {
        let mut search = mcts(SearchConfig::fast(), 0);
        let mut tree: Tree<Step> = Tree::with_root(vec![]);
        let child = tree.add_child(NodeId::ROOT, Step(1), vec![]);
        search.tree = tree;

        search.backpropagate(NodeId::ROOT, true);
        assert_eq!(search.tree.root().visits, 1);
        assert_eq!(search.tree.root().wins, 1);
        assert_eq!(search.tree.get(child).visits, 0);
    }

    #[test]
    fn test_wins_never_exceed_visits() {
        let game = RaceToFive;
        let mut search = mcts(SearchConfig::with_iterations(200), 7);
        let result = search.search(&game, &game.initial_state()).unwrap();

        for child in &result.children {
            assert!(child.wins <= child.visits);
        }
    }

    #[test]
    fn test_think_takes_immediate_win() {
        // At count 3 the player to move wins on the spot with Step(2).
        // The rollout short-circuit makes this deterministic.
        let game = RaceToFive;
        let state = RaceState {
            count: 3,
            to_move: Player::One,
        };

        for seed in 0..20 {
            let mut search = mcts(SearchConfig::with_iterations(10), seed);
            assert_eq!(search.think(&game, &state).unwrap(), Step(2));
        }
    }

    #[test]
    fn test_think_returns_legal_action() {
        let game = RaceToFive;
        let mut search = mcts(SearchConfig::fast(), 42);
        let action = search.think(&game, &game.initial_state()).unwrap();
        assert!(action == Step(1) || action == Step(2));
    }

    #[test]
    fn test_think_rejects_terminal_state() {
        let game = RaceToFive;
        let state = RaceState {
            count: 5,
            to_move: Player::Two,
        };
        let mut search = mcts(SearchConfig::fast(), 42);
        assert_eq!(
            search.think(&game, &state),
            Err(UctError::SearchFromTerminal)
        );
    }

    #[test]
    fn test_zero_budget_is_not_decidable() {
        let game = RaceToFive;
        let mut search = mcts(SearchConfig::with_iterations(0), 42);
        assert_eq!(
            search.think(&game, &game.initial_state()),
            Err(UctError::NoDecidableAction)
        );
    }

    #[test]
    fn test_same_seed_same_statistics() {
        let game = RaceToFive;
        let run = |seed: u64| {
            let mut search = mcts(SearchConfig::with_iterations(50), seed);
            search.search(&game, &game.initial_state()).unwrap()
        };

        let first = run(12345);
        let second = run(12345);
        assert_eq!(first, second);

        // Total root-child visits account for every iteration
        let total: u32 = first.children.iter().map(|c| c.visits).sum();
        assert_eq!(total, 50);
    }

    #[test]
    fn test_root_node_shape() {
        let root: Node<Step> = Node::root(vec![Step(1), Step(2)]);
        assert_eq!(root.parent, None);
        assert_eq!(root.parent_action, None);
        assert_eq!(root.visits, 0);
        assert_eq!(root.wins, 0);
    }
}
