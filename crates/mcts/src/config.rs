//! Search configuration parameters.
//!
//! These are passed into the controller per search, never process-wide
//! state, so concurrent searches with different tuning can coexist.

/// Tuning parameters for one search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Iteration budget: one select/expand/rollout/backpropagate cycle
    /// per iteration. The only stopping condition.
    pub iterations: u32,

    /// UCB exploration constant `C`.
    pub explore_factor: f64,

    /// Probability that a rollout step plays a uniformly random move
    /// instead of minimizing the lookahead probe.
    pub rollout_exploration: f64,

    /// Depth cap for the rollout lookahead probe.
    pub probe_depth_cap: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 750,
            explore_factor: 2.0,
            rollout_exploration: 0.8,
            probe_depth_cap: 20,
        }
    }
}

impl SearchConfig {
    /// Thorough profile: the full 750-iteration budget.
    pub fn thorough() -> Self {
        Self::default()
    }

    /// Fast profile: 100 iterations, for quick moves and tests.
    pub fn fast() -> Self {
        Self {
            iterations: 100,
            ..Default::default()
        }
    }

    /// Create a config with the specified iteration budget.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }
}
