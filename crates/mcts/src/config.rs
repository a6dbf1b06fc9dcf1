//! MCTS configuration parameters.
//!
//! These parameters control the budget and the selection policy of the
//! Monte Carlo Tree Search engine.

use duel_core::{GameError, Result};
use std::time::Duration;

/// MCTS configuration parameters.
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// Wall-clock budget for a single search.
    /// Checked between cycles, so a search overruns by at most one rollout.
    pub time_budget: Duration,

    /// Optional cap on the number of completed cycles per search.
    pub max_iterations: Option<usize>,

    /// UCB1 exploration constant.
    pub exploration_constant: f64,

    /// Reward credited to both players for a drawn rollout.
    pub draw_reward: f64,

    /// Break ties between equal UCB1 scores randomly instead of by
    /// move-generation order.
    pub randomize_ties: bool,

    /// Keep the subtree of the action actually played between searches.
    pub reuse_tree: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(1),
            max_iterations: None,
            exploration_constant: std::f64::consts::SQRT_2,
            draw_reward: 0.5,
            randomize_ties: false,
            reuse_tree: true,
        }
    }
}

impl MctsConfig {
    /// Create a config bounded only by the given wall-clock budget.
    pub fn with_time_budget(time_budget: Duration) -> Self {
        Self {
            time_budget,
            ..Default::default()
        }
    }

    /// Create a config bounded only by the number of cycles.
    ///
    /// Useful for reproducible searches that must not depend on timing.
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            time_budget: Duration::MAX,
            max_iterations: Some(iterations),
            ..Default::default()
        }
    }

    /// Check that every parameter is usable.
    ///
    /// # Errors
    /// Returns `GameError::InvalidConfig` if:
    /// - The exploration constant is negative or not finite
    /// - The draw reward is outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "exploration constant {} must be finite and non-negative",
                self.exploration_constant
            )));
        }

        if !(0.0..=1.0).contains(&self.draw_reward) {
            return Err(GameError::InvalidConfig(format!(
                "draw reward {} is outside range [0, 1]",
                self.draw_reward
            )));
        }

        Ok(())
    }

    /// True once `iterations` cycles have used up the cycle cap.
    pub fn iterations_exhausted(&self, iterations: usize) -> bool {
        self.max_iterations.is_some_and(|max| iterations >= max)
    }
}
