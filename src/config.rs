//! Search configuration parameters.

use crate::error::MctsError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ITERATIONS: u32 = 1000;
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// Budget and tuning for a single search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of select/expand/rollout/backpropagate passes.
    pub iterations: u32,

    /// UCB1 exploration constant `C`. Higher values favor less visited children.
    pub exploration_constant: f64,

    /// Optional wall-clock budget, checked once per pass.
    /// The search stops at whichever of the two budgets runs out first.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set a wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), MctsError> {
        if self.iterations == 0 {
            return Err(MctsError::InvalidConfig(
                "iterations must be positive".to_string(),
            ));
        }
        validate_exploration_constant(self.exploration_constant)
    }
}

pub(crate) fn validate_exploration_constant(c: f64) -> Result<(), MctsError> {
    if c.is_finite() && c > 0.0 {
        Ok(())
    } else {
        Err(MctsError::InvalidConfig(format!(
            "exploration constant must be positive and finite, got {c}"
        )))
    }
}
