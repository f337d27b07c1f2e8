//! Dense Q-table for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    taxi::{ALL_ACTIONS, Action, NUM_ACTIONS, NUM_STATES},
};

/// Pre- and post-update value of a single table cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdUpdate {
    pub old_q: f64,
    pub new_q: f64,
}

/// Action-value table over all 500 encoded states
///
/// One fixed-size row of 6 action values per state, zero-initialized and
/// never resized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: Vec<[f64; NUM_ACTIONS]>,
    /// Learning rate alpha
    learning_rate: f64,
    /// Discount factor gamma
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-initialized table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhausted`] if the table cannot be allocated.
    pub fn new(learning_rate: f64, discount_factor: f64) -> Result<Self> {
        let mut values = Vec::new();
        values
            .try_reserve_exact(NUM_STATES)
            .map_err(|_| Error::ResourceExhausted { what: "Q-table" })?;
        values.resize(NUM_STATES, [0.0; NUM_ACTIONS]);
        Ok(Self {
            values,
            learning_rate,
            discount_factor,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Q-value for a state-action pair
    pub fn get(&self, state: usize, action: Action) -> f64 {
        self.values[state][action.index()]
    }

    /// All six action values for a state, in action-index order
    pub fn values(&self, state: usize) -> &[f64; NUM_ACTIONS] {
        &self.values[state]
    }

    /// Maximum action value in a state
    pub fn max_q(&self, state: usize) -> f64 {
        self.values[state]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Highest-valued action in a state.
    ///
    /// Ties resolve to the lowest action index: the scan runs left to right
    /// and only a strictly greater value displaces the current best.
    pub fn greedy_action(&self, state: usize) -> Action {
        let row = &self.values[state];
        let mut best = 0;
        for (index, &q) in row.iter().enumerate().skip(1) {
            if q > row[best] {
                best = index;
            }
        }
        ALL_ACTIONS[best]
    }

    /// One-step Q-learning update, returning the displaced and new values.
    ///
    /// `terminated` suppresses the bootstrap term; the flag covers budget
    /// truncation as well as delivery, so truncated steps update toward the
    /// bare reward.
    pub fn q_learning_update(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: usize,
        terminated: bool,
    ) -> TdUpdate {
        let old_q = self.values[state][action.index()];
        let max_next_q = if terminated { 0.0 } else { self.max_q(next_state) };
        let td_target = reward + self.discount_factor * max_next_q;
        let new_q = old_q + self.learning_rate * (td_target - old_q);
        self.values[state][action.index()] = new_q;
        TdUpdate { old_q, new_q }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_starts_at_zero_everywhere() {
        let table = QTable::new(0.1, 0.99).unwrap();
        for state in 0..NUM_STATES {
            for action in ALL_ACTIONS {
                assert_eq!(table.get(state, action), 0.0);
            }
        }
    }

    #[test]
    fn greedy_action_prefers_lowest_index_on_ties() {
        let mut table = QTable::new(0.1, 0.99).unwrap();
        // All zeros: the first action wins.
        assert_eq!(table.greedy_action(7), Action::Down);

        table.q_learning_update(7, Action::Right, 4.0, 8, true);
        table.q_learning_update(7, Action::Pickup, 4.0, 8, true);
        // Right and Pickup now share the maximum; Right has the lower index.
        assert_eq!(table.greedy_action(7), Action::Right);
    }

    #[test]
    fn update_moves_value_toward_bootstrapped_target() {
        let mut table = QTable::new(0.5, 0.99).unwrap();
        table.q_learning_update(1, Action::Up, 2.0, 1, true);
        table.q_learning_update(1, Action::Down, 1.0, 1, true);

        let update = table.q_learning_update(0, Action::Down, -1.0, 1, false);
        // target = -1 + 0.99 * 1.0, Q = 0 + 0.5 * (target - 0)
        assert_eq!(update.old_q, 0.0);
        assert!((update.new_q - (-0.005)).abs() < 1e-12);
        assert_eq!(table.get(0, Action::Down), update.new_q);
    }

    #[test]
    fn terminal_update_skips_the_bootstrap() {
        let mut table = QTable::new(0.1, 0.99).unwrap();
        table.q_learning_update(1, Action::Up, 100.0, 1, true);

        let update = table.q_learning_update(0, Action::Dropoff, 20.0, 1, true);
        // No successor term: Q = 0 + 0.1 * (20 - 0)
        assert!((update.new_q - 2.0).abs() < 1e-12);
    }

    #[test]
    fn max_q_finds_the_largest_row_value() {
        let mut table = QTable::new(1.0, 0.0).unwrap();
        table.q_learning_update(3, Action::Left, -4.0, 0, true);
        table.q_learning_update(3, Action::Up, 2.5, 0, true);
        assert_eq!(table.max_q(3), 2.5);
    }
}
