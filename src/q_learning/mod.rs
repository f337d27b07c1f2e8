//! Tabular Q-learning
//!
//! A dense action-value table over the 500 encoded taxi states and an
//! epsilon-greedy agent applying one-step TD updates:
//!
//! Q(s,a) <- Q(s,a) + alpha * [r + gamma * max_a' Q(s',a') - Q(s,a)]

pub mod agent;
pub mod q_table;
pub mod serialization;

pub use agent::QLearningAgent;
pub use q_table::{QTable, TdUpdate};
pub use serialization::{SavedPolicy, TrainingMetadata};
