//! Serialization support for trained policies.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::q_learning::agent::{AgentState, QLearningAgent};

/// Provenance recorded alongside a saved policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub episodes: usize,
    pub step_budget: usize,
    pub seed: Option<u64>,
}

/// A trained policy in its on-disk form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPolicy {
    pub version: u32,
    state: AgentState,
    pub metadata: TrainingMetadata,
}

impl SavedPolicy {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearningAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
            metadata,
        }
    }

    pub fn to_agent(&self) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported policy save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        Ok(QLearningAgent::from_state(self.state.clone()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize policy")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).context("Failed to deserialize policy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxi::Action;

    #[test]
    fn policy_round_trips_through_messagepack() -> Result<()> {
        let mut agent = QLearningAgent::new(0.1, 0.99, 0.1)?.with_seed(5);
        agent.observe(123, Action::Right, -1.0, 124, false);
        agent.observe(124, Action::Dropoff, 20.0, 124, true);

        let metadata = TrainingMetadata {
            episodes: 2,
            step_budget: 200,
            seed: Some(5),
        };
        let saved = SavedPolicy::from_agent(&agent, metadata);
        let bytes = rmp_serde::to_vec(&saved)?;
        let loaded: SavedPolicy = rmp_serde::from_slice(&bytes)?;
        let restored = loaded.to_agent()?;

        assert_eq!(restored.q_table(), agent.q_table());
        assert_eq!(loaded.metadata.episodes, 2);
        Ok(())
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let agent = QLearningAgent::new(0.1, 0.99, 0.1).unwrap();
        let mut saved = SavedPolicy::from_agent(&agent, TrainingMetadata::default());
        saved.version = 99;
        assert!(saved.to_agent().is_err());
    }

    #[test]
    fn file_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("policy.mpk");

        let mut agent = QLearningAgent::new(0.1, 0.99, 0.1)?.with_seed(8);
        agent.observe(0, Action::Down, -1.0, 20, false);

        SavedPolicy::from_agent(&agent, TrainingMetadata::default()).save_to_file(&path)?;
        let restored = SavedPolicy::load_from_file(&path)?.to_agent()?;
        assert_eq!(restored.q_table(), agent.q_table());
        Ok(())
    }
}
