//! Built-in observers for training pipelines
//!
//! Observers compose through [`TrainingPipeline::with_observer`]; each one
//! consumes the step records and episode summaries the pipeline publishes
//! without the training loop knowing any output format.
//!
//! [`TrainingPipeline::with_observer`]: crate::pipeline::TrainingPipeline::with_observer

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{EpisodeSummary, Observer, StepRecord},
    taxi::EpisodeOutcome,
};

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    solved: usize,
    timed_out: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            solved: 0,
            timed_out: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.outcome {
            EpisodeOutcome::Solved => self.solved += 1,
            EpisodeOutcome::TimedOut => self.timed_out += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(format!("S:{} T:{}", self.solved, self.timed_out));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("S:{} T:{}", self.solved, self.timed_out));
        }
        Ok(())
    }
}

/// Metrics observer - tracks aggregate training metrics
pub struct MetricsObserver {
    solved: usize,
    timed_out: usize,
    total_episodes: usize,
    total_steps: usize,
    reward_sum: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            solved: 0,
            timed_out: 0,
            total_episodes: 0,
            total_steps: 0,
            reward_sum: 0.0,
        }
    }

    /// Fraction of episodes solved so far
    pub fn solve_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.solved as f64 / self.total_episodes as f64
        }
    }

    /// Mean total reward per episode so far
    pub fn mean_reward(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.reward_sum / self.total_episodes as f64
        }
    }

    /// Mean episode length in steps
    pub fn mean_episode_length(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.total_episodes as f64
        }
    }

    /// Snapshot of the collected metrics
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            total_steps: self.total_steps,
            solved: self.solved,
            timed_out: self.timed_out,
            solve_rate: self.solve_rate(),
            mean_reward: self.mean_reward(),
            mean_episode_length: self.mean_episode_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub total_steps: usize,
    pub solved: usize,
    pub timed_out: usize,
    pub solve_rate: f64,
    pub mean_reward: f64,
    pub mean_episode_length: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.total_episodes += 1;
        self.total_steps += summary.steps;
        self.reward_sum += summary.total_reward;
        match summary.outcome {
            EpisodeOutcome::Solved => self.solved += 1,
            EpisodeOutcome::TimedOut => self.timed_out += 1,
        }
        Ok(())
    }
}

/// Step log observer - writes one line per TD update
///
/// Logs only the first and last `edge_episodes` episodes of a run, keeping
/// console output readable while still showing both untrained and converged
/// behavior. An `edge_episodes` of zero logs nothing.
pub struct StepLogObserver<W: Write + Send> {
    writer: W,
    edge_episodes: usize,
    total_episodes: usize,
}

impl<W: Write + Send> StepLogObserver<W> {
    pub fn new(writer: W, edge_episodes: usize) -> Self {
        Self {
            writer,
            edge_episodes,
            total_episodes: 0,
        }
    }

    fn should_log(&self, episode: usize) -> bool {
        episode < self.edge_episodes
            || episode >= self.total_episodes.saturating_sub(self.edge_episodes)
    }
}

impl<W: Write + Send> Observer for StepLogObserver<W> {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.total_episodes = total_episodes;
        Ok(())
    }

    fn on_episode_start(&mut self, episode: usize) -> Result<()> {
        if self.should_log(episode) {
            writeln!(self.writer, "--- episode {episode} ---")?;
        }
        Ok(())
    }

    fn on_step(&mut self, record: &StepRecord) -> Result<()> {
        if !self.should_log(record.episode) {
            return Ok(());
        }
        let obs = record.observation;
        writeln!(
            self.writer,
            "[ep {} | step {}] pos:({},{}) pass:{} dest:{} | {:<7} | reward {:+.0} | Q[{}] {:.4} -> {:.4}",
            record.episode,
            record.step,
            obs.taxi_row,
            obs.taxi_col,
            obs.passenger,
            obs.destination,
            record.action.name(),
            record.reward,
            record.state,
            record.old_q,
            record.new_q,
        )?;
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        if self.should_log(summary.episode) {
            writeln!(
                self.writer,
                "episode {} {}: reward {:+.0} in {} steps",
                summary.episode,
                summary.outcome.label(),
                summary.total_reward,
                summary.steps,
            )?;
        }
        Ok(())
    }
}

/// One JSONL line: an episode with all of its step records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeObservation {
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub total_reward: f64,
    pub steps: Vec<StepRecord>,
}

/// JSONL observer - exports one episode per line for offline analysis
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepRecord>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, record: &StepRecord) -> Result<()> {
        self.current_steps.push(*record);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let observation = EpisodeObservation {
            episode: summary.episode,
            outcome: summary.outcome,
            total_reward: summary.total_reward,
            steps: std::mem::take(&mut self.current_steps),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxi::{Action, Observation};

    fn summary(episode: usize, outcome: EpisodeOutcome) -> EpisodeSummary {
        EpisodeSummary {
            episode,
            outcome,
            total_reward: -10.0,
            steps: 10,
        }
    }

    fn record(episode: usize) -> StepRecord {
        StepRecord {
            episode,
            step: 0,
            state: 42,
            action: Action::Right,
            reward: -1.0,
            next_state: 62,
            old_q: 0.0,
            new_q: -0.1,
            observation: Observation {
                taxi_row: 2,
                taxi_col: 3,
                passenger: 0,
                destination: 1,
            },
        }
    }

    #[test]
    fn metrics_observer_accumulates_episodes() {
        let mut observer = MetricsObserver::new();
        assert_eq!(observer.solve_rate(), 0.0);

        observer
            .on_episode_end(&summary(0, EpisodeOutcome::Solved))
            .unwrap();
        observer
            .on_episode_end(&summary(1, EpisodeOutcome::TimedOut))
            .unwrap();
        observer
            .on_episode_end(&summary(2, EpisodeOutcome::Solved))
            .unwrap();

        let snapshot = observer.summary();
        assert_eq!(snapshot.total_episodes, 3);
        assert_eq!(snapshot.solved, 2);
        assert_eq!(snapshot.timed_out, 1);
        assert!((snapshot.solve_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(snapshot.mean_episode_length, 10.0);
    }

    #[test]
    fn step_log_covers_only_edge_episodes() {
        let mut observer = StepLogObserver::new(Vec::new(), 1);
        observer.on_training_start(4).unwrap();

        for episode in 0..4 {
            observer.on_episode_start(episode).unwrap();
            observer.on_step(&record(episode)).unwrap();
            observer
                .on_episode_end(&summary(episode, EpisodeOutcome::TimedOut))
                .unwrap();
        }

        let output = String::from_utf8(observer.writer).unwrap();
        assert!(output.contains("[ep 0 | step 0]"));
        assert!(output.contains("[ep 3 | step 0]"));
        assert!(!output.contains("[ep 1 |"));
        assert!(!output.contains("[ep 2 |"));
        assert!(output.contains("RIGHT"));
    }

    #[test]
    fn zero_edge_episodes_logs_nothing() {
        let mut observer = StepLogObserver::new(Vec::new(), 0);
        observer.on_training_start(3).unwrap();
        observer.on_step(&record(0)).unwrap();
        assert!(observer.writer.is_empty());
    }

    #[test]
    fn jsonl_observer_writes_one_line_per_episode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("observations.jsonl");

        let mut observer = JsonlObserver::new(&path).unwrap();
        for episode in 0..3 {
            observer.on_episode_start(episode).unwrap();
            observer.on_step(&record(episode)).unwrap();
            observer
                .on_episode_end(&summary(episode, EpisodeOutcome::Solved))
                .unwrap();
        }
        drop(observer);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        let parsed: EpisodeObservation = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.episode, 1);
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(parsed.steps[0].state, 42);
    }
}
