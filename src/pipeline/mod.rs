//! Training pipeline, reward-history bookkeeping, observers, and evaluation

pub mod evaluation;
pub mod history;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationConfig, EvaluationSummary, evaluate_greedy};
pub use history::RewardHistory;
pub use observers::{JsonlObserver, MetricsObserver, ProgressObserver, StepLogObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};
