//! Ports (trait boundaries) for external collaborators.
//!
//! The training pipeline publishes events through these traits; loggers,
//! progress displays, and exporters implement them without the core ever
//! depending on a concrete consumer.

pub mod observer;

pub use observer::{EpisodeSummary, Observer, StepRecord};
