//! CLI infrastructure for the taxiq toolkit
//!
//! This module provides the command-line interface for training, evaluating,
//! and replaying Q-learning policies on the taxi grid world.

pub mod commands;
pub mod output;
