//! # Connect Four RL
//!
//! Trains an epsilon-greedy Q-learning agent to play Connect Four, with a
//! replay buffer, a lagging target network, and resumable saved models.
//! The value network runs on the Burn ML framework's CPU backend.
//!
//! ## Modules
//!
//! - [`game`]: Board rules, players and game outcomes
//! - [`ai`]: Q-learning agent, value network, random opponent, state encoding
//! - [`training`]: Episode runners, trainer, replay buffer, metrics
//! - [`checkpoint`]: Named model persistence
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

#![recursion_limit = "256"]

pub mod ai;
pub mod checkpoint;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
