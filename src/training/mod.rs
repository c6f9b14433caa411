//! Training infrastructure: episode runners, replay buffer, the trainer
//! that drives self-play and opponent runs, human move providers, and
//! run statistics.

pub mod episode;
pub mod metrics;
pub mod move_provider;
pub mod replay_buffer;
pub mod trainer;

pub use move_provider::{HumanInput, LineMoveProvider, MoveProvider, ScriptedMoves};
pub use trainer::{TrainRequest, Trainer, TrainerConfig, TrainingMode};
