use serde::{Deserialize, Serialize};

use crate::game::{Board, Player};

/// A single (state, action, reward, next_state, done) transition.
///
/// `perspective` records which seat made the move. In self-play one agent
/// plays both seats, so the same network learns from both perspectives and
/// the tag is what distinguishes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub state: Vec<u8>,
    pub action: usize,
    pub reward: f32,
    pub next_state: Vec<u8>,
    pub done: bool,
    pub perspective: Player,
}

/// Anything that can pick a column for the side to move.
pub trait Agent {
    /// Select a column from `valid_moves`, which must be non-empty.
    fn select_action(&mut self, board: &Board, valid_moves: &[usize]) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
