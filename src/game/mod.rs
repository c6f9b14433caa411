//! Core Connect Four rules: a mutable, gravity-respecting board with
//! last-move win detection, the two seats, and episode outcomes.

mod board;
mod outcome;
mod player;

pub use board::{Board, Cell, COLS, CONNECT, ROWS};
pub use outcome::GameOutcome;
pub use player::Player;
