use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::warn;

use crate::game::Board;

/// What an external move source hands back for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanInput {
    Column(usize),
    Cancel,
}

/// Blocking source of moves for the human seat.
///
/// The trainer calls [`MoveProvider::request_move`] and waits for the answer.
/// Columns are validated by the caller, and an invalid column makes the
/// caller ask again.
pub trait MoveProvider {
    fn request_move(&mut self, board: &Board, valid_moves: &[usize]) -> HumanInput;
}

impl<F> MoveProvider for F
where
    F: FnMut(&Board, &[usize]) -> HumanInput,
{
    fn request_move(&mut self, board: &Board, valid_moves: &[usize]) -> HumanInput {
        self(board, valid_moves)
    }
}

/// Replays a fixed list of inputs, then cancels once they run out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    inputs: VecDeque<HumanInput>,
    requests: usize,
}

impl ScriptedMoves {
    pub fn new(inputs: impl IntoIterator<Item = HumanInput>) -> Self {
        ScriptedMoves {
            inputs: inputs.into_iter().collect(),
            requests: 0,
        }
    }

    pub fn columns(columns: impl IntoIterator<Item = usize>) -> Self {
        Self::new(columns.into_iter().map(HumanInput::Column))
    }

    /// How many times a move has been requested.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl MoveProvider for ScriptedMoves {
    fn request_move(&mut self, _board: &Board, _valid_moves: &[usize]) -> HumanInput {
        self.requests += 1;
        self.inputs.pop_front().unwrap_or(HumanInput::Cancel)
    }
}

/// Line-oriented prompt: prints the board, reads a column number.
///
/// `q` or end of input cancels. Text that is not a column number is
/// re-prompted here; range and full-column checks happen in the trainer.
pub struct LineMoveProvider<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineMoveProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineMoveProvider { input, output }
    }
}

impl<R: BufRead, W: Write> MoveProvider for LineMoveProvider<R, W> {
    fn request_move(&mut self, board: &Board, valid_moves: &[usize]) -> HumanInput {
        loop {
            let prompt = writeln!(self.output, "\n{board}")
                .and_then(|_| write!(self.output, "Your move {valid_moves:?} (q to quit): "))
                .and_then(|_| self.output.flush());
            if let Err(e) = prompt {
                warn!(error = %e, "failed to write prompt");
                return HumanInput::Cancel;
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return HumanInput::Cancel,
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "failed to read move");
                    return HumanInput::Cancel;
                }
            }

            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return HumanInput::Cancel;
            }
            match line.parse::<usize>() {
                Ok(col) => return HumanInput::Column(col),
                Err(_) => warn!(input = line, "not a column number"),
            }
        }
    }
}
