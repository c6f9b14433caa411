use std::fmt;

use super::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of same-player pieces in a line needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    /// Numeric code used in the flattened board state (0 = empty, 1/2 = seat).
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }
}

/// Connect Four grid. Row 0 is the top, row `rows - 1` is the bottom.
///
/// Cells are only ever filled through [`Board::make_move`], so a cell is
/// non-empty only if every cell below it in the same column is non-empty.
/// `Clone` produces an independent deep copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    /// Create an empty 6x7 board
    pub fn standard() -> Self {
        Self::new(ROWS, COLS)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Set every cell back to empty
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// A move is valid if the column exists and its top cell is empty
    pub fn is_valid_move(&self, col: usize) -> bool {
        col < self.cols && self.get(0, col) == Cell::Empty
    }

    /// Drop a piece in a column, returns the row where it landed.
    ///
    /// Returns `None` when the column is full or out of range; callers are
    /// expected to check [`Board::is_valid_move`] first.
    pub fn make_move(&mut self, col: usize, player: Player) -> Option<usize> {
        if col >= self.cols {
            return None;
        }

        // Find the lowest empty row in this column
        for row in (0..self.rows).rev() {
            let idx = row * self.cols + col;
            if self.cells[idx] == Cell::Empty {
                self.cells[idx] = player.to_cell();
                return Some(row);
            }
        }

        None
    }

    /// Check whether the piece just placed at (last_row, last_col) completes
    /// a line of four for `player`.
    ///
    /// Only the four lines through the last move are examined, so this must
    /// be called right after placing that piece.
    pub fn check_winner(&self, player: Player, last_row: usize, last_col: usize) -> bool {
        let cell = player.to_cell();
        if last_row >= self.rows || last_col >= self.cols || self.get(last_row, last_col) != cell
        {
            return false;
        }

        const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + self.count_run(cell, last_row, last_col, dr, dc)
                + self.count_run(cell, last_row, last_col, -dr, -dc);
            count >= CONNECT
        })
    }

    /// Count contiguous `cell` pieces starting one step from (row, col) in
    /// direction (dr, dc).
    fn count_run(&self, cell: Cell, row: usize, col: usize, dr: isize, dc: isize) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while r >= 0
            && c >= 0
            && (r as usize) < self.rows
            && (c as usize) < self.cols
            && self.get(r as usize, c as usize) == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// Columns that can still accept a piece, ascending
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.is_valid_move(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.valid_moves().is_empty()
    }

    /// Row-major flattened cell codes, regenerated on every call.
    pub fn board_state(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.code()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| self.get(row, col).symbol())
                .flat_map(|ch| [ch, ' '])
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        let footer: Vec<String> = (0..self.cols).map(|col| (col % 10).to_string()).collect();
        write!(f, "{}", footer.join(" "))
    }
}
