use crate::board::{Board, Cell, Player, Winner};
use crate::error::MctsError;
use std::fmt;

/// Number of aligned tokens needed to win.
pub const CONNECT: usize = 4;
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;

/// Horizontal, vertical, diagonal-up and diagonal-down, as (row, col) steps.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A gravity-drop grid where four aligned tokens win.
///
/// Row 0 is the bottom of the grid. Cells are stored row-major next to a
/// per-column fill height, so a drop never has to search its column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectFourBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    heights: Vec<usize>,
}

impl ConnectFourBoard {
    /// Creates an empty board. Both dimensions must be positive.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MctsError> {
        if rows == 0 || cols == 0 {
            return Err(MctsError::InvalidDimensions { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            heights: vec![0; cols],
        })
    }

    /// Builds a board from an explicit grid, listed bottom row first.
    ///
    /// `0` is empty, `1` belongs to [`Player::First`] and `2` to [`Player::Second`].
    /// Every row must have the same length and no token may float above an empty cell.
    pub fn from_rows(grid: &[Vec<u8>]) -> Result<Self, MctsError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        let mut board = Self::new(rows, cols)?;

        for (row, values) in grid.iter().enumerate() {
            if values.len() != cols {
                return Err(MctsError::InvalidDimensions {
                    rows,
                    cols: values.len(),
                });
            }

            for (col, &value) in values.iter().enumerate() {
                let cell = match value {
                    0 => continue,
                    1 => Cell::Owned(Player::First),
                    2 => Cell::Owned(Player::Second),
                    _ => return Err(MctsError::InvalidCell { row, col, value }),
                };
                if board.heights[col] != row {
                    return Err(MctsError::FloatingToken { row, col });
                }
                let index = board.index(row, col);
                board.cells[index] = cell;
                board.heights[col] += 1;
            }
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `row`, `col`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Number of tokens already stacked in `col`.
    pub fn height(&self, col: usize) -> Result<usize, MctsError> {
        self.check_column(col)?;
        Ok(self.heights[col])
    }

    pub fn token_count(&self) -> usize {
        self.heights.iter().sum()
    }

    /// A column is legal while its top cell is empty.
    pub fn is_legal_column(&self, col: usize) -> bool {
        col < self.cols && self.heights[col] < self.rows
    }

    /// Legal columns in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.is_legal_column(col)).collect()
    }

    /// The row the next token dropped into `col` would land on, if any.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        self.is_legal_column(col).then(|| self.heights[col])
    }

    /// Returns a new board with `player`'s token in the lowest empty cell of `col`.
    pub fn drop_token(&self, col: usize, player: Player) -> Result<Self, MctsError> {
        let mut next = self.clone();
        next.place(col, player)?;
        Ok(next)
    }

    /// Scans all four directions for a line of [`CONNECT`] tokens.
    ///
    /// A full board with no line is a draw; anything else is still in progress.
    pub fn winner(&self) -> Option<Winner> {
        for &(d_row, d_col) in &DIRECTIONS {
            if let Some(player) = self.find_line(d_row, d_col) {
                return Some(Winner::Player(player));
            }
        }

        if self.heights.iter().all(|&height| height == self.rows) {
            Some(Winner::Draw)
        } else {
            None
        }
    }

    fn place(&mut self, col: usize, player: Player) -> Result<usize, MctsError> {
        self.check_column(col)?;
        let row = self.heights[col];
        if row == self.rows {
            return Err(MctsError::ColumnFull(col));
        }

        let index = self.index(row, col);
        self.cells[index] = Cell::Owned(player);
        self.heights[col] += 1;
        Ok(row)
    }

    fn find_line(&self, d_row: isize, d_col: isize) -> Option<Player> {
        let span = (CONNECT - 1) as isize;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let Cell::Owned(player) = self.cells[self.index(row, col)] else {
                    continue;
                };

                let end_row = row as isize + span * d_row;
                let end_col = col as isize + span * d_col;
                if end_row < 0
                    || end_col < 0
                    || end_row >= self.rows as isize
                    || end_col >= self.cols as isize
                {
                    continue;
                }

                let complete = (1..CONNECT as isize).all(|step| {
                    let r = (row as isize + step * d_row) as usize;
                    let c = (col as isize + step * d_col) as usize;
                    self.cells[self.index(r, c)] == Cell::Owned(player)
                });
                if complete {
                    return Some(player);
                }
            }
        }

        None
    }

    fn check_column(&self, col: usize) -> Result<(), MctsError> {
        if col < self.cols {
            Ok(())
        } else {
            Err(MctsError::ColumnOutOfRange {
                col,
                cols: self.cols,
            })
        }
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl Default for ConnectFourBoard {
    /// The classic 6x7 board.
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cells: vec![Cell::Empty; DEFAULT_ROWS * DEFAULT_COLS],
            heights: vec![0; DEFAULT_COLS],
        }
    }
}

impl Board for ConnectFourBoard {
    type Move = usize;

    fn get_available_moves(&self) -> Vec<Self::Move> {
        self.legal_columns()
    }

    fn perform_move(&mut self, b_move: Self::Move, player: Player) -> Result<(), MctsError> {
        self.place(b_move, player).map(|_| ())
    }

    fn winner(&self) -> Option<Winner> {
        ConnectFourBoard::winner(self)
    }
}

/// Renders the grid top row first: `.` empty, `X` first player, `O` second player.
impl fmt::Display for ConnectFourBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let symbol = match self.cells[self.index(row, col)] {
                    Cell::Empty => '.',
                    Cell::Owned(Player::First) => 'X',
                    Cell::Owned(Player::Second) => 'O',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
