use std::fmt;
use std::ops::Range;

use super::Player;
use crate::error::{BoardError, InvalidMove};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned pieces needed to win.
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Piece(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// The four scan directions a window can run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right along a row
    Horizontal,
    /// Top to bottom along a column
    Vertical,
    /// Bottom-left to top-right, `/`
    DiagonalUp,
    /// Top-left to bottom-right, `\`
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// Row and column ranges of every window anchor for this direction on a
    /// `rows x cols` grid. Empty when the grid is too small for a window.
    fn anchors(self, rows: usize, cols: usize) -> (Range<usize>, Range<usize>) {
        let span = WIN_LENGTH - 1;
        let row_starts = rows.saturating_sub(span);
        let col_starts = cols.saturating_sub(span);
        match self {
            Direction::Horizontal => (0..rows, 0..col_starts),
            Direction::Vertical => (0..row_starts, 0..cols),
            Direction::DiagonalUp => (span..rows, 0..col_starts),
            Direction::DiagonalDown => (0..row_starts, 0..col_starts),
        }
    }

    /// Position of the `i`-th cell of the window anchored at (row, col).
    fn offset(self, row: usize, col: usize, i: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (row, col + i),
            Direction::Vertical => (row + i, col),
            Direction::DiagonalUp => (row - i, col + i),
            Direction::DiagonalDown => (row + i, col + i),
        }
    }
}

/// A `rows x cols` grid. Row 0 is the top, column 0 is the left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty 6x7 board
    pub fn new() -> Self {
        Board {
            rows: ROWS,
            cols: COLS,
            cells: vec![Cell::Empty; ROWS * COLS],
        }
    }

    /// Create a new empty board of the given size
    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()` or `col >= self.cols()`. Use
    /// [`Board::try_get`] for unchecked coordinates.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.row(row)[col]
    }

    /// Get the cell at a position, or `None` if it lies off the board
    pub fn try_get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// The whole grid, row-major, top row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of the grid, left to right
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols {
            return true;
        }
        !self.get(0, col).is_empty()
    }

    /// Row a piece dropped into `col` would land in, without dropping it
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if self.is_column_full(col) {
            return None;
        }
        (0..self.rows).rev().find(|&row| self.get(row, col).is_empty())
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, InvalidMove> {
        if col >= self.cols {
            return Err(InvalidMove::OutOfRange {
                column: col,
                cols: self.cols,
            });
        }

        let row = self
            .next_open_row(col)
            .ok_or(InvalidMove::ColumnFull { column: col })?;
        self.cells[row * self.cols + col] = Cell::Piece(player);
        Ok(row)
    }

    /// Columns that can still take a piece, ascending
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Top row fully occupied. Under gravity this means no move remains.
    pub fn is_draw(&self) -> bool {
        self.row(0).iter().all(|c| !c.is_empty())
    }

    /// Four consecutive `player` pieces in any direction
    pub fn is_win(&self, player: Player) -> bool {
        let piece = Cell::Piece(player);
        Direction::ALL.iter().any(|&dir| {
            self.windows_in(dir)
                .any(|window| window.iter().all(|&c| c == piece))
        })
    }

    /// Every window of `WIN_LENGTH` cells along one direction
    pub fn windows_in(&self, dir: Direction) -> impl Iterator<Item = [Cell; WIN_LENGTH]> + '_ {
        let (rows, cols) = dir.anchors(self.rows, self.cols);
        rows.flat_map(move |row| {
            cols.clone().map(move |col| {
                std::array::from_fn::<Cell, WIN_LENGTH, _>(|i| {
                    let (r, c) = dir.offset(row, col, i);
                    self.get(r, c)
                })
            })
        })
    }

    /// Every window on the board, all four directions
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WIN_LENGTH]> + '_ {
        Direction::ALL
            .into_iter()
            .flat_map(move |dir| self.windows_in(dir))
    }

    /// Build a board from one string per row, top row first.
    /// `X` is Red, `O` is Yellow, anything else is empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let cols = rows[0].chars().count();
        let cells = rows
            .iter()
            .flat_map(|line| {
                line.chars().map(|ch| match ch {
                    'X' => Cell::Piece(Player::Red),
                    'O' => Cell::Piece(Player::Yellow),
                    _ => Cell::Empty,
                })
            })
            .collect::<Vec<_>>();
        assert_eq!(cells.len(), rows.len() * cols, "ragged board rows");
        Board {
            rows: rows.len(),
            cols,
            cells,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}", "---+".repeat(self.cols));
        writeln!(f, "{border}")?;
        for row in 0..self.rows {
            write!(f, "|")?;
            for cell in self.row(row) {
                let symbol = match cell {
                    Cell::Empty => ' ',
                    Cell::Piece(player) => player.symbol(),
                };
                write!(f, " {symbol} |")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{border}")?;
        let labels = (0..self.cols)
            .map(|col| format!("{col:^3}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, " {labels}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.valid_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Board::with_dimensions(0, 7),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 7 })
        );
        assert!(Board::with_dimensions(6, 0).is_err());
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(3, Player::Red).unwrap();
        assert_eq!(row, 5);
        assert_eq!(board.get(5, 3), Cell::Piece(Player::Red));

        let row = board.drop_piece(3, Player::Yellow).unwrap();
        assert_eq!(row, 4);
        assert_eq!(board.get(4, 3), Cell::Piece(Player::Yellow));
    }

    #[test]
    fn test_next_open_row_does_not_mutate() {
        let mut board = Board::new();
        assert_eq!(board.next_open_row(2), Some(5));
        assert_eq!(board.next_open_row(2), Some(5));
        board.drop_piece(2, Player::Red).unwrap();
        assert_eq!(board.next_open_row(2), Some(4));
        assert_eq!(board.next_open_row(7), None);
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, Player::Red).unwrap();
        }

        let before = board.clone();
        assert!(board.is_column_full(0));
        assert_eq!(board.next_open_row(0), None);
        assert_eq!(
            board.drop_piece(0, Player::Yellow),
            Err(InvalidMove::ColumnFull { column: 0 })
        );
        assert_eq!(board, before);
        assert_eq!(board.valid_moves(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(
            board.drop_piece(7, Player::Red),
            Err(InvalidMove::OutOfRange { column: 7, cols: 7 })
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_try_get_bounds() {
        let mut board = Board::with_dimensions(2, 3).unwrap();
        board.drop_piece(2, Player::Red).unwrap();
        assert_eq!(board.try_get(1, 2), Some(Cell::Piece(Player::Red)));
        assert_eq!(board.try_get(0, 0), Some(Cell::Empty));
        assert_eq!(board.try_get(2, 0), None);
        // Would alias into the next row if only the flat index were checked.
        assert_eq!(board.try_get(0, 3), None);
        assert_eq!(board.get(1, 2), Cell::Piece(Player::Red));
    }

    #[test]
    #[should_panic]
    fn test_get_off_board_column_panics() {
        Board::with_dimensions(2, 3).unwrap().get(0, 3);
    }

    #[test]
    fn test_gravity_holds_for_random_drops() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut board = Board::new();
            for turn in 0..60 {
                let col = rng.random_range(0..COLS + 2);
                let player = if turn % 2 == 0 { Player::Red } else { Player::Yellow };
                let _ = board.drop_piece(col, player);

                for c in 0..COLS {
                    let mut seen_piece = false;
                    for r in 0..ROWS {
                        let occupied = !board.get(r, c).is_empty();
                        assert!(
                            !seen_piece || occupied,
                            "gap below a piece in column {c} at row {r}"
                        );
                        seen_piece |= occupied;
                    }
                }
            }
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop_piece(col, Player::Red).unwrap();
        }
        assert!(board.is_win(Player::Red));
        assert!(!board.is_win(Player::Yellow));
    }

    #[test]
    fn test_horizontal_win_at_right_edge() {
        let board = Board::from_rows(&[
            ".......", ".......", ".......", ".......", ".......", "...OOOO",
        ]);
        assert!(board.is_win(Player::Yellow));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.drop_piece(0, Player::Yellow).unwrap();
        }
        // Occupies rows 2-5 of column 0
        assert_eq!(board.get(2, 0), Cell::Piece(Player::Yellow));
        assert!(board.is_win(Player::Yellow));
    }

    #[test]
    fn test_diagonal_up_win() {
        // (5,0) (4,1) (3,2) (2,3)
        let board = Board::from_rows(&[
            ".......", ".......", "...X...", "..X....", ".X.....", "X......",
        ]);
        assert!(board.is_win(Player::Red));
    }

    #[test]
    fn test_diagonal_down_win() {
        // (2,0) (3,1) (4,2) (5,3)
        let board = Board::from_rows(&[
            ".......", ".......", "O......", ".O.....", "..O....", "...O...",
        ]);
        assert!(board.is_win(Player::Yellow));
        assert!(!board.is_win(Player::Red));
    }

    #[test]
    fn test_diagonal_wins_built_by_drops() {
        let mut board = Board::new();
        board.drop_piece(0, Player::Red).unwrap();
        board.drop_piece(1, Player::Yellow).unwrap();
        board.drop_piece(1, Player::Red).unwrap();
        board.drop_piece(2, Player::Yellow).unwrap();
        board.drop_piece(2, Player::Yellow).unwrap();
        board.drop_piece(2, Player::Red).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        assert!(!board.is_win(Player::Red));
        board.drop_piece(3, Player::Red).unwrap();
        assert!(board.is_win(Player::Red));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.drop_piece(col, Player::Red).unwrap();
        }
        assert!(!board.is_win(Player::Red));
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        let board = Board::from_rows(&[
            ".......", ".......", ".......", ".......", ".......", "XXOXX..",
        ]);
        assert!(!board.is_win(Player::Red));
    }

    /// Full board with no four in a row anywhere
    const DRAWN: [&str; 6] = [
        "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX",
    ];

    #[test]
    fn test_draw_on_full_board_without_winner() {
        let board = Board::from_rows(&DRAWN);
        assert!(!board.is_win(Player::Red));
        assert!(!board.is_win(Player::Yellow));
        assert!(board.is_draw());
        assert!(board.valid_moves().is_empty());
    }

    #[test]
    fn test_one_open_cell_is_not_a_draw() {
        let mut rows = DRAWN;
        rows[0] = "XXOOXX.";
        let board = Board::from_rows(&rows);
        assert_eq!(board.piece_count(), 41);
        assert!(!board.is_draw());
        assert_eq!(board.valid_moves(), vec![6]);
    }

    #[test]
    fn test_small_boards_have_no_windows() {
        let board = Board::with_dimensions(3, 3).unwrap();
        assert_eq!(board.windows().count(), 0);
        assert!(!board.is_win(Player::Red));
    }

    #[test]
    fn test_window_counts_standard_board() {
        let board = Board::new();
        assert_eq!(board.windows_in(Direction::Horizontal).count(), 24);
        assert_eq!(board.windows_in(Direction::Vertical).count(), 21);
        assert_eq!(board.windows_in(Direction::DiagonalUp).count(), 12);
        assert_eq!(board.windows_in(Direction::DiagonalDown).count(), 12);
        assert_eq!(board.windows().count(), 69);
    }

    #[test]
    fn test_clear_resets_board() {
        let mut board = Board::new();
        board.drop_piece(3, Player::Red).unwrap();
        board.clear();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_grid() {
        let mut board = Board::with_dimensions(2, 3).unwrap();
        board.drop_piece(1, Player::Red).unwrap();
        board.drop_piece(1, Player::Yellow).unwrap();
        let expected = [
            "+---+---+---+",
            "|   | O |   |",
            "|   | X |   |",
            "+---+---+---+",
            "  0   1   2 ",
        ]
        .join("\n");
        assert_eq!(board.to_string(), expected);
    }
}
