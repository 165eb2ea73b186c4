//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{game::GameResult, lines::LineAnalyzer};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. X maximizes, O minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// +1 for the maximizing player, -1 for the minimizing player
    pub fn sign(self) -> i32 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Parse "X" or "O" (case-insensitive)
    pub fn parse(s: &str) -> Result<Player, crate::Error> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(crate::Error::InvalidPlayerString {
                player: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A `(row, col)` coordinate on the board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceCount {
    pub x: usize,
    pub o: usize,
    pub empty: usize,
}

/// An N×N board stored row-major.
///
/// The board does not track whose turn it is; callers pass the player
/// explicitly to [`Board::place`]. Clones are deep and independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    dim: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `dim`×`dim` board
    pub fn new(dim: usize) -> Result<Self, crate::Error> {
        if dim == 0 {
            return Err(crate::Error::InvalidDimension { dim });
        }
        Ok(Board {
            dim,
            cells: vec![Cell::Empty; dim * dim],
        })
    }

    /// Create a board from a string of `.`, `X` and `O` characters.
    ///
    /// Whitespace is ignored, so rows may be separated by spaces or newlines.
    /// The number of cells must be a perfect square.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The cell count is zero or not a perfect square
    /// - Any character is not a valid cell representation
    /// - The piece counts differ by more than 1
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        let dim = (chars.len() as f64).sqrt().round() as usize;
        if dim == 0 || dim * dim != chars.len() {
            return Err(crate::Error::InvalidBoardLength {
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = Vec::with_capacity(chars.len());
        for (position, &character) in chars.iter().enumerate() {
            let cell = Cell::from_char(character).ok_or_else(|| {
                crate::Error::InvalidCellCharacter {
                    character,
                    position,
                    context: s.to_string(),
                }
            })?;
            cells.push(cell);
        }

        let board = Board { dim, cells };
        let count = board.piece_counts();
        if count.x.abs_diff(count.o) > 1 {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }
        Ok(board)
    }

    /// Side length of the board
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, mv: Move) -> Result<usize, crate::Error> {
        if mv.row >= self.dim || mv.col >= self.dim {
            return Err(crate::Error::OutOfBounds {
                row: mv.row,
                col: mv.col,
                dim: self.dim,
            });
        }
        Ok(mv.row * self.dim + mv.col)
    }

    /// Contents of the square at `(row, col)`
    pub fn square(&self, row: usize, col: usize) -> Result<Cell, crate::Error> {
        let idx = self.index(Move::new(row, col))?;
        Ok(self.cells[idx])
    }

    /// Whether `mv` is on the board and empty
    pub fn is_empty(&self, mv: Move) -> bool {
        self.index(mv)
            .map(|idx| self.cells[idx] == Cell::Empty)
            .unwrap_or(false)
    }

    /// All empty squares in row-major order
    pub fn empty_cells(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Move::new(i / self.dim, i % self.dim))
            .collect()
    }

    /// Place `player`'s mark at `mv`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] for coordinates off the board and
    /// [`crate::Error::InvalidMove`] if the square is occupied.
    pub fn place(&mut self, mv: Move, player: Player) -> Result<(), crate::Error> {
        let idx = self.index(mv)?;
        if self.cells[idx] != Cell::Empty {
            return Err(crate::Error::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }
        self.cells[idx] = player.to_cell();
        Ok(())
    }

    /// Clone the board and place a mark on the copy
    #[must_use = "with_move returns a new board; the original is unchanged"]
    pub fn with_move(&self, mv: Move, player: Player) -> Result<Board, crate::Error> {
        let mut next = self.clone();
        next.place(mv, player)?;
        Ok(next)
    }

    /// Count pieces on the board
    pub fn piece_counts(&self) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in &self.cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    /// Player to move inferred from piece counts, assuming X opened when
    /// counts are equal.
    pub fn next_player(&self) -> Player {
        let count = self.piece_counts();
        if count.x > count.o {
            Player::O
        } else {
            Player::X
        }
    }

    /// Check if a player owns a complete line
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, self.dim, player)
    }

    /// Winner if any
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Game result derived purely from the board contents
    pub fn terminal_result(&self) -> GameResult {
        if let Some(player) = self.winner() {
            GameResult::Win(player)
        } else if !self.cells.contains(&Cell::Empty) {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Squares where `player` would complete a line right now, row-major
    pub fn winning_moves(&self, player: Player) -> Vec<Move> {
        LineAnalyzer::winning_moves(&self.cells, self.dim, player)
            .into_iter()
            .map(|i| Move::new(i / self.dim, i % self.dim))
            .collect()
    }

    /// Owner of each square, `None` for empty squares
    pub fn owners(&self) -> impl Iterator<Item = (Move, Option<Player>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (Move::new(i / self.dim, i % self.dim), cell.to_player()))
    }

    /// Compact single-line encoding, e.g. `XO.......`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(self.dim) && i + 1 < self.cells.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
