use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Board size constant
pub const BOARD_SIZE: usize = 8;

/// Rows of men each side starts with
const STARTING_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(&self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Row delta of a forward step: Black moves down the board, White up.
    pub fn forward(&self) -> i32 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// The row on which a man of this color is crowned.
    pub fn promotion_row(&self) -> usize {
        match self {
            Color::Black => BOARD_SIZE - 1,
            Color::White => 0,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub col: usize,
    pub row: usize,
}

impl Square {
    pub fn new(col: usize, row: usize) -> Self {
        Square { col, row }
    }

    pub fn is_on_board(&self) -> bool {
        self.col < BOARD_SIZE && self.row < BOARD_SIZE
    }

    /// Square reached by stepping `(dc, dr)`, or `None` if it leaves the board.
    pub fn offset(&self, dc: i32, dr: i32) -> Option<Square> {
        let col = self.col as i32 + dc;
        let row = self.row as i32 + dr;
        if col < 0 || row < 0 || col >= BOARD_SIZE as i32 || row >= BOARD_SIZE as i32 {
            return None;
        }
        Some(Square::new(col as usize, row as usize))
    }

    /// Dark squares, the only ones men are set up on.
    pub fn is_playable(&self) -> bool {
        (self.col + self.row) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
    pub square: Square,
}

impl Piece {
    pub fn man(color: Color, square: Square) -> Self {
        Piece {
            color,
            rank: Rank::Man,
            square,
        }
    }

    pub fn king(color: Color, square: Square) -> Self {
        Piece {
            color,
            rank: Rank::King,
            square,
        }
    }

    pub fn is_king(&self) -> bool {
        self.rank == Rank::King
    }

    fn symbol(&self) -> char {
        match (self.color, self.rank) {
            (Color::Black, Rank::Man) => 'b',
            (Color::Black, Rank::King) => 'B',
            (Color::White, Rank::Man) => 'w',
            (Color::White, Rank::King) => 'W',
        }
    }
}

/// A requested move: the piece on `from` goes to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Faults in board bookkeeping. These indicate engine bugs or a bad custom
/// setup, never an ordinary illegal move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is off the board")]
    OffBoard(Square),
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("no piece on square {0}")]
    Empty(Square),
    #[error("piece stored on {key} believes it stands on {stored}")]
    Drift { key: Square, stored: Square },
}

/// 8x8 grid holding at most one piece per square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Standard start: 12 black men on rows 0-2, 12 white men on rows 5-7,
    /// all on dark squares.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            let color = if row < STARTING_ROWS {
                Color::Black
            } else if row >= BOARD_SIZE - STARTING_ROWS {
                Color::White
            } else {
                continue;
            };
            for col in 0..BOARD_SIZE {
                let square = Square::new(col, row);
                if square.is_playable() {
                    board.cells[row][col] = Some(Piece::man(color, square));
                }
            }
        }
        board
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        if square.is_on_board() {
            self.cells[square.row][square.col]
        } else {
            None
        }
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// Put a new piece on an empty square.
    pub fn place(&mut self, color: Color, rank: Rank, square: Square) -> Result<(), BoardError> {
        if !square.is_on_board() {
            return Err(BoardError::OffBoard(square));
        }
        if self.is_occupied(square) {
            return Err(BoardError::Occupied(square));
        }
        self.cells[square.row][square.col] = Some(Piece {
            color,
            rank,
            square,
        });
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        if !square.is_on_board() {
            return None;
        }
        self.cells[square.row][square.col].take()
    }

    /// Move the piece on `from` to the empty square `to`, keeping its stored
    /// square in step with its key.
    pub fn relocate(&mut self, from: Square, to: Square) -> Result<Piece, BoardError> {
        if !to.is_on_board() {
            return Err(BoardError::OffBoard(to));
        }
        if self.is_occupied(to) {
            return Err(BoardError::Occupied(to));
        }
        let mut piece = self.remove(from).ok_or(BoardError::Empty(from))?;
        piece.square = to;
        self.cells[to.row][to.col] = Some(piece);
        Ok(piece)
    }

    /// Crown the piece on `square`. Returns whether its rank changed.
    pub fn crown(&mut self, square: Square) -> Result<bool, BoardError> {
        if !square.is_on_board() {
            return Err(BoardError::OffBoard(square));
        }
        match self.cells[square.row][square.col].as_mut() {
            Some(piece) if piece.rank == Rank::Man => {
                piece.rank = Rank::King;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(BoardError::Empty(square)),
        }
    }

    /// All pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|piece| piece.color == color).count()
    }

    pub fn len(&self) -> usize {
        self.pieces().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn check_invariants(&self) -> Result<(), BoardError> {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let key = Square::new(col, row);
                if let Some(piece) = self.cells[row][col] {
                    if piece.square != key {
                        return Err(BoardError::Drift {
                            key,
                            stored: piece.square,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:2} ", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{:2} ", row)?;
            for col in 0..BOARD_SIZE {
                let c = match self.get(Square::new(col, row)) {
                    Some(piece) => piece.symbol(),
                    None => '.',
                };
                write!(f, " {} ", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
