//! Move legality for men and kings.
//!
//! Men step one square diagonally forward and capture by jumping a single
//! adjacent enemy in any diagonal direction. Kings slide any distance along an
//! open diagonal and capture "flying": exactly one enemy somewhere on the path,
//! every other square up to the landing square empty.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::board::{Board, Color, Rank, Square};
use crate::diagonal::{self, Direction, PathScan};

/// Why a move request was refused. Every variant is an ordinary, recoverable
/// outcome of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("no piece on the origin square")]
    NoPieceAtOrigin,
    #[error("it is not this piece's turn")]
    WrongTurn,
    #[error("the capturing piece on {0} must continue")]
    MustContinueCaptureFromSquare(Square),
    #[error("destination square is occupied")]
    DestinationOccupied,
    #[error("origin or destination is off the board")]
    OffBoard,
    #[error("move is not along a diagonal")]
    NotDiagonal,
    #[error("men only move forward unless capturing")]
    WrongDirectionForMan,
    #[error("men move one square, or two when capturing")]
    TooFarForMan,
    #[error("a friendly piece blocks the path")]
    PathBlocked,
    #[error("a capture needs exactly one enemy on the path")]
    NoOrMultipleEnemiesOnPath,
    #[error("game is already over")]
    GameAlreadyOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Legality {
    Illegal(RejectReason),
    SimpleMove,
    /// Squares of the pieces removed by this capture, in path order.
    Capture { captured: Vec<Square> },
}

impl Legality {
    pub fn is_capture(&self) -> bool {
        matches!(self, Legality::Capture { .. })
    }

    fn capture(square: Square) -> Self {
        Legality::Capture {
            captured: vec![square],
        }
    }
}

/// Decide whether the piece on `origin` may move to `destination`.
///
/// `mover` is the color expected to act; a piece of the other color yields
/// `WrongTurn`. Only the single given destination is checked.
pub fn is_legal(board: &Board, origin: Square, destination: Square, mover: Color) -> Legality {
    if !origin.is_on_board() || !destination.is_on_board() {
        return Legality::Illegal(RejectReason::OffBoard);
    }
    let Some(piece) = board.get(origin) else {
        return Legality::Illegal(RejectReason::NoPieceAtOrigin);
    };
    if piece.color != mover {
        return Legality::Illegal(RejectReason::WrongTurn);
    }
    if board.is_occupied(destination) {
        return Legality::Illegal(RejectReason::DestinationOccupied);
    }
    let Some((direction, distance)) = diagonal::alignment(origin, destination) else {
        return Legality::Illegal(RejectReason::NotDiagonal);
    };

    let verdict = match piece.rank {
        Rank::Man => man_move(board, origin, direction, distance, mover),
        Rank::King => king_move(board, origin, direction, distance, mover),
    };
    trace!(%origin, %destination, ?verdict, "validated");
    verdict
}

fn man_move(
    board: &Board,
    origin: Square,
    direction: Direction,
    distance: usize,
    mover: Color,
) -> Legality {
    match distance {
        1 if direction.dr == mover.forward() => Legality::SimpleMove,
        1 => Legality::Illegal(RejectReason::WrongDirectionForMan),
        2 => match diagonal::scan(board, origin, direction, distance, mover) {
            PathScan::OneEnemy(square) => Legality::capture(square),
            PathScan::BlockedByFriend(_) => Legality::Illegal(RejectReason::PathBlocked),
            PathScan::Clear | PathScan::BlockedBySecondEnemy(_) => {
                Legality::Illegal(RejectReason::NoOrMultipleEnemiesOnPath)
            }
        },
        _ => Legality::Illegal(RejectReason::TooFarForMan),
    }
}

fn king_move(
    board: &Board,
    origin: Square,
    direction: Direction,
    distance: usize,
    mover: Color,
) -> Legality {
    match diagonal::scan(board, origin, direction, distance, mover) {
        PathScan::Clear => Legality::SimpleMove,
        PathScan::OneEnemy(square) => Legality::capture(square),
        PathScan::BlockedByFriend(_) => Legality::Illegal(RejectReason::PathBlocked),
        PathScan::BlockedBySecondEnemy(_) => {
            Legality::Illegal(RejectReason::NoOrMultipleEnemiesOnPath)
        }
    }
}
