//! Diagonal geometry and the path scan shared by move validation, capture
//! resolution and continuation checks.

use crate::board::{Board, Color, Square};

/// One of the four diagonal unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dc: i32,
    pub dr: i32,
}

pub const DIAGONALS: [Direction; 4] = [
    Direction { dc: 1, dr: 1 },
    Direction { dc: -1, dr: 1 },
    Direction { dc: 1, dr: -1 },
    Direction { dc: -1, dr: -1 },
];

impl Direction {
    pub fn step(&self, from: Square, distance: usize) -> Option<Square> {
        let distance = distance as i32;
        from.offset(self.dc * distance, self.dr * distance)
    }
}

/// Unit direction and number of steps from `from` to `to`, or `None` when
/// the two squares are not diagonally aligned.
pub fn alignment(from: Square, to: Square) -> Option<(Direction, usize)> {
    let dc = to.col as i32 - from.col as i32;
    let dr = to.row as i32 - from.row as i32;
    if dc == 0 || dc.abs() != dr.abs() {
        return None;
    }
    Some((
        Direction {
            dc: dc.signum(),
            dr: dr.signum(),
        },
        dc.unsigned_abs() as usize,
    ))
}

/// What lies strictly between the two ends of a diagonal walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathScan {
    Clear,
    OneEnemy(Square),
    /// Walk stopped at a piece of the mover's own color.
    BlockedByFriend(Square),
    /// Walk stopped at an enemy with another enemy already behind it.
    BlockedBySecondEnemy(Square),
}

/// Walk outward from `from` along `direction`, classifying the `distance - 1`
/// intermediate squares. Stops at the first friendly piece or second enemy.
pub fn scan(
    board: &Board,
    from: Square,
    direction: Direction,
    distance: usize,
    mover: Color,
) -> PathScan {
    let mut enemy = None;

    for step in 1..distance {
        let Some(square) = direction.step(from, step) else {
            break;
        };
        let Some(piece) = board.get(square) else {
            continue;
        };

        if piece.color == mover {
            return PathScan::BlockedByFriend(square);
        }
        if enemy.is_some() {
            return PathScan::BlockedBySecondEnemy(square);
        }
        enemy = Some(square);
    }

    match enemy {
        Some(square) => PathScan::OneEnemy(square),
        None => PathScan::Clear,
    }
}
