//! Applying validated moves: removals, relocation, promotion and the
//! continuation check that drives the capture lock.

use serde::{Deserialize, Serialize};

use crate::board::{BOARD_SIZE, Board, BoardError, Rank, Square};
use crate::diagonal::DIAGONALS;
use crate::validator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCapture {
    pub captured: Vec<Square>,
    pub promoted: bool,
}

/// Remove every captured piece, then move the capturer and promote it if it
/// landed on its back rank.
pub fn apply(
    board: &mut Board,
    origin: Square,
    destination: Square,
    captured: &[Square],
) -> Result<AppliedCapture, BoardError> {
    for &square in captured {
        board.remove(square).ok_or(BoardError::Empty(square))?;
    }
    let promoted = apply_simple(board, origin, destination)?;

    Ok(AppliedCapture {
        captured: captured.to_vec(),
        promoted,
    })
}

/// Move a piece without capturing. Returns whether it was promoted.
pub fn apply_simple(
    board: &mut Board,
    origin: Square,
    destination: Square,
) -> Result<bool, BoardError> {
    board.relocate(origin, destination)?;
    promote(board, destination)
}

/// Crown the man on `square` if it stands on its color's back rank.
pub fn promote(board: &mut Board, square: Square) -> Result<bool, BoardError> {
    let piece = board.get(square).ok_or(BoardError::Empty(square))?;
    if piece.rank == Rank::Man && square.row == piece.color.promotion_row() {
        board.crown(square)
    } else {
        Ok(false)
    }
}

/// Whether the piece on `square` has any legal capture from where it stands.
/// Must be called on the board with the previous capture already applied.
pub fn has_further_capture(board: &Board, square: Square) -> bool {
    let Some(piece) = board.get(square) else {
        return false;
    };

    DIAGONALS.iter().any(|direction| {
        (1..BOARD_SIZE)
            .map_while(|distance| direction.step(square, distance))
            .filter(|landing| !board.is_occupied(*landing))
            .any(|landing| validator::is_legal(board, square, landing, piece.color).is_capture())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece};

    fn sq(col: usize, row: usize) -> Square {
        Square::new(col, row)
    }

    fn board_with(pieces: &[(Color, Rank, Square)]) -> Board {
        let mut board = Board::empty();
        for &(color, rank, square) in pieces {
            board.place(color, rank, square).unwrap();
        }
        board
    }

    #[test]
    fn test_apply_removes_captured_and_moves_capturer() {
        let mut board = board_with(&[
            (Color::Black, Rank::Man, sq(1, 2)),
            (Color::White, Rank::Man, sq(2, 3)),
            (Color::White, Rank::Man, sq(6, 7)),
        ]);

        let applied = apply(&mut board, sq(1, 2), sq(3, 4), &[sq(2, 3)]).unwrap();

        assert_eq!(applied.captured, vec![sq(2, 3)]);
        assert!(!applied.promoted);
        assert_eq!(board.get(sq(2, 3)), None);
        assert_eq!(board.get(sq(1, 2)), None);
        assert_eq!(board.get(sq(3, 4)), Some(Piece::man(Color::Black, sq(3, 4))));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_apply_fails_on_missing_capture_target() {
        let mut board = board_with(&[(Color::Black, Rank::Man, sq(1, 2))]);

        assert_eq!(
            apply(&mut board, sq(1, 2), sq(3, 4), &[sq(2, 3)]),
            Err(BoardError::Empty(sq(2, 3)))
        );
    }

    #[test]
    fn test_capture_into_back_rank_promotes() {
        let mut board = board_with(&[
            (Color::Black, Rank::Man, sq(2, 5)),
            (Color::White, Rank::Man, sq(3, 6)),
        ]);

        let applied = apply(&mut board, sq(2, 5), sq(4, 7), &[sq(3, 6)]).unwrap();

        assert!(applied.promoted);
        assert_eq!(board.get(sq(4, 7)), Some(Piece::king(Color::Black, sq(4, 7))));
    }

    #[test]
    fn test_simple_move_promotion() {
        let mut board = board_with(&[
            (Color::White, Rank::Man, sq(2, 1)),
            (Color::White, Rank::Man, sq(5, 4)),
            (Color::White, Rank::King, sq(4, 1)),
        ]);

        assert_eq!(apply_simple(&mut board, sq(2, 1), sq(1, 0)), Ok(true));
        assert!(board.get(sq(1, 0)).unwrap().is_king());

        assert_eq!(apply_simple(&mut board, sq(5, 4), sq(4, 3)), Ok(false));
        // Kings are never promoted again
        assert_eq!(apply_simple(&mut board, sq(4, 1), sq(3, 0)), Ok(false));
    }

    #[test]
    fn test_further_capture_for_man() {
        let board = board_with(&[
            (Color::Black, Rank::Man, sq(3, 4)),
            (Color::White, Rank::Man, sq(4, 5)),
        ]);
        assert!(has_further_capture(&board, sq(3, 4)));

        // Backwards jumps count too
        let board = board_with(&[
            (Color::Black, Rank::Man, sq(3, 4)),
            (Color::White, Rank::Man, sq(2, 3)),
        ]);
        assert!(has_further_capture(&board, sq(3, 4)));

        // Landing square taken
        let board = board_with(&[
            (Color::Black, Rank::Man, sq(3, 4)),
            (Color::White, Rank::Man, sq(4, 5)),
            (Color::White, Rank::Man, sq(5, 6)),
        ]);
        assert!(!has_further_capture(&board, sq(3, 4)));
    }

    #[test]
    fn test_further_capture_uses_post_capture_board() {
        let mut board = board_with(&[
            (Color::Black, Rank::Man, sq(1, 2)),
            (Color::White, Rank::Man, sq(2, 3)),
            (Color::White, Rank::Man, sq(7, 0)),
        ]);

        // Before the capture lands, jumping back over (2,3) would look legal
        board.relocate(sq(1, 2), sq(3, 4)).unwrap();
        assert!(has_further_capture(&board, sq(3, 4)));
        board.relocate(sq(3, 4), sq(1, 2)).unwrap();

        apply(&mut board, sq(1, 2), sq(3, 4), &[sq(2, 3)]).unwrap();
        assert!(!has_further_capture(&board, sq(3, 4)));
    }

    #[test]
    fn test_further_capture_for_king_at_distance() {
        let board = board_with(&[
            (Color::White, Rank::King, sq(0, 7)),
            (Color::Black, Rank::Man, sq(4, 3)),
        ]);
        assert!(has_further_capture(&board, sq(0, 7)));

        // Enemy backed by a second enemy leaves no landing square
        let board = board_with(&[
            (Color::White, Rank::King, sq(0, 7)),
            (Color::Black, Rank::Man, sq(4, 3)),
            (Color::Black, Rank::Man, sq(5, 2)),
        ]);
        assert!(!has_further_capture(&board, sq(0, 7)));

        // A man in the same spot is too far away to capture
        let board = board_with(&[
            (Color::White, Rank::Man, sq(0, 7)),
            (Color::Black, Rank::Man, sq(4, 3)),
        ]);
        assert!(!has_further_capture(&board, sq(0, 7)));
    }

    #[test]
    fn test_no_further_capture_on_empty_square() {
        assert!(!has_further_capture(&Board::empty(), sq(3, 4)));
    }
}
