use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Color, Square};
use crate::validator::RejectReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingMove(Color),
    /// The piece on the square just captured and has another capture available.
    MustContinueCapture(Color, Square),
}

/// What an applied move did, as far as turn order is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Simple,
    Capture { destination: Square, further: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnController {
    state: TurnState,
}

impl TurnController {
    /// Black moves first.
    pub fn new() -> Self {
        Self::starting_with(Color::Black)
    }

    pub fn starting_with(color: Color) -> Self {
        TurnController {
            state: TurnState::AwaitingMove(color),
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn actor(&self) -> Color {
        match self.state {
            TurnState::AwaitingMove(color) | TurnState::MustContinueCapture(color, _) => color,
        }
    }

    pub fn lock(&self) -> Option<Square> {
        match self.state {
            TurnState::AwaitingMove(_) => None,
            TurnState::MustContinueCapture(_, square) => Some(square),
        }
    }

    /// Check that a piece of `color` on `origin` may act now.
    pub fn check_origin(&self, origin: Square, color: Color) -> Result<(), RejectReason> {
        if color != self.actor() {
            return Err(RejectReason::WrongTurn);
        }
        match self.lock() {
            Some(locked) if locked != origin => {
                Err(RejectReason::MustContinueCaptureFromSquare(locked))
            }
            _ => Ok(()),
        }
    }

    /// While locked, only another capture is acceptable.
    pub fn check_capture_required(&self, is_capture: bool) -> Result<(), RejectReason> {
        match self.lock() {
            Some(locked) if !is_capture => Err(RejectReason::MustContinueCaptureFromSquare(locked)),
            _ => Ok(()),
        }
    }

    pub fn advance(&mut self, step: Step) {
        let actor = self.actor();
        self.state = match step {
            Step::Capture {
                destination,
                further: true,
            } => {
                debug!(%actor, %destination, "capture lock engaged");
                TurnState::MustContinueCapture(actor, destination)
            }
            Step::Simple | Step::Capture { further: false, .. } => {
                TurnState::AwaitingMove(actor.opponent())
            }
        };
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_moves_first() {
        let turn = TurnController::new();
        assert_eq!(turn.state(), TurnState::AwaitingMove(Color::Black));
        assert_eq!(turn.lock(), None);
    }

    #[test]
    fn test_simple_move_passes_turn() {
        let mut turn = TurnController::new();
        turn.advance(Step::Simple);
        assert_eq!(turn.state(), TurnState::AwaitingMove(Color::White));
        turn.advance(Step::Simple);
        assert_eq!(turn.state(), TurnState::AwaitingMove(Color::Black));
    }

    #[test]
    fn test_capture_chain() {
        let mut turn = TurnController::new();
        let first = Square::new(3, 4);
        let second = Square::new(5, 6);

        turn.advance(Step::Capture {
            destination: first,
            further: true,
        });
        assert_eq!(turn.state(), TurnState::MustContinueCapture(Color::Black, first));

        turn.advance(Step::Capture {
            destination: second,
            further: true,
        });
        assert_eq!(turn.state(), TurnState::MustContinueCapture(Color::Black, second));

        turn.advance(Step::Capture {
            destination: Square::new(3, 6),
            further: false,
        });
        assert_eq!(turn.state(), TurnState::AwaitingMove(Color::White));
    }

    #[test]
    fn test_check_origin() {
        let mut turn = TurnController::new();
        let locked = Square::new(3, 4);

        assert_eq!(turn.check_origin(Square::new(1, 2), Color::Black), Ok(()));
        assert_eq!(
            turn.check_origin(Square::new(0, 5), Color::White),
            Err(RejectReason::WrongTurn)
        );

        turn.advance(Step::Capture {
            destination: locked,
            further: true,
        });
        assert_eq!(turn.check_origin(locked, Color::Black), Ok(()));
        assert_eq!(
            turn.check_origin(Square::new(1, 2), Color::Black),
            Err(RejectReason::MustContinueCaptureFromSquare(locked))
        );
        assert_eq!(
            turn.check_capture_required(false),
            Err(RejectReason::MustContinueCaptureFromSquare(locked))
        );
        assert_eq!(turn.check_capture_required(true), Ok(()));
    }
}
