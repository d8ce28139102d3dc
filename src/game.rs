use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, BoardError, Color, Move, Piece, Square};
use crate::capture;
use crate::config::GameConfig;
use crate::turn::{Step, TurnController, TurnState};
use crate::validator::{self, Legality, RejectReason};

/// Faults that mean the engine itself is broken. Illegal moves are never
/// reported this way; see [`MoveOutcome::Rejected`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board invariant violated: {0}")]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("move {index} ({mv}) rejected: {reason}")]
    Rejected {
        index: usize,
        mv: Move,
        reason: RejectReason,
    },
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub mv: Move,
    pub captured: Vec<Square>,
    pub promoted: bool,
    /// The same piece must capture again before the turn passes.
    pub must_continue: bool,
}

impl AppliedMove {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Rejected(RejectReason),
    Applied(AppliedMove),
    /// The move took the opponent's last piece.
    GameOver { winner: Color, last: AppliedMove },
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    pub fn applied(&self) -> Option<&AppliedMove> {
        match self {
            MoveOutcome::Rejected(_) => None,
            MoveOutcome::Applied(applied) | MoveOutcome::GameOver { last: applied, .. } => {
                Some(applied)
            }
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            MoveOutcome::GameOver { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

/// Everything a renderer needs to draw the current position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pieces: Vec<Piece>,
    pub to_move: Color,
    pub capture_lock: Option<Square>,
    pub winner: Option<Color>,
}

enum Admitted {
    Simple,
    Capture(Vec<Square>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: TurnController,
    winner: Option<Color>,
    config: GameConfig,
    move_count: usize,
    history: Vec<Move>,
}

impl GameState {
    /// Create a new game in the standard starting position
    pub fn new(config: GameConfig) -> Self {
        GameState {
            board: Board::standard(),
            turn: TurnController::new(),
            winner: None,
            config,
            move_count: 0,
            history: Vec::new(),
        }
    }

    /// Start from a custom position with `to_move` to play.
    pub fn from_board(board: Board, to_move: Color, config: GameConfig) -> Result<Self, GameError> {
        board.check_invariants()?;
        Ok(GameState {
            board,
            turn: TurnController::starting_with(to_move),
            winner: None,
            config,
            move_count: 0,
            history: Vec::new(),
        })
    }

    /// Play `moves` from the starting position, stopping at the first one
    /// that is not accepted.
    pub fn replay(config: GameConfig, moves: &[Move]) -> Result<Self, ReplayError> {
        let mut state = GameState::new(config);
        for (index, &mv) in moves.iter().enumerate() {
            if let MoveOutcome::Rejected(reason) = state.attempt_move(mv.from, mv.to)? {
                return Err(ReplayError::Rejected { index, mv, reason });
            }
        }
        Ok(state)
    }

    /// Back to the standard start with Black to move.
    pub fn reset(&mut self) {
        info!(moves = self.move_count, "new game");
        self.board = Board::standard();
        self.turn = TurnController::new();
        self.winner = None;
        self.move_count = 0;
        self.history.clear();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.board.pieces()
    }

    pub fn to_move(&self) -> Color {
        self.turn.actor()
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn.state()
    }

    pub fn capture_lock(&self) -> Option<Square> {
        self.turn.lock()
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pieces: self.pieces().collect(),
            to_move: self.to_move(),
            capture_lock: self.capture_lock(),
            winner: self.winner,
        }
    }

    /// Try to move the piece on `origin` to `destination`.
    ///
    /// Illegal requests come back as `Ok(MoveOutcome::Rejected(..))` and leave
    /// the game untouched. `Err` is reserved for broken board invariants.
    pub fn attempt_move(
        &mut self,
        origin: Square,
        destination: Square,
    ) -> Result<MoveOutcome, GameError> {
        let mv = Move::new(origin, destination);
        let admitted = match self.admit(mv) {
            Ok(admitted) => admitted,
            Err(reason) => {
                debug!(%mv, %reason, "move rejected");
                return Ok(MoveOutcome::Rejected(reason));
            }
        };

        // The live board only changes once every step below has succeeded
        let mut board = self.board.clone();
        let (captured, promoted, step) = match admitted {
            Admitted::Simple => {
                let promoted = capture::apply_simple(&mut board, origin, destination)?;
                (Vec::new(), promoted, Step::Simple)
            }
            Admitted::Capture(captured) => {
                let applied = capture::apply(&mut board, origin, destination, &captured)?;
                let further = capture::has_further_capture(&board, destination);
                let step = Step::Capture {
                    destination,
                    further,
                };
                (applied.captured, applied.promoted, step)
            }
        };
        debug_assert!(board.check_invariants().is_ok());

        let mover = self.turn.actor();
        self.board = board;
        self.turn.advance(step);
        self.move_count += 1;
        if self.config.record_history {
            self.history.push(mv);
        }

        let applied = AppliedMove {
            mv,
            captured,
            promoted,
            must_continue: self.turn.lock().is_some(),
        };

        if self.board.count(mover.opponent()) == 0 {
            info!(winner = %mover, moves = self.move_count, "game over");
            self.winner = Some(mover);
            if self.config.auto_reset {
                self.reset();
            }
            return Ok(MoveOutcome::GameOver {
                winner: mover,
                last: applied,
            });
        }

        Ok(MoveOutcome::Applied(applied))
    }

    fn admit(&self, mv: Move) -> Result<Admitted, RejectReason> {
        if self.is_game_over() {
            return Err(RejectReason::GameAlreadyOver);
        }
        if !mv.from.is_on_board() || !mv.to.is_on_board() {
            return Err(RejectReason::OffBoard);
        }
        let piece = self
            .board
            .get(mv.from)
            .ok_or(RejectReason::NoPieceAtOrigin)?;
        self.turn.check_origin(mv.from, piece.color)?;
        if self.board.is_occupied(mv.to) {
            return Err(RejectReason::DestinationOccupied);
        }

        let admitted = match validator::is_legal(&self.board, mv.from, mv.to, piece.color) {
            Legality::Illegal(reason) => return Err(reason),
            Legality::SimpleMove => Admitted::Simple,
            Legality::Capture { captured } => Admitted::Capture(captured),
        };
        self.turn
            .check_capture_required(matches!(admitted, Admitted::Capture(_)))?;
        Ok(admitted)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
