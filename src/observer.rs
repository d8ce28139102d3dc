use crate::board::{Color, Move, Square};
use crate::config::GameConfig;
use crate::game::{AppliedMove, GameError, GameState, MoveOutcome};
use crate::validator::RejectReason;

/// Hooks for whoever presents the game. All methods default to doing nothing.
pub trait GameObserver {
    /// Notified after a move has been applied
    fn on_move(&mut self, _applied: &AppliedMove) {}

    /// Notified when a request was refused; the game is unchanged
    fn on_rejected(&mut self, _mv: Move, _reason: RejectReason) {}

    /// Notified once per game, when the last opposing piece is taken
    fn on_game_over(&mut self, _winner: Color) {}

    /// Notified when a fresh game has been set up
    fn on_reset(&mut self) {}
}

/// A game plus the observers that want to hear about it.
pub struct Session {
    state: GameState,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::with_state(GameState::new(config))
    }

    pub fn with_state(state: GameState) -> Self {
        Session {
            state,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn attempt_move(
        &mut self,
        origin: Square,
        destination: Square,
    ) -> Result<MoveOutcome, GameError> {
        let outcome = self.state.attempt_move(origin, destination)?;

        for observer in &mut self.observers {
            match &outcome {
                MoveOutcome::Rejected(reason) => {
                    observer.on_rejected(Move::new(origin, destination), *reason)
                }
                MoveOutcome::Applied(applied) => observer.on_move(applied),
                MoveOutcome::GameOver { winner, last } => {
                    observer.on_move(last);
                    observer.on_game_over(*winner);
                }
            }
        }

        Ok(outcome)
    }

    pub fn reset(&mut self) {
        self.state.reset();
        for observer in &mut self.observers {
            observer.on_reset();
        }
    }
}
