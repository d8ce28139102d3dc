use checkers_engine::*;
use tracing_subscriber::EnvFilter;

/// A short opening with one deliberately illegal request.
const OPENING: [((usize, usize), (usize, usize)); 5] = [
    ((1, 2), (2, 3)),
    ((4, 5), (3, 4)),
    ((2, 3), (2, 4)),
    ((2, 3), (4, 5)),
    ((5, 6), (3, 4)),
];

struct ConsoleObserver;

impl GameObserver for ConsoleObserver {
    fn on_move(&mut self, applied: &AppliedMove) {
        print!("  played {}", applied.mv);
        if applied.is_capture() {
            print!(", captured {:?}", applied.captured);
        }
        if applied.promoted {
            print!(", crowned");
        }
        println!();
    }

    fn on_rejected(&mut self, mv: Move, reason: RejectReason) {
        println!("  rejected {}: {}", mv, reason);
    }

    fn on_game_over(&mut self, winner: Color) {
        println!("  {} wins!", winner);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    println!("Checkers Engine - Scripted Opening");
    println!("==================================\n");

    let mut session = Session::new(config);
    session.add_observer(Box::new(ConsoleObserver));
    println!("{}", session.state().board());

    for ((from_col, from_row), (to_col, to_row)) in OPENING {
        println!("{} to move:", session.state().to_move());
        let outcome = session.attempt_move(
            Square::new(from_col, from_row),
            Square::new(to_col, to_row),
        )?;
        if outcome.is_applied() {
            println!("{}", session.state().board());
        }
    }

    let state = session.state();
    println!("==================================");
    println!(
        "Black {} / White {} after {} moves, {} to move",
        state.board().count(Color::Black),
        state.board().count(Color::White),
        state.move_count(),
        state.to_move()
    );

    Ok(())
}
