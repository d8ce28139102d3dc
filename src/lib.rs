pub mod board;
pub mod capture;
pub mod config;
pub mod diagonal;
pub mod game;
pub mod observer;
pub mod turn;
pub mod validator;

pub use board::*;
pub use config::*;
pub use game::*;
pub use observer::*;
pub use turn::*;
pub use validator::*;
