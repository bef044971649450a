pub mod board;
pub mod game;
pub mod notation;

pub use board::*;
pub use game::*;
