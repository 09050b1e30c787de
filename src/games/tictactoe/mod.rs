//! Tic-tac-toe board model.

mod error;
mod position;
pub mod rules;
mod sequence;
mod types;

pub use error::{InvalidMark, InvalidMarkKind, InvalidSequence, InvalidSequenceKind};
pub use position::{Coords, Position};
pub use sequence::{EMPTY_SYMBOL, FIRST_MOVES, Sequence};
pub use types::{Board, BoardStatus, Player, Square};

/// Alias for clarity where the player is identified by its mark.
pub type Mark = Player;
