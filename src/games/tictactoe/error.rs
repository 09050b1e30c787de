//! Error types for the tic-tac-toe board.

use super::position::Coords;
use super::types::Player;
use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// Reason a mark was rejected by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidMarkKind {
    /// The symbol is not one of the two marks.
    #[display("Unknown mark symbol {:?}", _0)]
    UnknownSymbol(char),

    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(Coords),

    /// The coordinates fall outside the 3x3 grid.
    #[display("Coordinates {} are out of range", _0)]
    OutOfRange(Coords),

    /// The game already has a winner.
    #[display("Game is already won by {:?}", _0)]
    GameOver(Player),
}

/// A mark could not be read or placed.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid mark: {} at {}:{}", kind, file, line)]
pub struct InvalidMark {
    /// What was wrong with the mark.
    pub kind: InvalidMarkKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidMark {
    /// Creates a new invalid-mark error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: InvalidMarkKind) -> Self {
        let loc = std::panic::Location::caller();
        warn!(%kind, "Mark rejected");
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Reason a textual move sequence failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidSequenceKind {
    /// The text does not have exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    Length(usize),

    /// A cell character is not `0`, `x` or `o`.
    #[display("Unknown cell symbol {:?}", _0)]
    Symbol(char),

    /// The mark counts cannot come from alternating moves led by this player.
    #[display("Mark counts do not fit {:?} moving first", _0)]
    TurnOrder(Player),

    /// Both players hold a line.
    #[display("Both players have three in a row")]
    BothWin,
}

/// A move sequence is malformed or cannot occur in play.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid sequence: {} at {}:{}", kind, file, line)]
pub struct InvalidSequence {
    /// What was wrong with the text.
    pub kind: InvalidSequenceKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidSequence {
    /// Creates a new parse error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: InvalidSequenceKind) -> Self {
        let loc = std::panic::Location::caller();
        warn!(%kind, "Sequence rejected");
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
