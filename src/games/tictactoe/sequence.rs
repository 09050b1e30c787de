//! Move sequences: the fixed nine-cell encoding of a board.
//!
//! The textual form is nine characters in row-major order, `0` for an empty
//! cell and `x`/`o` for the marks, e.g. `x000o0000`. Sequences identify nodes
//! in the search tree, so they are `Copy` values with exact equality.

use super::error::{InvalidSequence, InvalidSequenceKind};
use super::position::Position;
use super::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Symbol for an empty cell in the textual encoding.
pub const EMPTY_SYMBOL: char = '0';

/// Opening moves considered from the empty board. Every other opening is a
/// rotation or reflection of one of these.
pub const FIRST_MOVES: [Position; 3] = [Position::TopLeft, Position::TopCenter, Position::Center];

/// Row-major encoding of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sequence {
    cells: [Square; 9],
}

impl Sequence {
    /// The empty board.
    pub const EMPTY: Sequence = Sequence {
        cells: [Square::Empty; 9],
    };

    /// Returns the cells in row-major order.
    pub fn cells(&self) -> &[Square; 9] {
        &self.cells
    }

    /// Number of marks placed so far, i.e. the ply of this position.
    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Square::Empty).count()
    }

    /// True if no mark has been placed.
    pub fn is_empty_board(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Decodes the sequence into a board.
    pub fn to_board(&self) -> Board {
        let mut board = Board::new();
        for (pos, cell) in Position::ALL.into_iter().zip(self.cells) {
            board.set(pos, cell);
        }
        board
    }

    /// Copy of this sequence with `mark` written at `pos`.
    fn with_mark(mut self, pos: Position, mark: Player) -> Self {
        self.cells[pos.to_index()] = Square::Occupied(mark);
        self
    }

    /// Every sequence reachable by placing `mark` on one empty cell, in
    /// increasing position order.
    ///
    /// From the empty board only the three [`FIRST_MOVES`] are produced.
    pub fn successors(&self, mark: Player) -> Vec<Sequence> {
        if self.is_empty_board() {
            return FIRST_MOVES
                .into_iter()
                .map(|pos| self.with_mark(pos, mark))
                .collect();
        }

        Position::ALL
            .into_iter()
            .filter(|pos| self.cells[pos.to_index()] == Square::Empty)
            .map(|pos| self.with_mark(pos, mark))
            .collect()
    }

    /// Checks that the marks could have been placed alternately, `first`
    /// moving first, without both players completing a line.
    ///
    /// # Errors
    ///
    /// [`InvalidSequenceKind::TurnOrder`] or [`InvalidSequenceKind::BothWin`].
    #[track_caller]
    pub fn check_turn_order(&self, first: Player) -> Result<(), InvalidSequence> {
        let count = |player: Player| {
            self.cells
                .iter()
                .filter(|cell| **cell == Square::Occupied(player))
                .count()
        };
        let (leading, trailing) = (count(first), count(first.opponent()));
        if leading != trailing && leading != trailing + 1 {
            return Err(InvalidSequence::new(InvalidSequenceKind::TurnOrder(first)));
        }

        let board = self.to_board();
        if board.has_won(Player::X) && board.has_won(Player::O) {
            return Err(InvalidSequence::new(InvalidSequenceKind::BothWin));
        }
        Ok(())
    }

    /// The single position filled in `next` that is empty here, if `next`
    /// differs from this sequence by exactly one new mark.
    pub fn move_to(&self, next: &Sequence) -> Option<Position> {
        let mut changed = Position::ALL
            .into_iter()
            .filter(|pos| self.cells[pos.to_index()] != next.cells[pos.to_index()]);
        let pos = changed.next()?;
        if changed.next().is_some() || self.cells[pos.to_index()] != Square::Empty {
            return None;
        }
        Some(pos)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<&Board> for Sequence {
    fn from(board: &Board) -> Self {
        Self {
            cells: *board.squares(),
        }
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in self.cells {
            let symbol = match cell {
                Square::Empty => EMPTY_SYMBOL,
                Square::Occupied(player) => player.symbol(),
            };
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = InvalidSequence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != 9 {
            return Err(InvalidSequence::new(InvalidSequenceKind::Length(count)));
        }

        let mut cells = [Square::Empty; 9];
        for (cell, symbol) in cells.iter_mut().zip(s.chars()) {
            *cell = match symbol.to_ascii_lowercase() {
                EMPTY_SYMBOL => Square::Empty,
                'x' => Square::Occupied(Player::X),
                'o' => Square::Occupied(Player::O),
                _ => return Err(InvalidSequence::new(InvalidSequenceKind::Symbol(symbol))),
            };
        }
        Ok(Self { cells })
    }
}

impl TryFrom<&str> for Sequence {
    type Error = InvalidSequence;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for Sequence {
    type Error = InvalidSequence;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Sequence> for String {
    fn from(sequence: Sequence) -> Self {
        sequence.to_string()
    }
}
