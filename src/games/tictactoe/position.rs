//! Board addressing: row-major positions and `(row, col)` coordinates.

use super::error::{InvalidMark, InvalidMarkKind};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the tic-tac-toe board (0-8, row-major).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the `(row, col)` coordinates of this position.
    pub fn coords(self) -> Coords {
        let index = self.to_index();
        Coords::new(index / 3, index % 3)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Row and column of a cell. Both must be in `0..3` to address the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("({row}, {col})")]
pub struct Coords {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Coords {
    /// Creates coordinates without range checking.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Resolves the coordinates to a board position.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMarkKind::OutOfRange`] if either component is 3 or more.
    #[track_caller]
    #[instrument]
    pub fn to_position(self) -> Result<Position, InvalidMark> {
        if self.row >= 3 || self.col >= 3 {
            return Err(InvalidMark::new(InvalidMarkKind::OutOfRange(self)));
        }
        Position::from_index(self.row * 3 + self.col)
            .ok_or_else(|| InvalidMark::new(InvalidMarkKind::OutOfRange(self)))
    }
}

impl From<(usize, usize)> for Coords {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Position> for Coords {
    fn from(pos: Position) -> Self {
        pos.coords()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_index_round_trip() {
        for (index, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), index);
            assert_eq!(Position::from_index(index), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_coords_resolve_row_major() {
        assert_eq!(Coords::new(0, 0).to_position().unwrap(), Position::TopLeft);
        assert_eq!(Coords::new(1, 1).to_position().unwrap(), Position::Center);
        assert_eq!(Coords::new(2, 1).to_position().unwrap(), Position::BottomCenter);
        assert_eq!(Position::MiddleRight.coords(), Coords::new(1, 2));
    }

    #[test]
    fn test_coords_out_of_range() {
        for coords in [Coords::new(3, 0), Coords::new(0, 3), Coords::new(7, 7)] {
            let err = coords.to_position().unwrap_err();
            assert_eq!(err.kind, InvalidMarkKind::OutOfRange(coords));
        }
    }
}
