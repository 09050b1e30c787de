//! Core domain types for tic-tac-toe.

use super::error::{InvalidMark, InvalidMarkKind};
use super::position::{Coords, Position};
use super::rules;
use super::sequence::Sequence;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Player in the game, identified by the mark they place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Lower-case symbol used in move sequences.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }

    /// Parses a mark symbol. Case is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMarkKind::UnknownSymbol`] for anything but `x` or `o`.
    #[track_caller]
    pub fn from_symbol(symbol: char) -> Result<Self, InvalidMark> {
        match symbol.to_ascii_lowercase() {
            'x' => Ok(Player::X),
            'o' => Ok(Player::O),
            _ => Err(InvalidMark::new(InvalidMarkKind::UnknownSymbol(symbol))),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol().to_ascii_uppercase())
    }
}

impl TryFrom<char> for Player {
    type Error = InvalidMark;

    #[track_caller]
    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Self::from_symbol(symbol)
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// Classification of a board, always derived from its squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardStatus {
    /// No mark has been placed yet.
    NotStarted,
    /// Marks have been placed and the game is undecided.
    InProgress,
    /// The player has three in a row.
    Won(Player),
    /// The board is full with no winner.
    Draw,
}

impl BoardStatus {
    /// True for a win or a draw.
    pub fn is_terminal(self) -> bool {
        matches!(self, BoardStatus::Won(_) | BoardStatus::Draw)
    }
}

/// 3x3 tic-tac-toe board. Squares are write-once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Writes a square without validation. Used when decoding sequences.
    pub(super) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Checks if the square at `coords` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMarkKind::OutOfRange`] for coordinates outside the grid.
    #[track_caller]
    pub fn is_empty(&self, coords: impl Into<Coords>) -> Result<bool, InvalidMark> {
        let pos = coords.into().to_position()?;
        Ok(self.get(pos) == Square::Empty)
    }

    /// Places `mark` at `coords`.
    ///
    /// The board is left unchanged on failure.
    ///
    /// # Errors
    ///
    /// - [`InvalidMarkKind::GameOver`] if a player has already won
    /// - [`InvalidMarkKind::OutOfRange`] if `coords` is outside the grid
    /// - [`InvalidMarkKind::Occupied`] if the square already holds a mark
    #[track_caller]
    #[instrument(skip(self, coords))]
    pub fn place_mark(&mut self, mark: Player, coords: impl Into<Coords>) -> Result<(), InvalidMark> {
        let coords = coords.into();
        if let Some(winner) = self.winner() {
            return Err(InvalidMark::new(InvalidMarkKind::GameOver(winner)));
        }

        let pos = coords.to_position()?;
        if self.get(pos) != Square::Empty {
            return Err(InvalidMark::new(InvalidMarkKind::Occupied(coords)));
        }

        self.set(pos, Square::Occupied(mark));
        debug!(%coords, "Mark placed");
        Ok(())
    }

    /// Parses `symbol` as a mark and places it at `coords`.
    ///
    /// # Errors
    ///
    /// [`InvalidMarkKind::UnknownSymbol`] for an unrecognised symbol, otherwise
    /// the errors of [`Board::place_mark`].
    #[track_caller]
    pub fn place_symbol(&mut self, symbol: char, coords: impl Into<Coords>) -> Result<(), InvalidMark> {
        let mark = Player::from_symbol(symbol)?;
        self.place_mark(mark, coords)
    }

    /// Returns the player with three in a row, if any.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// True if `player` has three in a row.
    pub fn has_won(&self, player: Player) -> bool {
        rules::has_line(self, player)
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Recomputes the board status from the squares.
    ///
    /// X's win is checked before O's, then a full board, then an empty one.
    pub fn status(&self) -> BoardStatus {
        if self.has_won(Player::X) {
            BoardStatus::Won(Player::X)
        } else if self.has_won(Player::O) {
            BoardStatus::Won(Player::O)
        } else if rules::is_draw(self) {
            BoardStatus::Draw
        } else if self.squares.iter().all(|s| *s == Square::Empty) {
            BoardStatus::NotStarted
        } else {
            BoardStatus::InProgress
        }
    }

    /// Positions that do not hold a mark yet, in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(|pos| self.get(*pos) == Square::Empty)
    }

    /// Encodes the board as a move sequence.
    pub fn sequence(&self) -> Sequence {
        Sequence::from(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Three rows of `|`-separated cells with a rule between rows.
/// Empty cells are blank.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.squares[row * 3 + col] {
                    Square::Empty => ' ',
                    Square::Occupied(player) => player.symbol().to_ascii_uppercase(),
                };
                write!(f, "{}", symbol)?;
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_board_is_empty_everywhere() {
        let board = Board::new();
        for row in 0..3 {
            for col in 0..3 {
                assert!(board.is_empty((row, col)).unwrap());
            }
        }
        assert_eq!(board.status(), BoardStatus::NotStarted);
    }

    #[test]
    fn test_is_empty_out_of_range() {
        let board = Board::new();
        let err = board.is_empty((3, 1)).unwrap_err();
        assert_eq!(err.kind, InvalidMarkKind::OutOfRange(Coords::new(3, 1)));
    }

    #[test]
    fn test_place_mark_rejected_after_win() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place_mark(Player::O, (1, col)).unwrap();
        }
        let before = board.clone();

        let err = board.place_mark(Player::X, (0, 0)).unwrap_err();
        assert_eq!(err.kind, InvalidMarkKind::GameOver(Player::O));
        assert_eq!(board, before);
    }

    #[test]
    fn test_status_in_progress() {
        let mut board = Board::new();
        board.place_mark(Player::X, (1, 1)).unwrap();
        assert_eq!(board.status(), BoardStatus::InProgress);
        assert!(!board.status().is_terminal());
    }

    #[test]
    fn test_x_win_reported_before_o_win() {
        // Not reachable in play, but the precedence must be fixed.
        let board = Sequence::try_from("xxxooo000").unwrap().to_board();
        assert_eq!(board.status(), BoardStatus::Won(Player::X));
    }

    #[test]
    fn test_player_symbols() {
        assert_eq!(Player::from_symbol('x').unwrap(), Player::X);
        assert_eq!(Player::from_symbol('O').unwrap(), Player::O);
        assert_eq!(
            Player::try_from('z').unwrap_err().kind,
            InvalidMarkKind::UnknownSymbol('z')
        );
    }

    #[test]
    fn test_display_keeps_positions() {
        let mut board = Board::new();
        board.place_mark(Player::X, (0, 0)).unwrap();
        board.place_mark(Player::O, (2, 1)).unwrap();
        assert_eq!(board.to_string(), "X| | \n-+-+-\n | | \n-+-+-\n |O| ");
    }
}
