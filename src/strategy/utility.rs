//! Outcome values propagated by minimax.

use crate::games::tictactoe::{BoardStatus, Player};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Value of a position for the maximizing player: -1, 0 or +1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[repr(i8)]
pub enum Utility {
    /// The opponent completes a line.
    #[display("-1")]
    Loss = -1,
    /// Nobody completes a line.
    #[display("0")]
    Draw = 0,
    /// The maximizing player completes a line.
    #[display("+1")]
    Win = 1,
}

impl Utility {
    /// Numeric value.
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Utility of a finished game, or `None` if the game is still open.
    pub fn terminal(status: BoardStatus, goal: Player) -> Option<Self> {
        match status {
            BoardStatus::Won(winner) if winner == goal => Some(Utility::Win),
            BoardStatus::Won(_) => Some(Utility::Loss),
            BoardStatus::Draw => Some(Utility::Draw),
            BoardStatus::NotStarted | BoardStatus::InProgress => None,
        }
    }

    /// Estimate for a position where the search stops: the terminal value
    /// if there is one, otherwise a draw.
    pub fn heuristic(status: BoardStatus, goal: Player) -> Self {
        Self::terminal(status, goal).unwrap_or(Utility::Draw)
    }
}
