//! Minimax strategy for the computer player.
//!
//! The [`StateTree`] holds every position reachable from where the game
//! stands, scores them with minimax and picks the next move.

mod error;
mod tree;
mod utility;

pub use error::{InvalidState, SetupError};
pub use tree::{Node, NodeId, StateTree};
pub use utility::Utility;
