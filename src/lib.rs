//! Tic-tac-toe minimax library.
//!
//! A board model and an exhaustive minimax strategy for the computer player.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid of write-once squares, win and draw detection
//! - **Sequence**: the nine-cell encoding that identifies positions
//! - **Strategy**: a game tree scored by minimax for the maximizing player
//!
//! # Example
//!
//! ```
//! use tictactoe_minimax::{SearchConfig, StateTree};
//!
//! let mut tree = StateTree::new(SearchConfig::default().with_depth(2)).expect("valid config");
//! let next = tree.minimax_decision().expect("empty board has moves");
//! tree.change_state(next).expect("decision is a child");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod games;
mod search_config;
mod strategy;

// Crate-level exports - Configuration
pub use search_config::{ConfigError, MAX_DEPTH, SearchConfig};

// Crate-level exports - Strategy
pub use strategy::{InvalidState, Node, NodeId, SetupError, StateTree, Utility};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, BoardStatus, Coords, EMPTY_SYMBOL, FIRST_MOVES, InvalidMark, InvalidMarkKind,
    InvalidSequence, InvalidSequenceKind, Mark, Player, Position, Sequence, Square, rules,
};
