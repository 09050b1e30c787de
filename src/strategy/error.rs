//! Search errors.

use crate::games::tictactoe::{InvalidSequence, Sequence};
use crate::search_config::ConfigError;
use derive_more::{Display, Error, From};
use tracing::{instrument, warn};

/// The requested state is not a child of the current node.
#[derive(Debug, Clone, Display, Error)]
#[display(
    "Invalid state: {} does not follow {} at {}:{}",
    requested,
    current,
    file,
    line
)]
pub struct InvalidState {
    /// Sequence the caller asked to move to.
    pub requested: Sequence,
    /// Sequence of the current node.
    pub current: Sequence,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidState {
    /// Creates a new invalid-state error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(requested: Sequence, current: Sequence) -> Self {
        let loc = std::panic::Location::caller();
        warn!(%requested, %current, "State change rejected");
        Self {
            requested,
            current,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A tree could not be built from the given config and position.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SetupError {
    /// The search config failed validation.
    #[display("{}", _0)]
    Config(ConfigError),

    /// The root position cannot occur with the configured turn order.
    #[display("{}", _0)]
    Sequence(InvalidSequence),
}
