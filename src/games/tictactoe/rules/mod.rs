//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). The board delegates its
//! status queries here so the rules can be tested in isolation.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, has_line};
