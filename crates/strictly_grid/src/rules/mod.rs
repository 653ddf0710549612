//! Game rules for N×N tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart
//! from round state so contracts and invariants can compose them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Line, WinningLine, check_winner, winning_line, winning_line_through};
