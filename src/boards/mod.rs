//! Contains pre-made implementations of the `Board` trait for common games.

/// A `Board` implementation for the game of Tic-Tac-Toe.
pub mod tic_tac_toe;
