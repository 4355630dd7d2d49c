//! A small and simple library for exhaustive minimax search.
//!
//! This library computes the game-theoretically optimal move in two-player zero-sum games by walking
//! the complete game tree, with no pruning and no memoization. It ships a Tic-Tac-Toe board, whose
//! state primitives are also exposed as free functions at the crate root.
//!
//! # Example
//!
//! ```rust
//! use minimax_lib::boards::tic_tac_toe::{Action, TicTacToeBoard};
//! use minimax_lib::minimax::MinimaxSearch;
//!
//! // X threatens the top row
//! let board: TicTacToeBoard = "XX./OO./...".parse().unwrap();
//!
//! // Create and configure a new search instance using the builder
//! let search = MinimaxSearch::builder(board)
//!     .with_parallel_root(false)
//!     .build();
//!
//! // Score every move, then pick the best one
//! let report = search.evaluate_actions().unwrap();
//! let best = report.best().unwrap();
//!
//! assert_eq!(best.action, Action::new(0, 2));
//! assert_eq!(best.value, 1);
//! ```
//!
//! The same through the free functions:
//!
//! ```rust
//! use minimax_lib::{apply_action, best_move, initial_state, terminal, utility};
//!
//! let mut board = initial_state();
//! while !terminal(&board) {
//!     let action = best_move(&board).unwrap();
//!     board = apply_action(&board, action).unwrap();
//! }
//! assert_eq!(utility(&board), 0);
//! ```

/// Agents that pick moves, and a helper that plays a whole game between two of them.
pub mod agent;
/// Contains the `Board` trait and related enums that define the interface for a game.
pub mod board;
/// Contains pre-made implementations of the `Board` trait for common games.
pub mod boards;
/// The crate-wide error type.
pub mod error;
/// The core module of the library, containing the `MinimaxSearch` implementation.
pub mod minimax;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Contains the `SearchNode` struct, which represents a node in a scored game tree.
pub mod search_node;

pub use boards::tic_tac_toe::{
    Action, Cell, Player, TicTacToeBoard, active_player, apply_action, initial_state,
    legal_actions, terminal, utility, winner,
};
pub use error::{Error, Result};
pub use minimax::{best_move, maximize, minimize};
