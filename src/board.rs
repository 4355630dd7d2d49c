use crate::error::Result;
use std::fmt::Debug;

/// The central trait of the library, defining the interface for a two-player zero-sum game state.
///
/// To run the minimax search on a custom game, this trait must be implemented.
/// Implementations are value types: `apply_action` returns a fresh board and leaves `self` untouched,
/// so search branches never share state.
pub trait Board: Clone + Debug + Send + Sync {
    /// The type representing a move in the game.
    type Action: Copy + Debug + PartialEq + Send + Sync;

    /// Returns the side whose turn it is to make a move.
    fn active_side(&self) -> Side;

    /// Returns all legal actions, in a stable enumeration order.
    ///
    /// The order is observable: the search breaks ties in favour of the earliest action.
    fn get_legal_actions(&self) -> Vec<Self::Action>;

    /// Returns the board that results from the active side playing `action`.
    fn apply_action(&self, action: &Self::Action) -> Result<Self>;

    /// Returns `true` if the game is over.
    fn is_terminal(&self) -> bool;

    /// Returns the value of the position from the maximizer's perspective.
    ///
    /// Only meaningful when [`Board::is_terminal`] is `true`.
    fn get_utility(&self) -> i32;

    /// Returns the current outcome of the game.
    fn get_outcome(&self) -> GameOutcome {
        if !self.is_terminal() {
            return GameOutcome::InProgress;
        }

        match self.get_utility() {
            u if u > 0 => GameOutcome::MaximizerWins,
            u if u < 0 => GameOutcome::MinimizerWins,
            _ => GameOutcome::Draw,
        }
    }
}

/// Represents the possible outcomes of a game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// The game is still ongoing.
    InProgress = 0,
    /// The maximizing side has won.
    MaximizerWins = 1,
    /// The minimizing side has won.
    MinimizerWins = 2,
    /// The game has ended in a draw.
    Draw = 3,
}

/// The two sides of a zero-sum game, from the search's point of view.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Side {
    /// Tries to drive the utility up.
    Maximizer = 1,
    /// Tries to drive the utility down.
    Minimizer = 2,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Maximizer => Side::Minimizer,
            Side::Minimizer => Side::Maximizer,
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent` for this side.
    pub fn prefers(self, candidate: i32, incumbent: i32) -> bool {
        match self {
            Side::Maximizer => candidate > incumbent,
            Side::Minimizer => candidate < incumbent,
        }
    }
}
