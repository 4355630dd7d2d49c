use crate::board::{Board, Side};

/// Represents a single position in a scored game tree produced by
/// [`MinimaxSearch::build_tree`](crate::minimax::MinimaxSearch::build_tree).
#[derive(Debug, Clone)]
pub struct SearchNode<T: Board> {
    /// The game state that this node represents.
    pub board: T,
    /// The action that led to this node's state from its parent. `None` for the root node.
    pub prev_action: Option<T::Action>,
    /// The number of plies between the root and this node.
    pub depth: usize,
    /// The side to move in this node's game state.
    pub side: Side,
    /// The minimax value of the position, from the maximizer's perspective.
    pub value: i32,
}

impl<T: Board> SearchNode<T> {
    /// Creates an unscored node; `value` is filled in once its subtree has been searched.
    pub fn new(board: T, prev_action: Option<T::Action>, depth: usize) -> Self {
        let side = board.active_side();
        SearchNode {
            board,
            prev_action,
            depth,
            side,
            value: 0,
        }
    }

    /// Returns `true` if no further moves are possible from this node.
    pub fn is_leaf(&self) -> bool {
        self.board.is_terminal()
    }
}
