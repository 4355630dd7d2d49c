use crate::board::{Board, Side};
use crate::error::{Error, Result};
use crate::search_node::SearchNode;
use ego_tree::{NodeMut, Tree};
use rayon::prelude::*;
use std::ops::AddAssign;
use tracing::{debug, instrument, trace};

/// Counters collected while walking the game tree.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct SearchStats {
    /// Positions whose value was computed.
    pub nodes: u64,
    /// Terminal positions scored with the utility function.
    pub leaves: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.leaves += rhs.leaves;
    }
}

/// A root action together with the minimax value of the position it leads to.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ScoredAction<A> {
    pub action: A,
    pub value: i32,
}

/// The result of scoring every legal action of a position.
#[derive(Debug, Clone)]
pub struct SearchReport<A> {
    /// The side to move at the root.
    pub side: Side,
    /// Every legal action, in the board's enumeration order.
    pub scored: Vec<ScoredAction<A>>,
    pub stats: SearchStats,
}

impl<A: Copy> SearchReport<A> {
    /// Returns the first action whose value is strictly better for the mover than every earlier one.
    pub fn best(&self) -> Option<ScoredAction<A>> {
        let mut best: Option<ScoredAction<A>> = None;
        for candidate in &self.scored {
            let improves = match best {
                None => true,
                Some(current) => self.side.prefers(candidate.value, current.value),
            };
            if improves {
                best = Some(*candidate);
            }
        }
        best
    }
}

/// Exhaustive minimax search over the full game tree below a position.
///
/// There is no pruning and no memoization: every line of play is followed to a terminal position.
pub struct MinimaxSearch<T: Board> {
    board: T,
    parallel_root: bool,
}

/// A builder for creating instances of `MinimaxSearch`.
pub struct MinimaxSearchBuilder<T: Board> {
    board: T,
    parallel_root: bool,
}

impl<T: Board> MinimaxSearchBuilder<T> {
    /// Creates a new builder for the given position.
    pub fn new(board: T) -> Self {
        Self {
            board,
            parallel_root: false,
        }
    }

    /// Scores the root actions on the rayon thread pool instead of one after another.
    ///
    /// The chosen move is the same either way.
    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.parallel_root = parallel_root;
        self
    }

    /// Builds the `MinimaxSearch` instance with the configured parameters.
    pub fn build(self) -> MinimaxSearch<T> {
        MinimaxSearch::new(self.board, self.parallel_root)
    }
}

impl<T: Board> MinimaxSearch<T> {
    /// Returns a new builder for `MinimaxSearch`.
    pub fn builder(board: T) -> MinimaxSearchBuilder<T> {
        MinimaxSearchBuilder::new(board)
    }

    /// Creates a new `MinimaxSearch` instance.
    ///
    /// It is recommended to use the builder pattern via `MinimaxSearch::builder()` instead.
    pub fn new(board: T, parallel_root: bool) -> Self {
        Self {
            board,
            parallel_root,
        }
    }

    /// Returns the position being searched.
    pub fn get_board(&self) -> &T {
        &self.board
    }

    /// Scores every legal action of the root position.
    #[instrument(skip(self), fields(parallel = self.parallel_root))]
    pub fn evaluate_actions(&self) -> Result<SearchReport<T::Action>> {
        let side = self.board.active_side();
        let actions = self.board.get_legal_actions();

        let results: Vec<(ScoredAction<T::Action>, SearchStats)> = if self.parallel_root {
            actions
                .par_iter()
                .map(|action| score_action(&self.board, side, action))
                .collect::<Result<_>>()?
        } else {
            actions
                .iter()
                .map(|action| score_action(&self.board, side, action))
                .collect::<Result<_>>()?
        };

        let mut stats = SearchStats::default();
        let mut scored = Vec::with_capacity(results.len());
        for (scored_action, action_stats) in results {
            trace!(action = ?scored_action.action, value = scored_action.value, "scored root action");
            stats += action_stats;
            scored.push(scored_action);
        }

        Ok(SearchReport {
            side,
            scored,
            stats,
        })
    }

    /// Returns the best action together with its value.
    pub fn best_scored_move(&self) -> Result<ScoredAction<T::Action>> {
        let report = self.evaluate_actions()?;
        let best = report.best().ok_or(Error::NoMovesAvailable)?;
        debug!(
            action = ?best.action,
            value = best.value,
            nodes = report.stats.nodes,
            leaves = report.stats.leaves,
            "search finished"
        );
        Ok(best)
    }

    /// Returns the optimal action for the side to move.
    ///
    /// Fails with [`Error::NoMovesAvailable`] when the position has no legal actions.
    pub fn best_move(&self) -> Result<T::Action> {
        self.best_scored_move().map(|best| best.action)
    }

    /// Builds the complete game tree below the root, every node annotated with its minimax value.
    #[instrument(skip(self))]
    pub fn build_tree(&self) -> Result<Tree<SearchNode<T>>> {
        let mut tree = Tree::new(SearchNode::new(self.board.clone(), None, 0));
        let mut stats = SearchStats::default();
        let value = grow(tree.root_mut(), &mut stats)?;
        debug!(value, nodes = stats.nodes, leaves = stats.leaves, "game tree built");
        Ok(tree)
    }
}

/// Returns the best outcome the maximizer can force from `board`.
pub fn maximize<T: Board>(board: &T) -> Result<i32> {
    max_value(board, &mut SearchStats::default())
}

/// Returns the best outcome the minimizer can force from `board`.
pub fn minimize<T: Board>(board: &T) -> Result<i32> {
    min_value(board, &mut SearchStats::default())
}

/// Returns the optimal action for the side to move on `board`.
pub fn best_move<T: Board>(board: &T) -> Result<T::Action> {
    MinimaxSearch::builder(board.clone()).build().best_move()
}

fn score_action<T: Board>(
    board: &T,
    side: Side,
    action: &T::Action,
) -> Result<(ScoredAction<T::Action>, SearchStats)> {
    let mut stats = SearchStats::default();
    let child = board.apply_action(action)?;
    let value = match side {
        Side::Maximizer => min_value(&child, &mut stats)?,
        Side::Minimizer => max_value(&child, &mut stats)?,
    };
    Ok((
        ScoredAction {
            action: *action,
            value,
        },
        stats,
    ))
}

fn max_value<T: Board>(board: &T, stats: &mut SearchStats) -> Result<i32> {
    stats.nodes += 1;
    if board.is_terminal() {
        stats.leaves += 1;
        return Ok(board.get_utility());
    }

    let mut value = i32::MIN;
    for action in board.get_legal_actions() {
        value = value.max(min_value(&board.apply_action(&action)?, stats)?);
    }
    Ok(value)
}

fn min_value<T: Board>(board: &T, stats: &mut SearchStats) -> Result<i32> {
    stats.nodes += 1;
    if board.is_terminal() {
        stats.leaves += 1;
        return Ok(board.get_utility());
    }

    let mut value = i32::MAX;
    for action in board.get_legal_actions() {
        value = value.min(max_value(&board.apply_action(&action)?, stats)?);
    }
    Ok(value)
}

/// Expands `node` recursively and stores each subtree's minimax value in its root.
fn grow<T: Board>(mut node: NodeMut<'_, SearchNode<T>>, stats: &mut SearchStats) -> Result<i32> {
    stats.nodes += 1;
    let board = node.value().board.clone();
    let value = if board.is_terminal() {
        stats.leaves += 1;
        board.get_utility()
    } else {
        let side = board.active_side();
        let depth = node.value().depth + 1;
        let mut best: Option<i32> = None;
        for action in board.get_legal_actions() {
            let child = SearchNode::new(board.apply_action(&action)?, Some(action), depth);
            let child_value = grow(node.append(child), stats)?;
            best = match best {
                Some(current) if !side.prefers(child_value, current) => Some(current),
                _ => Some(child_value),
            };
        }
        best.unwrap_or_else(|| board.get_utility())
    };
    node.value().value = value;
    Ok(value)
}
