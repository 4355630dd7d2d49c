use crate::board::{Board, GameOutcome, Side};
use crate::error::{Error, Result};
use crate::minimax::MinimaxSearch;
use crate::random::{RandomGenerator, StandardRandomGenerator};
use tracing::{debug, instrument};

/// Anything that can choose a move for the side to play.
pub trait Agent<T: Board> {
    /// Selects an action for the side to move on `board`.
    fn select_action(&mut self, board: &T) -> Result<T::Action>;

    /// Returns the agent's display name.
    fn name(&self) -> &str;
}

/// Plays the minimax-optimal move every turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimaxAgent {
    parallel_root: bool,
}

impl MinimaxAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.parallel_root = parallel_root;
        self
    }
}

impl<T: Board> Agent<T> for MinimaxAgent {
    fn select_action(&mut self, board: &T) -> Result<T::Action> {
        MinimaxSearch::builder(board.clone())
            .with_parallel_root(self.parallel_root)
            .build()
            .best_move()
    }

    fn name(&self) -> &str {
        "minimax"
    }
}

/// Plays a uniformly random legal move.
#[derive(Debug, Default)]
pub struct RandomAgent<K: RandomGenerator = StandardRandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> RandomAgent<K> {
    pub fn new(random: K) -> Self {
        Self { random }
    }
}

impl<T: Board, K: RandomGenerator> Agent<T> for RandomAgent<K> {
    fn select_action(&mut self, board: &T) -> Result<T::Action> {
        let actions = board.get_legal_actions();
        self.random
            .choose(&actions)
            .copied()
            .ok_or(Error::NoMovesAvailable)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameRecord<T: Board> {
    /// Every action played, in order.
    pub actions: Vec<T::Action>,
    pub final_board: T,
    pub outcome: GameOutcome,
}

/// Plays `board` to the end, asking `maximizer` and `minimizer` for moves in turn.
#[instrument(skip_all, fields(maximizer = maximizer.name(), minimizer = minimizer.name()))]
pub fn play_game<T, A, B>(board: T, maximizer: &mut A, minimizer: &mut B) -> Result<GameRecord<T>>
where
    T: Board,
    A: Agent<T> + ?Sized,
    B: Agent<T> + ?Sized,
{
    let mut board = board;
    let mut actions = Vec::new();
    while !board.is_terminal() {
        let action = match board.active_side() {
            Side::Maximizer => maximizer.select_action(&board)?,
            Side::Minimizer => minimizer.select_action(&board)?,
        };
        board = board.apply_action(&action)?;
        actions.push(action);
    }

    let outcome = board.get_outcome();
    debug!(?outcome, plies = actions.len(), "game over");
    Ok(GameRecord {
        actions,
        final_board: board,
        outcome,
    })
}
