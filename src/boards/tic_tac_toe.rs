use crate::board::{Board, Side};
use crate::error::{Error, InvalidActionReason, Result};
use std::fmt;
use std::str::FromStr;

/// Side length of the board.
pub const SIZE: usize = 3;

/// Every line of three, scanned rows first, then columns, then the main and anti diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A single cell of the board.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Cell {
    /// No mark yet.
    #[default]
    Empty,
    /// Marked by X.
    X,
    /// Marked by O.
    O,
}

impl Cell {
    /// Returns `X`, `O` or `.` for an empty cell.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Parses a cell; `.`, `_` and `-` mean empty, marks are case-insensitive.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Returns the player owning this cell, if any.
    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// A Tic-Tac-Toe player. `X` always moves first.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Player {
    /// Moves first and maximizes the utility.
    X,
    /// Moves second and minimizes the utility.
    O,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the cell holding this player's mark.
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// X maximizes the utility, O minimizes it.
    pub fn side(self) -> Side {
        match self {
            Player::X => Side::Maximizer,
            Player::O => Side::Minimizer,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A move: the `(row, column)` coordinate of the cell to mark.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct Action {
    /// Row index, from the top.
    pub row: usize,
    /// Column index, from the left.
    pub column: usize,
}

impl Action {
    /// Creates an action; the range is checked when it is applied.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    fn in_range(self) -> bool {
        self.row < SIZE && self.column < SIZE
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, column): (usize, usize)) -> Self {
        Action::new(row, column)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// An implementation of the `Board` trait for the game of Tic-Tac-Toe.
///
/// The board is a row-major 3x3 grid of cells. Whose turn it is never gets stored: it is derived
/// from the number of occupied cells, which assumes the position was reached by alternating play.
/// The type is `Copy`, so every transition yields an independent board.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub struct TicTacToeBoard {
    cells: [[Cell; SIZE]; SIZE],
}

impl TicTacToeBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from raw rows without any validation.
    ///
    /// Use [`TicTacToeBoard::check_reachable`] (or parse from a string) when the input is untrusted.
    pub const fn from_rows(cells: [[Cell; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// Returns the rows of the board.
    pub fn cells(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// Returns the cell at `action`, or `None` when the coordinates are off the board.
    pub fn cell(&self, action: Action) -> Option<Cell> {
        self.cells
            .get(action.row)
            .and_then(|row| row.get(action.column))
            .copied()
    }

    fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// Returns the player who moves next: X on an even number of occupied cells, O on an odd one.
    pub fn active_player(&self) -> Player {
        let occupied = self.cells.iter().flatten().filter(|c| **c != Cell::Empty).count();
        if occupied % 2 == 0 { Player::X } else { Player::O }
    }

    /// Returns the coordinates of every empty cell, in row-major order.
    pub fn legal_actions(&self) -> Vec<Action> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |column| Action::new(row, column)))
            .filter(|&action| self.cells[action.row][action.column] == Cell::Empty)
            .collect()
    }

    /// Returns the board that results from the active player marking `action`.
    pub fn apply_action(&self, action: Action) -> Result<Self> {
        let reason = if !action.in_range() {
            Some(InvalidActionReason::OutOfRange)
        } else if self.cells[action.row][action.column] != Cell::Empty {
            Some(InvalidActionReason::Occupied)
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(Error::InvalidAction {
                row: action.row,
                column: action.column,
                reason,
            });
        }

        let mut next = *self;
        next.cells[action.row][action.column] = self.active_player().to_cell();
        Ok(next)
    }

    fn line_owner(&self, line: &[(usize, usize); 3]) -> Option<Player> {
        let [(r0, c0), (r1, c1), (r2, c2)] = *line;
        let first = self.cells[r0][c0];
        if first == self.cells[r1][c1] && first == self.cells[r2][c2] {
            first.mark()
        } else {
            None
        }
    }

    /// Returns the owner of the first complete line, scanning rows, columns, then diagonals.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|line| self.line_owner(line))
    }

    /// Returns `true` when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| *c != Cell::Empty)
    }

    /// Returns `true` once someone has won or the board is full.
    pub fn terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Returns 1 if X has won, -1 if O has won, 0 otherwise.
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    /// Checks that the position can arise from alternating play starting with X.
    pub fn check_reachable(&self) -> Result<()> {
        let x_count = self.count(Cell::X);
        let o_count = self.count(Cell::O);
        let reject = |message: &str| Error::UnreachablePosition {
            x_count,
            o_count,
            message: message.to_string(),
        };

        if x_count != o_count && x_count != o_count + 1 {
            return Err(reject("X must have as many marks as O or exactly one more"));
        }

        let x_wins = LINES.iter().any(|line| self.line_owner(line) == Some(Player::X));
        let o_wins = LINES.iter().any(|line| self.line_owner(line) == Some(Player::O));
        if x_wins && o_wins {
            return Err(reject("both players have three in a row"));
        }
        if x_wins && x_count != o_count + 1 {
            return Err(reject("X has won but O moved afterwards"));
        }
        if o_wins && x_count != o_count {
            return Err(reject("O has won but X moved afterwards"));
        }

        Ok(())
    }

    /// Returns a base-3 code of the cells, unique per position.
    pub fn state_code(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .enumerate()
            .map(|(i, cell)| {
                let digit = match cell {
                    Cell::Empty => 0,
                    Cell::X => 1,
                    Cell::O => 2,
                };
                digit * 3u32.pow(i as u32)
            })
            .sum()
    }
}

impl Board for TicTacToeBoard {
    type Action = Action;

    fn active_side(&self) -> Side {
        self.active_player().side()
    }

    fn get_legal_actions(&self) -> Vec<Self::Action> {
        self.legal_actions()
    }

    fn apply_action(&self, action: &Self::Action) -> Result<Self> {
        TicTacToeBoard::apply_action(self, *action)
    }

    fn is_terminal(&self) -> bool {
        self.terminal()
    }

    fn get_utility(&self) -> i32 {
        self.utility()
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for TicTacToeBoard {
    type Err = Error;

    /// Parses nine cells in row-major order, e.g. `"XO./.X./..O"`.
    ///
    /// Whitespace, `/` and `|` are ignored. The result must be a reachable position.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidBoard {
            input: s.to_string(),
            message,
        };

        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        let mut filled = 0;
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '/' && *c != '|') {
            let cell = Cell::from_char(c)
                .ok_or_else(|| invalid(format!("unexpected character '{c}'")))?;
            if filled == SIZE * SIZE {
                return Err(invalid("more than 9 cells".to_string()));
            }
            cells[filled / SIZE][filled % SIZE] = cell;
            filled += 1;
        }
        if filled != SIZE * SIZE {
            return Err(invalid(format!("expected 9 cells, got {filled}")));
        }

        let board = TicTacToeBoard::from_rows(cells);
        board.check_reachable()?;
        Ok(board)
    }
}

/// Returns the starting position: every cell empty.
pub fn initial_state() -> TicTacToeBoard {
    TicTacToeBoard::new()
}

/// Returns the player who has the next turn on `board`.
pub fn active_player(board: &TicTacToeBoard) -> Player {
    board.active_player()
}

/// Returns every legal action on `board`, in row-major order.
pub fn legal_actions(board: &TicTacToeBoard) -> Vec<Action> {
    board.legal_actions()
}

/// Returns the board that results from playing `action` on `board`.
pub fn apply_action(board: &TicTacToeBoard, action: Action) -> Result<TicTacToeBoard> {
    board.apply_action(action)
}

/// Returns the winner of the game, if there is one.
pub fn winner(board: &TicTacToeBoard) -> Option<Player> {
    board.winner()
}

/// Returns `true` if the game is over.
pub fn terminal(board: &TicTacToeBoard) -> bool {
    board.terminal()
}

/// Returns 1 if X has won the game, -1 if O has won, 0 otherwise.
pub fn utility(board: &TicTacToeBoard) -> i32 {
    board.utility()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, GameOutcome};
    use std::collections::HashSet;

    const E: Cell = Cell::Empty;
    const X: Cell = Cell::X;
    const O: Cell = Cell::O;

    fn board(s: &str) -> TicTacToeBoard {
        s.parse().unwrap()
    }

    #[test]
    fn initial_state_is_empty_and_open() {
        let board = initial_state();
        assert!(!terminal(&board));
        assert_eq!(legal_actions(&board).len(), 9);
        assert_eq!(active_player(&board), Player::X);
        assert_eq!(winner(&board), None);
        assert_eq!(utility(&board), 0);
    }

    #[test]
    fn legal_actions_are_row_major() {
        let board = board("X.O/.X./O..");
        let actions = legal_actions(&board);
        assert_eq!(
            actions,
            vec![
                Action::new(0, 1),
                Action::new(1, 0),
                Action::new(1, 2),
                Action::new(2, 1),
                Action::new(2, 2),
            ]
        );
    }

    #[test]
    fn active_player_alternates() {
        let mut board = initial_state();
        let mut expected = Player::X;
        while let Some(&action) = legal_actions(&board).first() {
            assert_eq!(active_player(&board), expected);
            board = apply_action(&board, action).unwrap();
            expected = expected.opponent();
        }
        assert!(board.is_full());
    }

    #[test]
    fn apply_action_marks_active_player_and_leaves_input_untouched() {
        // arrange
        let before = board("X../.../...");
        let saved = before;

        // act
        let after = apply_action(&before, Action::new(1, 1)).unwrap();

        // assert
        assert_eq!(before, saved);
        assert_eq!(after.cell(Action::new(1, 1)), Some(Cell::O));
        assert_eq!(after.cell(Action::new(0, 0)), Some(Cell::X));
        assert_eq!(active_player(&after), Player::X);
    }

    #[test]
    fn apply_action_rejects_occupied_cell() {
        let before = board("X../.../...");
        let err = apply_action(&before, Action::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidAction {
                row: 0,
                column: 0,
                reason: InvalidActionReason::Occupied,
            }
        );
    }

    #[test]
    fn apply_action_rejects_out_of_range() {
        let err = apply_action(&initial_state(), Action::new(0, 3)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidAction {
                reason: InvalidActionReason::OutOfRange,
                ..
            }
        ));
    }

    #[test]
    fn main_diagonal_win() {
        let board = TicTacToeBoard::from_rows([[X, O, X], [O, X, O], [E, E, X]]);
        assert_eq!(winner(&board), Some(Player::X));
        assert!(terminal(&board));
        assert_eq!(utility(&board), 1);
        assert_eq!(board.get_outcome(), GameOutcome::MaximizerWins);
    }

    #[test]
    fn anti_diagonal_win_for_o() {
        let board = board("XXO/XO./O..");
        assert_eq!(winner(&board), Some(Player::O));
        assert_eq!(utility(&board), -1);
        assert_eq!(board.get_outcome(), GameOutcome::MinimizerWins);
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let board = TicTacToeBoard::from_rows([[X, O, X], [X, O, O], [O, X, X]]);
        assert_eq!(winner(&board), None);
        assert!(terminal(&board));
        assert_eq!(utility(&board), 0);
        assert!(legal_actions(&board).is_empty());
        assert_eq!(board.get_outcome(), GameOutcome::Draw);
    }

    #[test]
    fn winner_scans_rows_before_columns() {
        // malformed: two complete rows
        let rows = TicTacToeBoard::from_rows([[X, X, X], [E, E, E], [O, O, O]]);
        assert_eq!(winner(&rows), Some(Player::X));

        let rows = TicTacToeBoard::from_rows([[O, O, O], [E, E, E], [X, X, X]]);
        assert_eq!(winner(&rows), Some(Player::O));

        // malformed: two complete columns
        let columns = TicTacToeBoard::from_rows([[O, E, X], [O, E, X], [O, E, X]]);
        assert_eq!(winner(&columns), Some(Player::O));
    }

    #[test]
    fn utility_is_zero_on_open_board() {
        let board = board("XO./.../...");
        assert!(!terminal(&board));
        assert_eq!(utility(&board), 0);
    }

    #[test]
    fn parse_and_display() {
        let board = board("x o . | . X . | . . o");
        assert_eq!(board.to_string(), "XO.\n.X.\n..O");
        let reparsed: TicTacToeBoard = board.to_string().parse().unwrap();
        assert_eq!(reparsed, board);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            "XO".parse::<TicTacToeBoard>(),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(matches!(
            "XO.......Z".parse::<TicTacToeBoard>(),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(matches!(
            "XXXXXXXXXX".parse::<TicTacToeBoard>(),
            Err(Error::InvalidBoard { .. })
        ));
    }

    #[test]
    fn parse_rejects_unreachable_positions() {
        // too many X
        assert!(matches!(
            "XX./.../...".parse::<TicTacToeBoard>(),
            Err(Error::UnreachablePosition { x_count: 2, o_count: 0, .. })
        ));
        // O moved first
        assert!(matches!(
            "O../.../...".parse::<TicTacToeBoard>(),
            Err(Error::UnreachablePosition { .. })
        ));
        // both win
        assert!(matches!(
            "XXX/OOO/...".parse::<TicTacToeBoard>(),
            Err(Error::UnreachablePosition { .. })
        ));
        // X won, yet O kept playing
        assert!(matches!(
            "XXX/OO./.O.".parse::<TicTacToeBoard>(),
            Err(Error::UnreachablePosition { .. })
        ));
    }

    #[test]
    fn cell_and_player_conversions() {
        for cell in [Cell::Empty, Cell::X, Cell::O] {
            assert_eq!(Cell::from_char(cell.to_char()), Some(cell));
        }
        assert_eq!(Cell::from_char('_'), Some(Cell::Empty));
        assert_eq!(Cell::from_char('o'), Some(Cell::O));
        assert_eq!(Cell::from_char('0'), None);
        assert_eq!(Player::X.opponent().to_cell(), Cell::O);
        assert_eq!(Player::O.to_cell().mark(), Some(Player::O));
        assert_eq!(Action::from((2, 1)), Action::new(2, 1));
        assert_eq!(Action::new(2, 1).to_string(), "(2, 1)");
    }

    #[test]
    fn cell_outside_board_is_none() {
        assert_eq!(initial_state().cell(Action::new(3, 0)), None);
        assert_eq!(initial_state().cell(Action::new(2, 2)), Some(Cell::Empty));
    }

    #[test]
    fn reachable_positions_count() {
        // arrange
        let mut seen = HashSet::new();
        let mut stack = vec![initial_state()];

        // act
        while let Some(board) = stack.pop() {
            if !seen.insert(board.state_code()) {
                continue;
            }
            assert!(board.check_reachable().is_ok(), "{board}");
            if terminal(&board) {
                continue;
            }
            for action in legal_actions(&board) {
                stack.push(apply_action(&board, action).unwrap());
            }
        }

        // assert
        assert_eq!(seen.len(), 5478);
    }
}
