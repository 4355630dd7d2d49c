//! Error types shared by the board primitives and the search engine.

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The action does not name an empty cell of the board it was applied to.
    #[error("invalid action ({row}, {column}): {reason}")]
    InvalidAction {
        row: usize,
        column: usize,
        reason: InvalidActionReason,
    },

    /// A move was requested on a position that has no legal actions left.
    #[error("no moves available: the position is terminal")]
    NoMovesAvailable,

    /// A textual board could not be parsed.
    #[error("invalid board '{input}': {message}")]
    InvalidBoard { input: String, message: String },

    /// The position cannot arise from alternating play starting with X.
    #[error("unreachable position (X={x_count}, O={o_count}): {message}")]
    UnreachablePosition {
        x_count: usize,
        o_count: usize,
        message: String,
    },
}

/// Why an action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidActionReason {
    /// The row or column is outside `0..=2`.
    OutOfRange,
    /// The cell already holds a mark.
    Occupied,
}

impl std::fmt::Display for InvalidActionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidActionReason::OutOfRange => write!(f, "coordinates must be in 0..=2"),
            InvalidActionReason::Occupied => write!(f, "cell is already occupied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_action_display() {
        let err = Error::InvalidAction {
            row: 1,
            column: 2,
            reason: InvalidActionReason::Occupied,
        };
        assert_eq!(
            err.to_string(),
            "invalid action (1, 2): cell is already occupied"
        );
    }

    #[test]
    fn out_of_range_display() {
        let err = Error::InvalidAction {
            row: 3,
            column: 0,
            reason: InvalidActionReason::OutOfRange,
        };
        assert_eq!(
            err.to_string(),
            "invalid action (3, 0): coordinates must be in 0..=2"
        );
    }

    #[test]
    fn no_moves_display() {
        assert_eq!(
            Error::NoMovesAvailable.to_string(),
            "no moves available: the position is terminal"
        );
    }
}
