use thiserror::Error;

/// Errors produced by boards and by the tree search.
///
/// Board errors are fail-fast: the caller decides whether to re-prompt or abort.
/// Seeing one of them from inside a search pass means an engine invariant was broken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MctsError {
    #[error("board dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("column {col} is out of range for a board with {cols} columns")]
    ColumnOutOfRange { col: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("cell value {value} at row {row}, column {col} is not 0, 1 or 2")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("token at row {row}, column {col} has an empty cell below it")]
    FloatingToken { row: usize, col: usize },

    #[error("no legal move: the position is already decided")]
    NoLegalMove,

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("search tree invariant violated: {0}")]
    TreeInvariant(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_errors_name_the_column() {
        let err = MctsError::ColumnOutOfRange { col: 9, cols: 7 };
        assert_eq!(
            err.to_string(),
            "column 9 is out of range for a board with 7 columns"
        );
        assert_eq!(MctsError::ColumnFull(3).to_string(), "column 3 is full");
    }

    #[test]
    fn dimensions_error_display() {
        let err = MctsError::InvalidDimensions { rows: 0, cols: 7 };
        assert_eq!(err.to_string(), "board dimensions must be positive, got 0x7");
    }
}
