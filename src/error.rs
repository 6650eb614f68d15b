use thiserror::Error;

/// Fatal errors raised before a report can be produced.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("CSV is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("row {row}: invalid value {value:?} in column {field}: {reason}")]
    RowParse {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("student not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
