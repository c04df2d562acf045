use thiserror::Error;

/// All possible errors in the to-do list
#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Todo name cannot be empty")]
    EmptyName,

    #[error("A due time is required")]
    MissingDue,

    #[error("Invalid due date/time: {0}")]
    InvalidDue(String),

    #[error("Todo #{0} not found")]
    TodoNotFound(i64),

    #[error("Expected {expected} row(s) affected, got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TodoError>;
