use thiserror::Error;

/// Failures raised while building a frequency table
#[derive(Error, Debug)]
pub enum TableError {
    /// Empty table, negative or fractional frequency, duplicate key.
    #[error("malformed frequency table: {0}")]
    Malformed(String),

    /// No embedded table with this name.
    #[error("embedded table not found: {0}")]
    NotFound(String),

    #[error("unable to parse frequency table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to read frequency table: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised by a single selection call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// The level must be finite and greater than 1.
    #[error("invalid level {0}: level must be a finite number greater than 1")]
    InvalidLevel(f64),

    /// No character sits at or below the target frequency.
    #[error("no character has a frequency at or below {target}")]
    EmptyCandidateSet { target: f64 },
}

/// Umbrella error for callers that load a table and select from it
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
