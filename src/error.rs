//! Error type shared by every analysis stage.
//!
//! Only schema and precondition violations are errors. Numeric degeneracies
//! (zero denominators, single-member standard deviations) are reported as
//! `None` on the affected value so a batch always completes.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Fatal errors raised by summarization, comparison, and plan handling
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A grouping or measurement field is absent from an input row
    #[error("row {row} is missing required field '{field}'")]
    MissingField { field: String, row: usize },

    /// An aggregated field holds a text label instead of a number
    #[error("field '{field}' in row {row} is not numeric")]
    NonNumericField { field: String, row: usize },

    /// A grouping factor is not an integer or label
    #[error("grouping factor '{field}' in row {row} must be an integer or a label")]
    InvalidFactor { field: String, row: usize },

    /// A comparison references an aggregate column the summary does not carry
    #[error("{side} summary has no column '{column}'")]
    MissingColumn { column: String, side: &'static str },

    /// Two outputs of one summarization, or two fields of one flattened
    /// comparison row, would share a column name
    #[error("column '{0}' is produced more than once")]
    DuplicateColumn(String),

    /// More than one exact-summary row shares a join-key tuple
    #[error("join key {key} matches {matches} exact-summary rows; expected at most one")]
    AmbiguousJoin { key: String, matches: usize },

    /// Experiment configuration is internally inconsistent
    #[error("invalid experiment plan: {0}")]
    InvalidPlan(String),

    /// Experiment configuration could not be parsed
    #[error("failed to parse experiment plan: {0}")]
    Config(#[from] serde_json::Error),
}
