use crate::state::VariableId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FissionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Group index out of range: group={group}, num_groups={num_groups}")]
    GroupOutOfRange { group: usize, num_groups: usize },

    #[error("Table size mismatch for `{table}`: expected {expected}, found {found}")]
    TableSizeMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Variable {0} is coupled more than once")]
    DuplicateVariable(VariableId),

    #[error("Material property not found: {0}")]
    MissingProperty(String),

    #[error("Invalid group constant library: {0}")]
    InvalidLibrary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FissionResult<T> = Result<T, FissionError>;
