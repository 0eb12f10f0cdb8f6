#[derive(Debug, thiserror::Error)]
pub enum RunnerCommonError {
    #[error("Failed to decode json: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Row {row} has {got} values, expected {expected}")]
    RowTooShort {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("No registered query runner with name '{0}'")]
    UnknownRunner(String),

    #[error("{0}")]
    External(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = RunnerCommonError> = std::result::Result<T, E>;
