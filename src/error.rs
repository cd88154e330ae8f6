use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Unknown calculation: {0}")]
    UnknownCalculation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
