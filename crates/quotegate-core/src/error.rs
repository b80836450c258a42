use thiserror::Error;

/// Request validation errors surfaced directly to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("instrument code cannot be empty")]
    EmptyCode,
    #[error("search keyword cannot be empty")]
    EmptyKeyword,
    #[error("batch quote requires at least one code")]
    EmptyBatch,
    #[error("batch quote supports at most {max} codes, got {len}")]
    BatchTooLarge { len: usize, max: usize },
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}
