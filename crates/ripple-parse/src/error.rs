use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("change file must contain at least one change")]
    NoChanges,

    #[error("change at index {index} has an empty package name")]
    EmptyPackageName { index: usize },

    #[error("input exceeds maximum size of {max_bytes} bytes")]
    InputTooLarge { max_bytes: usize },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
