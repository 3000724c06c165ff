use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("operation failed")]
    Operation(#[from] ripple_operations::OperationError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to serialize JSON output")]
    Json(#[from] serde_json::Error),

    #[error("{count} stale change file(s) found")]
    StaleChangeFiles { count: usize },
}

pub type Result<T> = std::result::Result<T, CliError>;
