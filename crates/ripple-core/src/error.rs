use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangeError {
    #[error("unknown change type '{0}'")]
    UnknownChangeType(String),
}

pub type Result<T> = std::result::Result<T, ChangeError>;
