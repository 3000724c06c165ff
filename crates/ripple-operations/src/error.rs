use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Git(#[from] ripple_git::GitError),

    #[error(transparent)]
    Project(#[from] ripple_project::ProjectError),

    #[error("failed to read change file '{path}'")]
    ChangeFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse change file '{path}'")]
    ChangeFileParse {
        path: PathBuf,
        #[source]
        source: ripple_parse::FormatError,
    },

    #[error("failed to list change files in '{path}'")]
    ChangeFileList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no packages found in project at '{0}'")]
    EmptyProject(PathBuf),
}

pub type Result<T> = std::result::Result<T, OperationError>;
