use std::path::{Path, PathBuf};

use ripple_core::ChangeInfo;

use crate::Result;

pub trait ChangeFileReader: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn read_change_file(&self, path: &Path) -> Result<Vec<ChangeInfo>>;

    /// Change files directly inside `change_dir`, sorted by file name.
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_change_files(&self, change_dir: &Path) -> Result<Vec<PathBuf>>;
}
