use std::path::Path;

use ripple_git::FileChange;

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// Files changed between the merge base of `base` and `head`, and `head`.
    ///
    /// Paths are relative to `project_root`; changes outside it are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened, a ref cannot be
    /// resolved or the diff fails.
    fn changed_files_since_merge_base(
        &self,
        project_root: &Path,
        base: &str,
        head: &str,
    ) -> Result<Vec<FileChange>>;
}
