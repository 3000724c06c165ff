use std::path::Path;

use ripple_git::{FileChange, Repository};

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn changed_files_since_merge_base(
        &self,
        project_root: &Path,
        base: &str,
        head: &str,
    ) -> Result<Vec<FileChange>> {
        let repo = Repository::open(project_root)?;
        let prefix = repo.to_relative_path(project_root);

        let changes = repo
            .changed_files_since_merge_base(base, head)?
            .into_iter()
            .filter_map(|change| {
                let path = change.path.strip_prefix(&prefix).ok()?.to_path_buf();
                Some(FileChange { path, ..change })
            })
            .collect();

        Ok(changes)
    }
}
