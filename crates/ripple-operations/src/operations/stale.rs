use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ripple_parse::is_change_file;
use tracing::{debug, warn};

use crate::Result;
use crate::traits::{ChangeFileReader, GitProvider, ProjectProvider};

const HEAD: &str = "HEAD";

#[derive(Debug, Clone, Default)]
pub struct StaleCheckInput {
    pub from_ref: Option<String>,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleCheckOutput {
    /// Change files on disk that the diff against `base_ref` does not contain,
    /// relative to the change directory.
    pub stale_files: Vec<PathBuf>,
    pub base_ref: String,
    pub change_dir: PathBuf,
}

impl StaleCheckOutput {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        !self.stale_files.is_empty()
    }
}

/// Finds change files that are present on disk but were not added or modified
/// since the branch forked from the base ref.
pub struct StaleCheckOperation<P, G, R> {
    project_provider: P,
    git_provider: G,
    change_file_reader: R,
}

impl<P, G, R> StaleCheckOperation<P, G, R>
where
    P: ProjectProvider,
    G: GitProvider,
    R: ChangeFileReader,
{
    pub fn new(project_provider: P, git_provider: G, change_file_reader: R) -> Self {
        Self {
            project_provider,
            git_provider,
            change_file_reader,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project cannot be discovered, the change directory
    /// cannot be listed, or the git diff against the base ref fails.
    pub fn execute(&self, start_path: &Path, input: &StaleCheckInput) -> Result<StaleCheckOutput> {
        let project = self.project_provider.discover_project(start_path)?;
        let (root_config, _) = self.project_provider.load_configs(&project)?;

        let base_ref = input
            .from_ref
            .clone()
            .or_else(|| input.branch.clone())
            .unwrap_or_else(|| root_config.branch().to_string());
        let change_dir = root_config.change_dir().to_path_buf();

        let on_disk = self
            .change_file_reader
            .list_change_files(&project.root.join(&change_dir))?;
        if on_disk.is_empty() {
            debug!(dir = %change_dir.display(), "no change files on disk");
            return Ok(StaleCheckOutput {
                stale_files: Vec::new(),
                base_ref,
                change_dir,
            });
        }

        let changed: HashSet<PathBuf> = self
            .git_provider
            .changed_files_since_merge_base(&project.root, &base_ref, HEAD)?
            .into_iter()
            .filter(|change| !change.is_deletion())
            .filter(|change| is_change_file(&change.path))
            .filter_map(|change| {
                change
                    .path
                    .strip_prefix(&change_dir)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect();

        let stale_files: Vec<PathBuf> = on_disk
            .iter()
            .filter_map(|path| path.file_name().map(PathBuf::from))
            .filter(|relative| !changed.contains(relative))
            .collect();

        if !stale_files.is_empty() {
            warn!(
                count = stale_files.len(),
                base_ref = %base_ref,
                "found stale change files"
            );
        }

        Ok(StaleCheckOutput {
            stale_files,
            base_ref,
            change_dir,
        })
    }
}
