use std::path::PathBuf;

use crate::{FileChange, FileStatus, GitError, Result};

use super::Repository;

impl Repository {
    /// Diffs the tree at `base` (or the empty tree) against the tree at `head`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if either base or head cannot be resolved.
    pub fn changed_files(&self, base: Option<&str>, head: &str) -> Result<Vec<FileChange>> {
        let head_tree = self.resolve_tree(head)?;

        let base_tree = match base {
            Some(refspec) => Some(self.resolve_tree(refspec)?),
            None => None,
        };

        self.diff_trees(base_tree.as_ref(), &head_tree)
    }

    /// Diffs the merge base of `base` and `head` against `head`, i.e. what `head`
    /// introduced since it forked from `base`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if either ref cannot be resolved and
    /// [`GitError::NoMergeBase`] if the refs share no history.
    pub fn changed_files_since_merge_base(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Vec<FileChange>> {
        let base_commit = self.resolve_commit(base)?;
        let head_commit = self.resolve_commit(head)?;

        let merge_base = self
            .inner
            .merge_base(base_commit.id(), head_commit.id())
            .map_err(|_| GitError::NoMergeBase {
                base: base.to_string(),
                head: head.to_string(),
            })?;

        let base_tree = self.inner.find_commit(merge_base)?.tree()?;
        let head_tree = head_commit.tree()?;

        self.diff_trees(Some(&base_tree), &head_tree)
    }

    fn diff_trees(
        &self,
        base_tree: Option<&git2::Tree<'_>>,
        head_tree: &git2::Tree<'_>,
    ) -> Result<Vec<FileChange>> {
        let mut diff = self
            .inner
            .diff_tree_to_tree(base_tree, Some(head_tree), None)?;

        let mut find_opts = git2::DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            let status = match delta.status() {
                git2::Delta::Added => FileStatus::Added,
                git2::Delta::Deleted => FileStatus::Deleted,
                git2::Delta::Modified => FileStatus::Modified,
                git2::Delta::Renamed => FileStatus::Renamed,
                git2::Delta::Copied => FileStatus::Copied,
                _ => continue,
            };

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(PathBuf::from)
                .ok_or(GitError::MissingDeltaPath)?;

            let mut change = FileChange::new(path, status);

            if status == FileStatus::Renamed || status == FileStatus::Copied {
                if let Some(old_path) = delta.old_file().path() {
                    change = change.with_old_path(old_path.to_path_buf());
                }
            }

            changes.push(change);
        }

        Ok(changes)
    }

    fn resolve_commit(&self, refspec: &str) -> Result<git2::Commit<'_>> {
        let obj = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        obj.peel_to_commit().map_err(|_| GitError::RefNotFound {
            refspec: refspec.to_string(),
        })
    }

    fn resolve_tree(&self, refspec: &str) -> Result<git2::Tree<'_>> {
        let obj = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        obj.peel_to_tree().map_err(|_| GitError::RefNotFound {
            refspec: refspec.to_string(),
        })
    }
}
