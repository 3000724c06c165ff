use std::fs;
use std::path::{Path, PathBuf};

use ripple_core::ChangeInfo;
use ripple_parse::{is_change_file, parse_change_file};

use crate::Result;
use crate::error::OperationError;
use crate::traits::ChangeFileReader;

pub struct FileSystemChangeFileIO {
    project_root: PathBuf,
}

impl FileSystemChangeFileIO {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

impl ChangeFileReader for FileSystemChangeFileIO {
    fn read_change_file(&self, path: &Path) -> Result<Vec<ChangeInfo>> {
        let full_path = self.resolve(path);
        let content =
            fs::read_to_string(&full_path).map_err(|source| OperationError::ChangeFileRead {
                path: full_path.clone(),
                source,
            })?;
        parse_change_file(&content).map_err(|source| OperationError::ChangeFileParse {
            path: full_path,
            source,
        })
    }

    fn list_change_files(&self, change_dir: &Path) -> Result<Vec<PathBuf>> {
        let full_path = self.resolve(change_dir);

        let entries = match fs::read_dir(&full_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(OperationError::ChangeFileList {
                    path: full_path,
                    source,
                });
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| OperationError::ChangeFileList {
                path: full_path.clone(),
                source,
            })?;
            let path = entry.path();

            if path.is_file() && is_change_file(&path) {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}
