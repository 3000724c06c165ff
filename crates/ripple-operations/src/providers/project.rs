use std::collections::HashMap;
use std::path::Path;

use ripple_project::{MonorepoProject, PackageConfig, RootConfig, discover_project, load_configs};

use crate::Result;
use crate::traits::ProjectProvider;

pub struct FileSystemProjectProvider;

impl FileSystemProjectProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemProjectProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectProvider for FileSystemProjectProvider {
    fn discover_project(&self, start_path: &Path) -> Result<MonorepoProject> {
        Ok(discover_project(start_path)?)
    }

    fn load_configs(
        &self,
        project: &MonorepoProject,
    ) -> Result<(RootConfig, HashMap<String, PackageConfig>)> {
        Ok(load_configs(project)?)
    }
}
