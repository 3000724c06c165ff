use std::collections::HashMap;
use std::path::Path;

use ripple_project::{MonorepoProject, PackageConfig, RootConfig};

use crate::Result;

pub trait ProjectProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no project can be found from the given path.
    fn discover_project(&self, start_path: &Path) -> Result<MonorepoProject>;

    /// # Errors
    ///
    /// Returns an error if the configuration files cannot be loaded.
    fn load_configs(
        &self,
        project: &MonorepoProject,
    ) -> Result<(RootConfig, HashMap<String, PackageConfig>)>;
}
