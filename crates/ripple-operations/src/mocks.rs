use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ripple_core::{ChangeInfo, ChangeType, DependencyKind, PackageInfo};
use ripple_git::FileChange;
use ripple_project::{MonorepoProject, PackageConfig, ProjectKind, RootConfig};
use semver::Version;

use crate::Result;
use crate::traits::{ChangeFileReader, GitProvider, ProjectProvider};

#[must_use]
pub fn make_change(package: &str, change_type: ChangeType) -> ChangeInfo {
    ChangeInfo::new(package, change_type)
}

pub struct MockProjectProvider {
    project: MonorepoProject,
    root_config: RootConfig,
    package_configs: HashMap<String, PackageConfig>,
}

impl MockProjectProvider {
    #[must_use]
    pub fn new(project: MonorepoProject) -> Self {
        Self {
            project,
            root_config: RootConfig::default(),
            package_configs: HashMap::new(),
        }
    }

    /// Monorepo at `/mock/monorepo` with packages under `packages/<name>`.
    #[must_use]
    pub fn monorepo(packages: Vec<(&str, Vec<(DependencyKind, &str)>)>) -> Self {
        let root = PathBuf::from("/mock/monorepo");
        let packages = packages
            .into_iter()
            .map(|(name, deps)| {
                deps.into_iter().fold(
                    PackageInfo::new(
                        name,
                        Version::new(1, 0, 0),
                        root.join("packages").join(name),
                    ),
                    |pkg, (kind, dep)| pkg.with_dependency(kind, dep, "^1.0.0"),
                )
            })
            .collect();

        Self::new(MonorepoProject {
            root,
            kind: ProjectKind::Monorepo,
            packages,
        })
    }

    #[must_use]
    pub fn with_root_config(mut self, config: RootConfig) -> Self {
        self.root_config = config;
        self
    }

    #[must_use]
    pub fn with_package_config(mut self, package: &str, config: PackageConfig) -> Self {
        self.package_configs.insert(package.to_string(), config);
        self
    }
}

impl ProjectProvider for MockProjectProvider {
    fn discover_project(&self, _start_path: &Path) -> Result<MonorepoProject> {
        Ok(self.project.clone())
    }

    fn load_configs(
        &self,
        _project: &MonorepoProject,
    ) -> Result<(RootConfig, HashMap<String, PackageConfig>)> {
        Ok((self.root_config.clone(), self.package_configs.clone()))
    }
}

#[derive(Default)]
pub struct MockChangeFileReader {
    files: Vec<(PathBuf, Vec<ChangeInfo>)>,
}

impl MockChangeFileReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_change_file(mut self, path: PathBuf, changes: Vec<ChangeInfo>) -> Self {
        self.files.push((path, changes));
        self
    }

    #[must_use]
    pub fn with_change_files(mut self, files: Vec<(PathBuf, Vec<ChangeInfo>)>) -> Self {
        self.files.extend(files);
        self
    }
}

impl ChangeFileReader for MockChangeFileReader {
    fn read_change_file(&self, path: &Path) -> Result<Vec<ChangeInfo>> {
        Ok(self
            .files
            .iter()
            .find(|(file, _)| file == path)
            .map(|(_, changes)| changes.clone())
            .unwrap_or_default())
    }

    fn list_change_files(&self, change_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self
            .files
            .iter()
            .map(|(path, _)| path.clone())
            .filter(|path| path.parent() == Some(change_dir))
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

#[derive(Default)]
pub struct MockGitProvider {
    changes: Vec<FileChange>,
    requested_bases: Mutex<Vec<String>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_changes(mut self, changes: Vec<FileChange>) -> Self {
        self.changes = changes;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requested_bases(&self) -> Vec<String> {
        self.requested_bases.lock().expect("lock poisoned").clone()
    }
}

impl GitProvider for MockGitProvider {
    fn changed_files_since_merge_base(
        &self,
        _project_root: &Path,
        base: &str,
        _head: &str,
    ) -> Result<Vec<FileChange>> {
        self.requested_bases
            .lock()
            .expect("lock poisoned")
            .push(base.to_string());
        Ok(self.changes.clone())
    }
}
