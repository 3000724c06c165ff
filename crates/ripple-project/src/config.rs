use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use ripple_core::{BumpDependentsPolicy, PropagationMode};

use crate::error::ProjectError;
use crate::manifest::{RippleMetadata, read_config_file, read_manifest};
use crate::project::MonorepoProject;
use crate::scope::ScopeFilter;
use crate::{CONFIG_FILE_NAME, DEFAULT_BRANCH, DEFAULT_CHANGE_DIR, MANIFEST_FILE_NAME};

#[derive(Debug, Clone)]
pub struct RootConfig {
    change_dir: PathBuf,
    branch: String,
    bump_deps: BumpDependentsPolicy,
    scope: ScopeFilter,
    propagation: PropagationMode,
    unset_bump_to_propagates: bool,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            change_dir: PathBuf::from(DEFAULT_CHANGE_DIR),
            branch: DEFAULT_BRANCH.to_string(),
            bump_deps: BumpDependentsPolicy::default(),
            scope: ScopeFilter::default(),
            propagation: PropagationMode::default(),
            unset_bump_to_propagates: false,
        }
    }
}

impl RootConfig {
    /// Change directory, relative to the project root.
    #[must_use]
    pub fn change_dir(&self) -> &Path {
        &self.change_dir
    }

    /// Ref the staleness check diffs against when none is given.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Policy for packages that do not declare their own.
    #[must_use]
    pub fn bump_deps(&self) -> BumpDependentsPolicy {
        self.bump_deps
    }

    #[must_use]
    pub fn scope(&self) -> &ScopeFilter {
        &self.scope
    }

    #[must_use]
    pub fn propagation(&self) -> PropagationMode {
        self.propagation
    }

    /// Outcome for a `{}` policy that names no `bumpTo` threshold.
    #[must_use]
    pub fn unset_bump_to_propagates(&self) -> bool {
        self.unset_bump_to_propagates
    }

    #[must_use]
    pub fn with_change_dir(mut self, change_dir: impl AsRef<Path>) -> Self {
        self.change_dir = change_dir
            .as_ref()
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect();
        self
    }

    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    #[must_use]
    pub fn with_bump_deps(mut self, policy: BumpDependentsPolicy) -> Self {
        self.bump_deps = policy;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: ScopeFilter) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn with_propagation(mut self, propagation: PropagationMode) -> Self {
        self.propagation = propagation;
        self
    }

    fn from_metadata(metadata: RippleMetadata) -> Result<Self, ProjectError> {
        let defaults = Self::default();
        let change_dir = match metadata.change_dir {
            Some(dir) => normalize_change_dir(Path::new(&dir))?,
            None => defaults.change_dir,
        };
        Ok(Self {
            change_dir,
            branch: metadata.branch.unwrap_or(defaults.branch),
            bump_deps: metadata.bump_deps.unwrap_or(defaults.bump_deps),
            scope: ScopeFilter::new(&metadata.scope)?,
            propagation: metadata.propagation.unwrap_or(defaults.propagation),
            unset_bump_to_propagates: metadata
                .unset_bump_to_propagates
                .unwrap_or(defaults.unset_bump_to_propagates),
        })
    }
}

/// Strips `.` components so the directory compares equal to the repo-relative
/// paths git reports. Anything that could leave the project root is rejected.
fn normalize_change_dir(path: &Path) -> Result<PathBuf, ProjectError> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => normalized.push(part),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ProjectError::InvalidChangeDir {
                    path: path.to_path_buf(),
                });
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(ProjectError::InvalidChangeDir {
            path: path.to_path_buf(),
        });
    }
    Ok(normalized)
}

#[derive(Debug, Clone, Default)]
pub struct PackageConfig {
    bump_deps: Option<BumpDependentsPolicy>,
}

impl PackageConfig {
    #[must_use]
    pub fn new(bump_deps: Option<BumpDependentsPolicy>) -> Self {
        Self { bump_deps }
    }

    #[must_use]
    pub fn bump_deps(&self) -> Option<BumpDependentsPolicy> {
        self.bump_deps
    }
}

/// Parses root configuration from `ripple.toml` when present, otherwise from the
/// `"ripple"` object of the root `package.json`.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed, or if scope patterns are invalid.
pub fn parse_root_config(project: &MonorepoProject) -> Result<RootConfig, ProjectError> {
    let config_path = project.root.join(CONFIG_FILE_NAME);

    let metadata = if config_path.exists() {
        read_config_file(&config_path)?
    } else {
        read_manifest(&project.root.join(MANIFEST_FILE_NAME))?
            .ripple
            .unwrap_or_default()
    };

    RootConfig::from_metadata(metadata)
}

/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed.
pub fn parse_package_config(package_path: &Path) -> Result<PackageConfig, ProjectError> {
    let manifest = read_manifest(&package_path.join(MANIFEST_FILE_NAME))?;

    Ok(PackageConfig {
        bump_deps: manifest.ripple.and_then(|ripple| ripple.bump_deps),
    })
}

/// # Errors
///
/// Returns an error if any manifest or config file cannot be read or parsed.
pub fn load_configs(
    project: &MonorepoProject,
) -> Result<(RootConfig, HashMap<String, PackageConfig>), ProjectError> {
    let root_config = parse_root_config(project)?;

    let mut package_configs = HashMap::new();
    for package in &project.packages {
        let config = parse_package_config(&package.path)?;
        package_configs.insert(package.name.clone(), config);
    }

    Ok((root_config, package_configs))
}
