use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexMap;
use ripple_core::PackageInfo;
use semver::Version;

use crate::MANIFEST_FILE_NAME;
use crate::error::ProjectError;
use crate::manifest::{PackageJson, read_manifest};

const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectKind {
    /// Root `package.json` declares `workspaces`.
    Monorepo,
    SinglePackage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonorepoProject {
    pub root: PathBuf,
    pub kind: ProjectKind,
    pub packages: Vec<PackageInfo>,
}

impl MonorepoProject {
    /// Packages keyed by name, in discovery order.
    #[must_use]
    pub fn package_infos(&self) -> IndexMap<String, PackageInfo> {
        self.packages
            .iter()
            .map(|pkg| (pkg.name.clone(), pkg.clone()))
            .collect()
    }

    #[must_use]
    pub fn relative_package_path<'a>(&self, package: &'a PackageInfo) -> &'a Path {
        package.path.strip_prefix(&self.root).unwrap_or(&package.path)
    }
}

/// # Errors
///
/// Returns `ProjectError` if no project root can be found or if manifest parsing fails.
pub fn discover_project(start_dir: &Path) -> Result<MonorepoProject, ProjectError> {
    let start_dir = start_dir
        .canonicalize()
        .map_err(|source| ProjectError::ManifestRead {
            path: start_dir.to_path_buf(),
            source,
        })?;

    let (root, manifest) = find_project_root(&start_dir)?;
    let kind = if manifest.workspaces.is_some() {
        ProjectKind::Monorepo
    } else {
        ProjectKind::SinglePackage
    };
    let packages = collect_packages(&root, manifest, &kind)?;

    Ok(MonorepoProject {
        root,
        kind,
        packages,
    })
}

fn find_project_root(start_dir: &Path) -> Result<(PathBuf, PackageJson), ProjectError> {
    let mut current = start_dir.to_path_buf();
    let mut fallback_single_package: Option<(PathBuf, PackageJson)> = None;

    loop {
        let manifest_path = current.join(MANIFEST_FILE_NAME);

        if manifest_path.exists() {
            let manifest = read_manifest(&manifest_path)?;

            if manifest.workspaces.is_some() {
                return Ok((current, manifest));
            }

            if fallback_single_package.is_none() {
                fallback_single_package = Some((current.clone(), manifest));
            }
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => {
                return fallback_single_package.ok_or_else(|| ProjectError::NotFound {
                    start_dir: start_dir.to_path_buf(),
                });
            }
        }
    }
}

fn collect_packages(
    root: &Path,
    manifest: PackageJson,
    kind: &ProjectKind,
) -> Result<Vec<PackageInfo>, ProjectError> {
    let manifest_path = root.join(MANIFEST_FILE_NAME);

    if *kind == ProjectKind::SinglePackage {
        return Ok(vec![package_from_manifest(root, manifest, &manifest_path)?]);
    }

    let patterns = manifest
        .workspaces
        .as_ref()
        .map(|ws| ws.patterns().to_vec())
        .unwrap_or_default();

    let mut packages: Vec<PackageInfo> = Vec::new();

    for member_dir in expand_workspace_patterns(root, &patterns)? {
        let member_manifest_path = member_dir.join(MANIFEST_FILE_NAME);
        if !member_manifest_path.exists() {
            continue;
        }

        let member_manifest = read_manifest(&member_manifest_path)?;
        let package = package_from_manifest(&member_dir, member_manifest, &member_manifest_path)?;

        if let Some(existing) = packages.iter().find(|p| p.name == package.name) {
            return Err(ProjectError::DuplicatePackage {
                name: package.name,
                first: existing.path.clone(),
                second: package.path,
            });
        }

        packages.push(package);
    }

    Ok(packages)
}

fn package_from_manifest(
    dir: &Path,
    manifest: PackageJson,
    manifest_path: &Path,
) -> Result<PackageInfo, ProjectError> {
    let name = manifest.name.ok_or_else(|| ProjectError::MissingField {
        path: manifest_path.to_path_buf(),
        field: "name",
    })?;

    let version = match manifest.version {
        Some(version) => {
            version
                .parse()
                .map_err(|source| ProjectError::InvalidVersion {
                    path: manifest_path.to_path_buf(),
                    version,
                    source,
                })?
        }
        None => Version::new(0, 0, 0),
    };

    Ok(PackageInfo {
        name,
        version,
        path: dir.to_path_buf(),
        private: manifest.private,
        dependencies: manifest.dependencies,
        dev_dependencies: manifest.dev_dependencies,
        peer_dependencies: manifest.peer_dependencies,
    })
}

fn compile_pattern(pattern: &str) -> Result<GlobMatcher, ProjectError> {
    let trimmed = pattern.trim_start_matches("./").trim_end_matches('/');
    GlobBuilder::new(trimmed)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ProjectError::GlobPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Expands workspace globs into member directories; `!`-prefixed patterns exclude.
fn expand_workspace_patterns(
    root: &Path,
    patterns: &[String],
) -> Result<Vec<PathBuf>, ProjectError> {
    let mut includes = Vec::new();
    let mut excludes = Vec::new();

    for pattern in patterns {
        match pattern.strip_prefix('!') {
            Some(negated) => excludes.push(compile_pattern(negated)?),
            None => includes.push(compile_pattern(pattern)?),
        }
    }

    let mut dirs = Vec::new();
    if !includes.is_empty() {
        collect_matching_dirs(root, root, &includes, &excludes, &mut dirs)?;
    }

    Ok(dirs)
}

fn collect_matching_dirs(
    base: &Path,
    current: &Path,
    includes: &[GlobMatcher],
    excludes: &[GlobMatcher],
    results: &mut Vec<PathBuf>,
) -> Result<(), ProjectError> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(current)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    for path in entries {
        if !path.is_dir() {
            continue;
        }

        let skipped = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| SKIPPED_DIRS.contains(&name));
        if skipped {
            continue;
        }

        // Fallback to full path if strip_prefix fails (shouldn't happen in practice)
        let relative = path.strip_prefix(base).unwrap_or(&path);

        if excludes.iter().any(|ex| ex.is_match(relative)) {
            continue;
        }

        if includes.iter().any(|inc| inc.is_match(relative)) {
            results.push(path.clone());
        }

        collect_matching_dirs(base, &path, includes, excludes, results)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    #[test]
    fn package_without_version_defaults_to_zero() -> anyhow::Result<()> {
        let manifest: PackageJson = serde_json::from_str(r#"{ "name": "tool" }"#)?;

        let manifest_path = Path::new("/repo/package.json");
        let package = package_from_manifest(Path::new("/repo"), manifest, manifest_path)?;

        assert_eq!(package.version, Version::new(0, 0, 0));
        Ok(())
    }

    #[test]
    fn package_with_invalid_version_fails() -> anyhow::Result<()> {
        let manifest: PackageJson =
            serde_json::from_str(r#"{ "name": "tool", "version": "one" }"#)?;

        let result =
            package_from_manifest(Path::new("/repo"), manifest, Path::new("/repo/package.json"));

        assert!(matches!(result, Err(ProjectError::InvalidVersion { .. })));
        Ok(())
    }

    #[test]
    fn package_without_name_fails() -> anyhow::Result<()> {
        let manifest: PackageJson = serde_json::from_str(r#"{ "version": "1.0.0" }"#)?;

        let result =
            package_from_manifest(Path::new("/repo"), manifest, Path::new("/repo/package.json"));

        assert!(matches!(
            result,
            Err(ProjectError::MissingField { field: "name", .. })
        ));
        Ok(())
    }

    #[test]
    fn expand_skips_node_modules_and_negated_patterns() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write(dir.path(), "packages/a/package.json", "{}")?;
        write(dir.path(), "packages/b/package.json", "{}")?;
        write(dir.path(), "packages/internal/package.json", "{}")?;
        write(dir.path(), "node_modules/packages/c/package.json", "{}")?;

        let dirs = expand_workspace_patterns(
            dir.path(),
            &["packages/*".to_string(), "!packages/internal".to_string()],
        )?;

        let names: Vec<_> = dirs
            .iter()
            .filter_map(|d| d.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        Ok(())
    }

    #[test]
    fn expand_without_includes_is_empty() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write(dir.path(), "packages/a/package.json", "{}")?;

        let dirs = expand_workspace_patterns(dir.path(), &["!packages/a".to_string()])?;

        assert!(dirs.is_empty());
        Ok(())
    }

    #[test]
    fn duplicate_package_names_fail() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        write(dir.path(), "package.json", r#"{ "workspaces": ["packages/*"] }"#)?;
        write(dir.path(), "packages/a/package.json", r#"{ "name": "same" }"#)?;
        write(dir.path(), "packages/b/package.json", r#"{ "name": "same" }"#)?;

        let result = discover_project(dir.path());

        assert!(matches!(
            result,
            Err(ProjectError::DuplicatePackage { name, .. }) if name == "same"
        ));
        Ok(())
    }
}
