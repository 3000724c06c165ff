use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use indexmap::IndexSet;

use crate::config::RootConfig;
use crate::error::ProjectError;
use crate::project::MonorepoProject;

/// Glob filter over package paths relative to the project root.
///
/// Without positive patterns every package is in scope; `!`-prefixed patterns
/// then remove matches.
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    includes: Option<GlobSet>,
    excludes: GlobSet,
}

impl Default for ScopeFilter {
    fn default() -> Self {
        Self {
            includes: None,
            excludes: GlobSet::empty(),
        }
    }
}

impl ScopeFilter {
    /// # Errors
    ///
    /// Returns [`ProjectError::GlobPattern`] if any pattern is invalid.
    pub fn new(patterns: &[String]) -> Result<Self, ProjectError> {
        let (negated, positive): (Vec<&String>, Vec<&String>) =
            patterns.iter().partition(|p| p.starts_with('!'));

        let negated: Vec<&str> = negated
            .into_iter()
            .map(|p| p.trim_start_matches('!'))
            .collect();
        let positive: Vec<&str> = positive.into_iter().map(String::as_str).collect();

        let includes = if positive.is_empty() {
            None
        } else {
            Some(build_glob_set(&positive)?)
        };

        Ok(Self {
            includes,
            excludes: build_glob_set(&negated)?,
        })
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.includes.is_none() && self.excludes.is_empty()
    }

    #[must_use]
    pub fn is_match(&self, relative_path: &Path) -> bool {
        let path = if relative_path.as_os_str().is_empty() {
            Path::new(".")
        } else {
            relative_path
        };

        let included = self
            .includes
            .as_ref()
            .is_none_or(|includes| includes.is_match(path));

        included && !self.excludes.is_match(path)
    }
}

fn build_glob_set(patterns: &[&str]) -> Result<GlobSet, ProjectError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ProjectError::GlobPattern {
                pattern: (*pattern).to_string(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ProjectError::GlobPattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Names of the packages eligible to be recorded as dependents in this run.
#[must_use]
pub fn scoped_packages(project: &MonorepoProject, config: &RootConfig) -> IndexSet<String> {
    project
        .packages
        .iter()
        .filter(|pkg| config.scope().is_match(project.relative_package_path(pkg)))
        .map(|pkg| pkg.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_filter_matches_everything() -> anyhow::Result<()> {
        let filter = ScopeFilter::new(&[])?;

        assert!(filter.is_unrestricted());
        assert!(filter.is_match(Path::new("packages/a")));
        assert!(filter.is_match(Path::new("")));
        Ok(())
    }

    #[test]
    fn positive_patterns_restrict_scope() -> anyhow::Result<()> {
        let filter = ScopeFilter::new(&patterns(&["packages/*"]))?;

        assert!(filter.is_match(Path::new("packages/a")));
        assert!(!filter.is_match(Path::new("apps/web")));
        Ok(())
    }

    #[test]
    fn single_star_does_not_cross_directories() -> anyhow::Result<()> {
        let filter = ScopeFilter::new(&patterns(&["packages/*"]))?;

        assert!(!filter.is_match(Path::new("packages/group/nested")));
        Ok(())
    }

    #[test]
    fn double_star_matches_nested_packages() -> anyhow::Result<()> {
        let filter = ScopeFilter::new(&patterns(&["packages/**", "!packages/*/internal"]))?;

        assert!(filter.is_match(Path::new("packages/group/nested")));
        assert!(!filter.is_match(Path::new("packages/group/internal")));
        Ok(())
    }

    #[test]
    fn negated_patterns_alone_exclude_from_everything() -> anyhow::Result<()> {
        let filter = ScopeFilter::new(&patterns(&["!apps/*"]))?;

        assert!(filter.is_match(Path::new("packages/a")));
        assert!(!filter.is_match(Path::new("apps/web")));
        Ok(())
    }

    #[test]
    fn negation_wins_over_inclusion() -> anyhow::Result<()> {
        let filter = ScopeFilter::new(&patterns(&["packages/*", "!packages/internal"]))?;

        assert!(filter.is_match(Path::new("packages/a")));
        assert!(!filter.is_match(Path::new("packages/internal")));
        Ok(())
    }

    #[test]
    fn invalid_pattern_returns_error() {
        let result = ScopeFilter::new(&patterns(&["[invalid"]));

        assert!(matches!(result, Err(ProjectError::GlobPattern { .. })));
    }
}
