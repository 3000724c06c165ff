use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use indexmap::IndexMap;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::ChangeError;

/// Semantic-version impact of a change, ordered from least (`None`) to most (`Major`) impactful.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ChangeType {
    None,
    Prerelease,
    Patch,
    Minor,
    Major,
}

impl ChangeType {
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Prerelease,
        Self::Patch,
        Self::Minor,
        Self::Major,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Prerelease => "prerelease",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = ChangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|change_type| change_type.as_str() == s)
            .ok_or_else(|| ChangeError::UnknownChangeType(s.to_string()))
    }
}

impl TryFrom<String> for ChangeType {
    type Error = ChangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Per-package setting controlling whether a change ripples out to dependents.
///
/// Accepts `true`/`false` or `{ "bumpTo": <change type> }`. An object without
/// `bumpTo` carries no threshold; how that is evaluated is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum BumpDependentsPolicy {
    Flag(bool),
    Threshold {
        #[serde(rename = "bumpTo", default, skip_serializing_if = "Option::is_none")]
        bump_to: Option<ChangeType>,
    },
}

impl BumpDependentsPolicy {
    #[must_use]
    pub fn bump_to(threshold: ChangeType) -> Self {
        Self::Threshold {
            bump_to: Some(threshold),
        }
    }

    #[must_use]
    pub fn unset() -> Self {
        Self::Threshold { bump_to: None }
    }
}

impl Default for BumpDependentsPolicy {
    fn default() -> Self {
        Self::Flag(true)
    }
}

/// How far a bump travels once a package's policy allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PropagationMode {
    /// Only packages with a declared change bump their direct dependents.
    SingleHop,
    /// Bumped dependents are treated as changed themselves until nothing new is recorded.
    #[default]
    Transitive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Dependencies,
    DevDependencies,
    PeerDependencies,
}

impl DependencyKind {
    pub const ALL: [Self; 3] = [
        Self::Dependencies,
        Self::DevDependencies,
        Self::PeerDependencies,
    ];

    /// Key used for this kind in `package.json`.
    #[must_use]
    pub fn manifest_key(self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::DevDependencies => "devDependencies",
            Self::PeerDependencies => "peerDependencies",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.manifest_key())
    }
}

/// A package in the monorepo together with its declared dependency ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: Version,
    pub path: PathBuf,
    pub private: bool,
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
    pub peer_dependencies: IndexMap<String, String>,
}

impl PackageInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version,
            path: path.into(),
            private: false,
            dependencies: IndexMap::new(),
            dev_dependencies: IndexMap::new(),
            peer_dependencies: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_dependency(
        mut self,
        kind: DependencyKind,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.dependencies_mut(kind)
            .insert(name.into(), range.into());
        self
    }

    #[must_use]
    pub fn dependencies_of_kind(&self, kind: DependencyKind) -> &IndexMap<String, String> {
        match kind {
            DependencyKind::Dependencies => &self.dependencies,
            DependencyKind::DevDependencies => &self.dev_dependencies,
            DependencyKind::PeerDependencies => &self.peer_dependencies,
        }
    }

    pub fn dependencies_mut(&mut self, kind: DependencyKind) -> &mut IndexMap<String, String> {
        match kind {
            DependencyKind::Dependencies => &mut self.dependencies,
            DependencyKind::DevDependencies => &mut self.dev_dependencies,
            DependencyKind::PeerDependencies => &mut self.peer_dependencies,
        }
    }

    /// Returns true if `name` is declared under any dependency kind.
    #[must_use]
    pub fn depends_on(&self, name: &str) -> bool {
        DependencyKind::ALL
            .into_iter()
            .any(|kind| self.dependencies_of_kind(kind).contains_key(name))
    }
}

/// A declared change for one package, as read from a change file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub package_name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_change_type: Option<ChangeType>,
}

impl ChangeInfo {
    #[must_use]
    pub fn new(package_name: impl Into<String>, change_type: ChangeType) -> Self {
        Self {
            change_type,
            package_name: package_name.into(),
            comment: String::new(),
            email: String::new(),
            dependent_change_type: None,
        }
    }

    #[must_use]
    pub fn with_dependent_change_type(mut self, change_type: ChangeType) -> Self {
        self.dependent_change_type = Some(change_type);
        self
    }

    /// Severity carried to packages that are bumped because of this change.
    #[must_use]
    pub fn effective_dependent_change_type(&self) -> ChangeType {
        self.dependent_change_type.unwrap_or(self.change_type)
    }
}
