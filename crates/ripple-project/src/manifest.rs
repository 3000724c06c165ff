use std::path::Path;

use indexmap::IndexMap;
use ripple_core::{BumpDependentsPolicy, PropagationMode};
use serde::Deserialize;

use crate::error::ProjectError;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageJson {
    pub(crate) name: Option<String>,
    pub(crate) version: Option<String>,
    #[serde(default)]
    pub(crate) private: bool,
    #[serde(default)]
    pub(crate) dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub(crate) dev_dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub(crate) peer_dependencies: IndexMap<String, String>,
    pub(crate) workspaces: Option<Workspaces>,
    pub(crate) ripple: Option<RippleMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Workspaces {
    Patterns(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl Workspaces {
    pub(crate) fn patterns(&self) -> &[String] {
        match self {
            Self::Patterns(patterns) | Self::Object { packages: patterns } => patterns,
        }
    }
}

/// The `"ripple"` object of a `package.json`, or the whole of `ripple.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RippleMetadata {
    pub(crate) change_dir: Option<String>,
    pub(crate) branch: Option<String>,
    pub(crate) bump_deps: Option<BumpDependentsPolicy>,
    #[serde(default)]
    pub(crate) scope: Vec<String>,
    pub(crate) propagation: Option<PropagationMode>,
    pub(crate) unset_bump_to_propagates: Option<bool>,
}

pub(crate) fn read_manifest(path: &Path) -> Result<PackageJson, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ProjectError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_config_file(path: &Path) -> Result<RippleMetadata, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ProjectError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
