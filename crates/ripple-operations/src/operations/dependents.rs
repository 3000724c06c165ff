use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use ripple_core::{ChangeInfo, ChangeType, PropagationMode};
use ripple_dependents::{
    BumpPolicies, BumpRunState, PolicyEvaluator, PropagationOptions, select_dependents_to_bump,
};
use ripple_project::{PackageConfig, RootConfig, scoped_packages};
use tracing::{debug, warn};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{ChangeFileReader, ProjectProvider};

#[derive(Debug, Clone, Default)]
pub struct DependentsInput {
    /// Overrides the configured propagation mode.
    pub propagation: Option<PropagationMode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentsOutput {
    /// Changed package to the dependents that must be bumped with it.
    pub dependents: IndexMap<String, Vec<String>>,
    pub calculated_change_types: IndexMap<String, ChangeType>,
    /// Packages named in change files that the project does not contain.
    pub unknown_packages: Vec<String>,
    pub change_file_count: usize,
    pub propagation: PropagationMode,
}

pub struct DependentsOperation<P, R> {
    project_provider: P,
    change_file_reader: R,
}

impl<P, R> DependentsOperation<P, R>
where
    P: ProjectProvider,
    R: ChangeFileReader,
{
    pub fn new(project_provider: P, change_file_reader: R) -> Self {
        Self {
            project_provider,
            change_file_reader,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project cannot be discovered, contains no packages,
    /// or if change files cannot be listed, read or parsed.
    pub fn execute(&self, start_path: &Path, input: &DependentsInput) -> Result<DependentsOutput> {
        let project = self.project_provider.discover_project(start_path)?;
        if project.packages.is_empty() {
            return Err(OperationError::EmptyProject(project.root));
        }

        let (root_config, package_configs) = self.project_provider.load_configs(&project)?;

        let change_dir = project.root.join(root_config.change_dir());
        let change_files = self.change_file_reader.list_change_files(&change_dir)?;

        let package_infos = project.package_infos();
        let mut change_records: Vec<ChangeInfo> = Vec::new();
        let mut unknown_packages: Vec<String> = Vec::new();

        for path in &change_files {
            for change in self.change_file_reader.read_change_file(path)? {
                if package_infos.contains_key(&change.package_name) {
                    change_records.push(change);
                } else {
                    warn!(
                        package = %change.package_name,
                        file = %path.display(),
                        "change file names a package that is not in the project"
                    );
                    if !unknown_packages.contains(&change.package_name) {
                        unknown_packages.push(change.package_name);
                    }
                }
            }
        }

        let policies = build_policies(&root_config, &package_configs);
        let propagation = input.propagation.unwrap_or(root_config.propagation());
        let options = PropagationOptions::new(
            propagation,
            PolicyEvaluator::new(root_config.unset_bump_to_propagates()),
        );

        let scoped = scoped_packages(&project, &root_config);
        debug!(
            changes = change_records.len(),
            scoped = scoped.len(),
            ?propagation,
            "selecting dependents to bump"
        );

        let mut state = BumpRunState::new(package_infos, scoped, change_records);
        select_dependents_to_bump(&mut state, &policies, options);

        let calculated_change_types = state.calculated_change_types().clone();

        Ok(DependentsOutput {
            dependents: state.into_dependents(),
            calculated_change_types,
            unknown_packages,
            change_file_count: change_files.len(),
            propagation,
        })
    }
}

fn build_policies(
    root_config: &RootConfig,
    package_configs: &HashMap<String, PackageConfig>,
) -> BumpPolicies {
    let mut policies = BumpPolicies::new(root_config.bump_deps());
    for (name, config) in package_configs {
        if let Some(policy) = config.bump_deps() {
            policies.insert(name.clone(), policy);
        }
    }
    policies
}
