use indexmap::{IndexMap, IndexSet};
use ripple_core::{ChangeInfo, ChangeType, PackageInfo};

/// Inputs and accumulated output of one dependent-bump run.
///
/// The package registry, scope and change records are fixed at construction.
/// `dependents` maps a changed package to the packages that depend on it and must
/// be bumped too, in insertion order and without duplicates.
#[derive(Debug, Clone, Default)]
pub struct BumpRunState {
    package_infos: IndexMap<String, PackageInfo>,
    scoped_packages: IndexSet<String>,
    change_records: Vec<ChangeInfo>,
    dependents: IndexMap<String, Vec<String>>,
    calculated_change_types: IndexMap<String, ChangeType>,
}

impl BumpRunState {
    #[must_use]
    pub fn new(
        package_infos: IndexMap<String, PackageInfo>,
        scoped_packages: IndexSet<String>,
        change_records: Vec<ChangeInfo>,
    ) -> Self {
        Self {
            package_infos,
            scoped_packages,
            change_records,
            dependents: IndexMap::new(),
            calculated_change_types: IndexMap::new(),
        }
    }

    /// Builds a state where every registry package is in scope.
    #[must_use]
    pub fn with_all_scoped(
        package_infos: IndexMap<String, PackageInfo>,
        change_records: Vec<ChangeInfo>,
    ) -> Self {
        let scoped_packages = package_infos.keys().cloned().collect();
        Self::new(package_infos, scoped_packages, change_records)
    }

    #[must_use]
    pub fn package_infos(&self) -> &IndexMap<String, PackageInfo> {
        &self.package_infos
    }

    #[must_use]
    pub fn scoped_packages(&self) -> &IndexSet<String> {
        &self.scoped_packages
    }

    #[must_use]
    pub fn is_scoped(&self, package: &str) -> bool {
        self.scoped_packages.contains(package)
    }

    #[must_use]
    pub fn change_records(&self) -> &[ChangeInfo] {
        &self.change_records
    }

    #[must_use]
    pub fn dependents(&self) -> &IndexMap<String, Vec<String>> {
        &self.dependents
    }

    #[must_use]
    pub fn dependents_of(&self, package: &str) -> &[String] {
        self.dependents
            .get(package)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Most impactful change type seen per package, for declared changes and bumped dependents.
    #[must_use]
    pub fn calculated_change_types(&self) -> &IndexMap<String, ChangeType> {
        &self.calculated_change_types
    }

    #[must_use]
    pub fn into_dependents(self) -> IndexMap<String, Vec<String>> {
        self.dependents
    }

    /// Appends `dependent` to the list for `package` unless already present.
    pub(crate) fn add_dependent(&mut self, package: &str, dependent: &str) -> bool {
        let list = self.dependents.entry(package.to_string()).or_default();
        if list.iter().any(|existing| existing == dependent) {
            return false;
        }
        list.push(dependent.to_string());
        true
    }

    pub(crate) fn raise_change_type(&mut self, package: &str, change_type: ChangeType) {
        self.calculated_change_types
            .entry(package.to_string())
            .and_modify(|current| *current = (*current).max(change_type))
            .or_insert(change_type);
    }
}
