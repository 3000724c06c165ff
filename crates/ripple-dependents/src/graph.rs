use tracing::trace;

use crate::state::BumpRunState;

/// Records every scoped package that declares `package_name` under any dependency
/// kind as a dependent of `package_name`.
///
/// Does nothing when `package_name` itself is out of scope. Dependents are appended
/// in registry order and never duplicated, so repeated calls are idempotent.
pub fn set_package_dependents(state: &mut BumpRunState, package_name: &str) {
    if !state.is_scoped(package_name) {
        trace!(package = package_name, "not in scope, skipping dependents");
        return;
    }

    let found: Vec<String> = state
        .package_infos()
        .iter()
        .filter(|(name, _)| name.as_str() != package_name && state.is_scoped(name))
        .filter(|(_, info)| info.depends_on(package_name))
        .map(|(name, _)| name.clone())
        .collect();

    for dependent in found {
        if state.add_dependent(package_name, &dependent) {
            trace!(package = package_name, dependent = %dependent, "recorded dependent");
        }
    }
}
