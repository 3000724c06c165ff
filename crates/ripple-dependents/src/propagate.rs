use std::collections::{HashSet, VecDeque};

use ripple_core::{ChangeInfo, ChangeType, PropagationMode};
use tracing::debug;

use crate::graph::set_package_dependents;
use crate::policy::{BumpPolicies, PolicyEvaluator};
use crate::state::BumpRunState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationOptions {
    pub mode: PropagationMode,
    pub evaluator: PolicyEvaluator,
}

impl PropagationOptions {
    #[must_use]
    pub fn new(mode: PropagationMode, evaluator: PolicyEvaluator) -> Self {
        Self { mode, evaluator }
    }
}

/// A package waiting to have its policy checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PendingBump {
    package: String,
    /// Change type its own policy is evaluated against.
    change_type: ChangeType,
    /// Change type handed to its dependents.
    dependent_change_type: ChangeType,
}

impl PendingBump {
    fn from_change(change: &ChangeInfo) -> Self {
        Self {
            package: change.package_name.clone(),
            change_type: change.change_type,
            dependent_change_type: change.effective_dependent_change_type(),
        }
    }

    fn inherited(package: String, change_type: ChangeType) -> Self {
        Self {
            package,
            change_type,
            dependent_change_type: change_type,
        }
    }
}

/// Selects the dependents of every changed package whose policy allows it.
///
/// In [`PropagationMode::Transitive`] each recorded dependent is processed as a
/// changed package in turn, carrying the change's dependent change type, until no
/// new work remains. A path stops at the first package whose own policy rejects the
/// change type. Every `(package, change type)` pair is processed at most once, so
/// dependency cycles terminate.
pub fn select_dependents_to_bump(
    state: &mut BumpRunState,
    policies: &BumpPolicies,
    options: PropagationOptions,
) {
    let mut queue: VecDeque<PendingBump> = state
        .change_records()
        .iter()
        .map(PendingBump::from_change)
        .collect();

    for pending in &queue {
        state.raise_change_type(&pending.package, pending.change_type);
    }

    let mut visited: HashSet<PendingBump> = HashSet::new();

    while let Some(pending) = queue.pop_front() {
        if !visited.insert(pending.clone()) {
            continue;
        }

        let policy = policies.policy_for(&pending.package);
        if !options
            .evaluator
            .should_propagate(policy, pending.change_type)
        {
            debug!(
                package = %pending.package,
                change_type = %pending.change_type,
                ?policy,
                "policy stops propagation"
            );
            continue;
        }

        set_package_dependents(state, &pending.package);

        let dependents = state.dependents_of(&pending.package).to_vec();
        debug!(
            package = %pending.package,
            dependents = dependents.len(),
            "bumping dependents"
        );

        for dependent in dependents {
            state.raise_change_type(&dependent, pending.dependent_change_type);

            if options.mode == PropagationMode::Transitive {
                queue.push_back(PendingBump::inherited(
                    dependent,
                    pending.dependent_change_type,
                ));
            }
        }
    }
}
