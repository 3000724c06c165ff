use std::collections::HashMap;

use ripple_core::{BumpDependentsPolicy, ChangeType};

/// Decides whether a change of a given type ripples out to dependents.
///
/// A `bumpTo` threshold is inclusive of every more impactful change type:
///
/// | `bumpTo`     | propagates for                       |
/// |--------------|--------------------------------------|
/// | `major`      | major                                |
/// | `minor`      | major, minor                         |
/// | `patch`      | major, minor, patch                  |
/// | `prerelease` | major, minor, patch, prerelease      |
/// | `none`       | everything, including `none`         |
///
/// A policy object without `bumpTo` evaluates to `unset_bump_to_propagates`,
/// which is `false` unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyEvaluator {
    unset_bump_to_propagates: bool,
}

impl PolicyEvaluator {
    #[must_use]
    pub fn new(unset_bump_to_propagates: bool) -> Self {
        Self {
            unset_bump_to_propagates,
        }
    }

    #[must_use]
    pub fn should_propagate(self, policy: BumpDependentsPolicy, change_type: ChangeType) -> bool {
        match policy {
            BumpDependentsPolicy::Flag(propagate) => propagate,
            BumpDependentsPolicy::Threshold { bump_to: None } => self.unset_bump_to_propagates,
            BumpDependentsPolicy::Threshold {
                bump_to: Some(ChangeType::None),
            } => true,
            BumpDependentsPolicy::Threshold {
                bump_to: Some(threshold),
            } => change_type >= threshold,
        }
    }
}

/// [`PolicyEvaluator::should_propagate`] with the default evaluator.
#[must_use]
pub fn should_bump_dependent_packages(
    policy: BumpDependentsPolicy,
    change_type: ChangeType,
) -> bool {
    PolicyEvaluator::default().should_propagate(policy, change_type)
}

/// Per-package propagation policies with a fallback for packages that declare none.
#[derive(Debug, Clone, Default)]
pub struct BumpPolicies {
    default: BumpDependentsPolicy,
    overrides: HashMap<String, BumpDependentsPolicy>,
}

impl BumpPolicies {
    #[must_use]
    pub fn new(default: BumpDependentsPolicy) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_override(
        mut self,
        package: impl Into<String>,
        policy: BumpDependentsPolicy,
    ) -> Self {
        self.insert(package, policy);
        self
    }

    pub fn insert(&mut self, package: impl Into<String>, policy: BumpDependentsPolicy) {
        self.overrides.insert(package.into(), policy);
    }

    #[must_use]
    pub fn policy_for(&self, package: &str) -> BumpDependentsPolicy {
        self.overrides.get(package).copied().unwrap_or(self.default)
    }
}
