mod graph;
mod policy;
mod propagate;
mod state;

pub use graph::set_package_dependents;
pub use policy::{BumpPolicies, PolicyEvaluator, should_bump_dependent_packages};
pub use propagate::{PropagationOptions, select_dependents_to_bump};
pub use state::BumpRunState;
