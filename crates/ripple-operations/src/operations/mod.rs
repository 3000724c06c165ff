mod dependents;
mod stale;

pub use dependents::{DependentsInput, DependentsOperation, DependentsOutput};
pub use stale::{StaleCheckInput, StaleCheckOperation, StaleCheckOutput};
