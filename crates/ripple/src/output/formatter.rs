use ripple_operations::operations::{DependentsOutput, StaleCheckOutput};

use crate::error::Result;

pub(crate) trait DependentsFormatter {
    fn format_dependents(&self, output: &DependentsOutput) -> Result<String>;
}

pub(crate) trait StaleFormatter {
    fn format_stale(&self, output: &StaleCheckOutput) -> String;
}
