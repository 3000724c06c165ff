use indexmap::IndexMap;
use ripple_core::{ChangeType, PropagationMode};
use ripple_operations::operations::DependentsOutput;
use serde::Serialize;

use super::DependentsFormatter;
use crate::error::Result;

pub(crate) struct JsonFormatter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DependentsReport<'a> {
    propagation: PropagationMode,
    change_file_count: usize,
    dependents: &'a IndexMap<String, Vec<String>>,
    change_types: &'a IndexMap<String, ChangeType>,
    unknown_packages: &'a [String],
}

impl DependentsFormatter for JsonFormatter {
    fn format_dependents(&self, output: &DependentsOutput) -> Result<String> {
        let report = DependentsReport {
            propagation: output.propagation,
            change_file_count: output.change_file_count,
            dependents: &output.dependents,
            change_types: &output.calculated_change_types,
            unknown_packages: &output.unknown_packages,
        };

        let mut rendered = serde_json::to_string_pretty(&report)?;
        rendered.push('\n');
        Ok(rendered)
    }
}
