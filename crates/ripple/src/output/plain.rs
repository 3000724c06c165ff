use ripple_operations::operations::{DependentsOutput, StaleCheckOutput};

use super::{DependentsFormatter, StaleFormatter};
use crate::error::Result;

pub(crate) struct PlainTextFormatter;

impl PlainTextFormatter {
    fn format_dependents_map(output: &mut String, result: &DependentsOutput) {
        if result.dependents.is_empty() {
            output.push_str("No dependents need to be bumped.\n");
            return;
        }

        output.push_str("Dependents to bump:\n");
        for (package, dependents) in &result.dependents {
            output.push_str(&format!("  {package} -> {}\n", dependents.join(", ")));
        }
    }

    fn format_change_types(output: &mut String, result: &DependentsOutput) {
        if result.calculated_change_types.is_empty() {
            return;
        }

        output.push_str("\nChange types:\n");
        for (package, change_type) in &result.calculated_change_types {
            output.push_str(&format!("  {package}: {change_type}\n"));
        }
    }

    fn format_unknown_packages(output: &mut String, result: &DependentsOutput) {
        if result.unknown_packages.is_empty() {
            return;
        }

        output.push_str("\nChange files name unknown packages:\n");
        for name in &result.unknown_packages {
            output.push_str(&format!("  {name}\n"));
        }
    }
}

impl DependentsFormatter for PlainTextFormatter {
    fn format_dependents(&self, result: &DependentsOutput) -> Result<String> {
        let mut output = String::new();

        if result.change_file_count == 0 {
            output.push_str("No change files found.\n");
            return Ok(output);
        }

        output.push_str(&format!("Change files: {}\n\n", result.change_file_count));
        Self::format_dependents_map(&mut output, result);
        Self::format_change_types(&mut output, result);
        Self::format_unknown_packages(&mut output, result);
        Ok(output)
    }
}

impl StaleFormatter for PlainTextFormatter {
    fn format_stale(&self, result: &StaleCheckOutput) -> String {
        let mut output = String::from("The following change files are stale:\n");
        for file in &result.stale_files {
            output.push_str(&format!("- {}\n", file.display()));
        }
        output
    }
}
