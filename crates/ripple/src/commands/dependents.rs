use std::path::Path;

use ripple_core::PropagationMode;
use ripple_operations::operations::{DependentsInput, DependentsOperation};
use ripple_operations::providers::{FileSystemChangeFileIO, FileSystemProjectProvider};
use ripple_operations::traits::ProjectProvider;

use super::DependentsArgs;
use crate::error::Result;
use crate::output::{DependentsFormatter, JsonFormatter, PlainTextFormatter};

pub(crate) fn run(args: DependentsArgs, start_path: &Path) -> Result<()> {
    let project_provider = FileSystemProjectProvider::new();
    let project = project_provider.discover_project(start_path)?;
    let change_file_reader = FileSystemChangeFileIO::new(&project.root);

    let operation = DependentsOperation::new(project_provider, change_file_reader);

    let input = DependentsInput {
        propagation: args.single_hop.then_some(PropagationMode::SingleHop),
    };

    let output = operation.execute(start_path, &input)?;

    let rendered = if args.json {
        JsonFormatter.format_dependents(&output)?
    } else {
        PlainTextFormatter.format_dependents(&output)?
    };
    print!("{rendered}");

    Ok(())
}
