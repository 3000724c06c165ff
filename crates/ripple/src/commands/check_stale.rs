use std::path::Path;

use ripple_operations::operations::{StaleCheckInput, StaleCheckOperation};
use ripple_operations::providers::{
    FileSystemChangeFileIO, FileSystemProjectProvider, Git2Provider,
};
use ripple_operations::traits::ProjectProvider;

use super::CheckStaleArgs;
use crate::error::{CliError, Result};
use crate::output::{PlainTextFormatter, StaleFormatter};

pub(crate) fn run(args: CheckStaleArgs, start_path: &Path) -> Result<()> {
    let project_provider = FileSystemProjectProvider::new();
    let project = project_provider.discover_project(start_path)?;

    let git_provider = Git2Provider::new();
    let change_file_reader = FileSystemChangeFileIO::new(&project.root);

    let operation = StaleCheckOperation::new(project_provider, git_provider, change_file_reader);

    let input = StaleCheckInput {
        from_ref: args.from_ref,
        branch: args.branch,
    };

    let output = operation.execute(start_path, &input)?;

    if !output.is_stale() {
        println!("No stale change files");
        return Ok(());
    }

    eprint!("{}", PlainTextFormatter.format_stale(&output));

    if args.strict {
        return Err(CliError::StaleChangeFiles {
            count: output.stale_files.len(),
        });
    }
    Ok(())
}
