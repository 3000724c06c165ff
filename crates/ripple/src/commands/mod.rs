mod check_stale;
mod dependents;

use std::path::Path;

use clap::{Args, Subcommand};

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show which dependent packages must be bumped along with the changed ones
    Dependents(DependentsArgs),
    /// Report change files that were not added or modified on this branch
    CheckStale(CheckStaleArgs),
}

#[derive(Args)]
pub(crate) struct DependentsArgs {
    /// Only bump direct dependents of packages named in change files
    #[arg(long)]
    pub single_hop: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub(crate) struct CheckStaleArgs {
    /// Ref to diff against (takes precedence over --branch)
    #[arg(long)]
    pub from_ref: Option<String>,

    /// Branch to diff against (default: configured branch)
    #[arg(long)]
    pub branch: Option<String>,

    /// Exit with an error when stale change files are found
    #[arg(long)]
    pub strict: bool,
}

impl Commands {
    pub(crate) fn execute(self, start_path: &Path) -> Result<()> {
        match self {
            Self::Dependents(args) => dependents::run(args, start_path),
            Self::CheckStale(args) => check_stale::run(args, start_path),
        }
    }
}
