mod change_file_io;
mod git_provider;
mod project_provider;

pub use change_file_io::ChangeFileReader;
pub use git_provider::GitProvider;
pub use project_provider::ProjectProvider;
