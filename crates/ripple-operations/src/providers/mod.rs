mod change_file_io;
mod git;
mod project;

pub use change_file_io::FileSystemChangeFileIO;
pub use git::Git2Provider;
pub use project::FileSystemProjectProvider;
