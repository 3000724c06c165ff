mod config;
mod error;
mod manifest;
mod project;
mod scope;

pub const DEFAULT_CHANGE_DIR: &str = "change";
pub const DEFAULT_BRANCH: &str = "origin/main";
pub const CONFIG_FILE_NAME: &str = "ripple.toml";
pub const MANIFEST_FILE_NAME: &str = "package.json";

pub use config::{PackageConfig, RootConfig, load_configs, parse_package_config, parse_root_config};
pub use error::ProjectError;
pub use project::{MonorepoProject, ProjectKind, discover_project};
pub use scope::{ScopeFilter, scoped_packages};

pub type Result<T> = std::result::Result<T, ProjectError>;
