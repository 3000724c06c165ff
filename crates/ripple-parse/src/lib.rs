mod error;
mod parse;

pub use error::{FormatError, ValidationError};
pub use parse::{CHANGE_FILE_EXTENSION, is_change_file, parse_change_file};
