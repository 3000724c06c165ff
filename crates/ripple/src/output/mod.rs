mod formatter;
mod json;
mod plain;

pub(crate) use formatter::{DependentsFormatter, StaleFormatter};
pub(crate) use json::JsonFormatter;
pub(crate) use plain::PlainTextFormatter;
