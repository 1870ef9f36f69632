//! Shell script export: typed commands, validation and generation.

pub mod command;
pub mod generator;

pub use command::{CommitTime, Script, ScriptCommand, ScriptSummary, BRANCH, REMOTE, SCRIPT_FILE_NAME};
pub use generator::{generate, validate_email, validate_repository_url, ExportRequest};
