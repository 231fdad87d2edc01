//! Harness error types.
//!
//! Failures fall into two classes: setup/environment errors, which are fatal
//! and abort the scenario immediately, and assertion errors, which are the
//! expected mechanism by which a scenario is marked failed. Neither is ever
//! retried.

use crate::context::Outcome;
use std::path::PathBuf;
use thiserror::Error;

/// A fatal setup or environment failure.
#[derive(Debug, Error)]
pub enum SetupError {
    /// No suitable interpreter executable could be located.
    #[error("unable to find the `{0}` executable")]
    InterpreterNotFound(String),

    /// A sandbox or fixture directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A fixture file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The suite temp root could not be removed.
    #[error("failed to remove {}: {source}", .path.display())]
    RemoveDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The child process could not be spawned.
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// A relative move would leave the sandbox root.
    #[error("path {} escapes the sandbox root", .path.display())]
    PathEscape { path: PathBuf },

    /// A path-rewrite pattern failed to compile.
    #[error("invalid path-rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Run parameters could not be serialized for the environment.
    #[error("failed to serialize run parameters: {0}")]
    Params(#[from] serde_json::Error),
}

/// A mismatch between expected and actual results.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// An assertion inspected the last run before any command was launched.
    #[error("no command has been run in this scenario")]
    NoProcess,

    /// The exit status did not match the expected outcome.
    #[error("expected the command to {expected}, but got {actual}")]
    ExitStatus { expected: Outcome, actual: String },

    /// The normalized output did not contain the expected text.
    #[error("output does not contain the expected text\nexpected: {expected:?}\nactual: {actual:?}")]
    OutputContains { expected: String, actual: String },

    /// A file expected to exist was missing.
    #[error("file should exist: {}", .path.display())]
    FileMissing { path: PathBuf },

    /// A file whose content was asserted on could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File content did not equal the expected text.
    #[error("content mismatch in {}\nexpected: {expected:?}\nactual: {actual:?}", .path.display())]
    FileContent {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}
