//! Sandbox directory lifecycle.
//!
//! Every scenario owns a unique directory under a suite-level temp root.
//! The root is wiped once before and once after a whole suite run; scenario
//! directories are not cleaned up in between, so the unique naming is what
//! keeps scenarios isolated from each other.

use crate::config::HarnessConfig;
use crate::error::SetupError;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Absolute path of the suite-level temp root for this configuration.
pub fn suite_root(config: &HarnessConfig) -> PathBuf {
    std::env::temp_dir().join(&config.suite_tag)
}

/// Recursively delete the suite temp root.
///
/// A missing root is already clean. Permission errors propagate as fatal
/// setup errors. Must not run while any scenario is in flight.
pub fn reset_suite_area(config: &HarnessConfig) -> Result<(), SetupError> {
    let root = suite_root(config);
    match std::fs::remove_dir_all(&root) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(SetupError::RemoveDir { path: root, source }),
    }
}

/// A scenario's private working directory tree.
#[derive(Debug)]
pub struct ScenarioSandbox {
    root: PathBuf,
    interpreter: PathBuf,
}

impl ScenarioSandbox {
    /// Create a fresh sandbox under the suite root.
    ///
    /// The directory name derives from the current time plus a random value,
    /// so sandboxes created within the same clock tick stay distinct. The
    /// bootstrap subpath is created along with the root. Locating the
    /// interpreter is an environment precondition: failure here is fatal,
    /// not an assertable result.
    pub fn create(config: &HarnessConfig) -> Result<Self, SetupError> {
        let root = suite_root(config).join(unique_token());
        let bootstrap = root.join(&config.bootstrap_subpath);
        std::fs::create_dir_all(&bootstrap).map_err(|source| SetupError::CreateDir {
            path: bootstrap.clone(),
            source,
        })?;

        let interpreter = which::which(&config.interpreter)
            .map_err(|_| SetupError::InterpreterNotFound(config.interpreter.clone()))?;

        Ok(Self { root, interpreter })
    }

    /// The directory all of this scenario's files and launches live under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The resolved interpreter executable for subprocess launches.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }
}

/// Fixed-length directory token: nanosecond timestamp plus 64 random bits,
/// rendered as 32 hex characters.
fn unique_token() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{:016x}{:016x}", nanos as u64, rand::random::<u64>())
}
