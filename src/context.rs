//! Per-scenario execution context.
//!
//! A [`ScenarioContext`] is owned exclusively by one scenario for its whole
//! duration. It holds the sandbox directory, the current path cursor, the
//! environment staged for the next launch, and the output of the last
//! launch. No state is shared between scenarios.

use crate::config::HarnessConfig;
use crate::error::{AssertionError, SetupError};
use crate::fixture::{translate_quotes, write_fixture};
use crate::normalize::{self, PathRenderer};
use crate::runner::{CommandLine, ProcessOutput};
use crate::sandbox::{ScenarioSandbox, suite_root};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Expected outcome of a launched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exit code 0.
    Succeeded,
    /// Any non-zero exit, including termination by signal.
    Failed,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Succeeded => write!(f, "succeed"),
            Outcome::Failed => write!(f, "fail"),
        }
    }
}

/// Execution context for one scenario.
pub struct ScenarioContext {
    config: HarnessConfig,
    sandbox: ScenarioSandbox,
    cursor: PathBuf,
    staged_env: HashMap<String, String>,
    last_run: Option<ProcessOutput>,
    renderer: PathRenderer,
}

impl ScenarioContext {
    /// Create a fresh sandbox and context for one scenario.
    ///
    /// Fails fatally when the interpreter cannot be located or the sandbox
    /// tree cannot be created.
    pub fn new(config: HarnessConfig) -> Result<Self, SetupError> {
        let sandbox = ScenarioSandbox::create(&config)?;
        let renderer = PathRenderer::for_host(&config.fixture_dir)?;
        let cursor = sandbox.root().to_path_buf();
        Ok(Self {
            config,
            sandbox,
            cursor,
            staged_env: HashMap::new(),
            last_run: None,
            renderer,
        })
    }

    /// The sandbox root owned by this scenario.
    pub fn sandbox_root(&self) -> &Path {
        self.sandbox.root()
    }

    /// Where the next file operation or launch happens.
    pub fn current_path(&self) -> &Path {
        &self.cursor
    }

    /// Output of the last launched command, if any.
    pub fn last_output(&self) -> Option<&ProcessOutput> {
        self.last_run.as_ref()
    }

    /// Write a fixture file at `relative` under the current path.
    ///
    /// Content passes through the authoring quote translation; missing
    /// parent directories are created.
    pub fn write_file(
        &self,
        relative: impl AsRef<Path>,
        content: &str,
    ) -> Result<(), SetupError> {
        write_fixture(&self.cursor, relative.as_ref(), &translate_quotes(content))
    }

    /// Advance the cursor to a relative path, creating the directory if
    /// absent. The cursor never leaves the sandbox root.
    pub fn move_to(&mut self, relative: impl AsRef<Path>) -> Result<(), SetupError> {
        let target = confined_join(&self.cursor, self.sandbox.root(), relative.as_ref())?;
        std::fs::create_dir_all(&target).map_err(|source| SetupError::CreateDir {
            path: target.clone(),
            source,
        })?;
        self.cursor = target;
        Ok(())
    }

    /// Stage environment variables for the next launch only.
    ///
    /// Replaces anything staged earlier; the variables are consumed by the
    /// next [`run`](Self::run) and do not carry over to later runs.
    pub fn set_env(&mut self, vars: HashMap<String, String>) {
        self.staged_env = vars;
    }

    /// Stage one variable carrying serialized run parameters.
    pub fn stage_params<T: Serialize>(
        &mut self,
        name: &str,
        params: &T,
    ) -> Result<(), SetupError> {
        let value = serde_json::to_string(params)?;
        self.staged_env.insert(name.to_string(), value);
        Ok(())
    }

    /// Launch the tool under test with the given argument string.
    ///
    /// Blocks until the child exits; the captured exit status and streams
    /// become the subject of subsequent assertions. Only spawn failure is a
    /// harness error.
    pub fn run(&mut self, argument_string: &str) -> Result<(), SetupError> {
        let command = CommandLine::new(self.sandbox.interpreter(), &self.config, argument_string);
        let env = std::mem::take(&mut self.staged_env);
        self.last_run = Some(command.run(&self.cursor, &env)?);
        Ok(())
    }

    /// Assert the last command's exit status matched the expected outcome.
    ///
    /// On mismatch the captured output is echoed to stderr for diagnosis
    /// before the failure is returned.
    pub fn assert_exit_status(&self, expected: Outcome) -> Result<(), AssertionError> {
        let output = self.last_run.as_ref().ok_or(AssertionError::NoProcess)?;
        let matched = match expected {
            Outcome::Succeeded => output.exit_code == Some(0),
            Outcome::Failed => output.exit_code != Some(0),
        };
        if matched {
            return Ok(());
        }

        eprintln!(
            "Actual output:\n\n{}",
            normalize::normalize_output(output, &self.config)
        );
        Err(AssertionError::ExitStatus {
            expected,
            actual: describe_exit(output.exit_code),
        })
    }

    /// Assert the normalized output contains the normalized expected text.
    ///
    /// Substring match: surrounding output is tolerated.
    pub fn assert_output_contains(&self, expected: &str) -> Result<(), AssertionError> {
        let output = self.last_run.as_ref().ok_or(AssertionError::NoProcess)?;
        let actual = normalize::normalize_output(output, &self.config);
        let expected = self.normalize_expected(expected);
        if actual.contains(&expected) {
            Ok(())
        } else {
            Err(AssertionError::OutputContains { expected, actual })
        }
    }

    /// Assert a file exists at `relative` under the current path.
    pub fn assert_file_exists(&self, relative: impl AsRef<Path>) -> Result<(), AssertionError> {
        let path = self.cursor.join(relative.as_ref());
        if path.exists() {
            Ok(())
        } else {
            Err(AssertionError::FileMissing { path })
        }
    }

    /// Assert a file exists and its canonicalized content equals the
    /// normalized expected text exactly.
    pub fn assert_file_content_equals(
        &self,
        relative: impl AsRef<Path>,
        expected: &str,
    ) -> Result<(), AssertionError> {
        let path = self.cursor.join(relative.as_ref());
        if !path.exists() {
            return Err(AssertionError::FileMissing { path });
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|source| AssertionError::FileUnreadable {
                path: path.clone(),
                source,
            })?;

        let actual = normalize::canonicalize_text(&content);
        let expected = self.normalize_expected(expected);
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionError::FileContent {
                path,
                expected,
                actual,
            })
        }
    }

    /// Compose the exit-status assertion and the output-contains assertion.
    pub fn assert_outcome_with_output(
        &self,
        outcome: Outcome,
        expected: &str,
    ) -> Result<(), AssertionError> {
        self.assert_exit_status(outcome)?;
        self.assert_output_contains(expected)
    }

    fn normalize_expected(&self, text: &str) -> String {
        normalize::normalize_expected(text, &suite_root(&self.config), &self.renderer)
    }
}

fn describe_exit(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".to_string(),
    }
}

/// Resolve `relative` against `base` without leaving `root`.
///
/// `..` components are resolved lexically; stepping above the sandbox root
/// or passing an absolute path is a fatal setup error.
fn confined_join(base: &Path, root: &Path, relative: &Path) -> Result<PathBuf, SetupError> {
    if relative.is_absolute() {
        return Err(SetupError::PathEscape {
            path: relative.to_path_buf(),
        });
    }

    let mut resolved = base.to_path_buf();
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                if resolved == root || !resolved.pop() {
                    return Err(SetupError::PathEscape {
                        path: relative.to_path_buf(),
                    });
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(SetupError::PathEscape {
                    path: relative.to_path_buf(),
                });
            }
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confined_join_resolves_within_root() {
        let root = Path::new("/sandbox");
        let joined = confined_join(root, root, Path::new("features/bootstrap")).unwrap();
        assert_eq!(joined, PathBuf::from("/sandbox/features/bootstrap"));
    }

    #[test]
    fn confined_join_allows_parent_within_root() {
        let root = Path::new("/sandbox");
        let base = root.join("features/bootstrap");
        let joined = confined_join(&base, root, Path::new("../i18n")).unwrap();
        assert_eq!(joined, PathBuf::from("/sandbox/features/i18n"));
    }

    #[test]
    fn confined_join_rejects_escape_above_root() {
        let root = Path::new("/sandbox");
        let result = confined_join(root, root, Path::new("../outside"));
        assert!(matches!(result, Err(SetupError::PathEscape { .. })));
    }

    #[test]
    fn confined_join_rejects_absolute_paths() {
        let root = Path::new("/sandbox");
        let result = confined_join(root, root, Path::new("/etc"));
        assert!(matches!(result, Err(SetupError::PathEscape { .. })));
    }

    #[test]
    fn outcome_display_matches_assertion_wording() {
        assert_eq!(Outcome::Succeeded.to_string(), "succeed");
        assert_eq!(Outcome::Failed.to_string(), "fail");
    }

    #[test]
    fn describe_exit_covers_signal_termination() {
        assert_eq!(describe_exit(Some(1)), "exit code 1");
        assert_eq!(describe_exit(None), "termination by signal");
    }
}
