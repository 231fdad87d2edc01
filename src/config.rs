//! Harness configuration.
//!
//! A [`HarnessConfig`] describes one suite: where sandboxes live, which
//! interpreter launches the tool under test, and the text conventions used
//! when comparing output.

use std::path::PathBuf;

/// Nested directory created inside every scenario sandbox by default.
///
/// The tool under test expects to find its bootstrap support files here.
pub const DEFAULT_BOOTSTRAP_SUBPATH: &str = "features/bootstrap/i18n";

/// Default anchor directory for forward-slash path rewriting in expected text.
pub const DEFAULT_FIXTURE_DIR: &str = "features";

/// Placeholder in expected text replaced with the resolved suite temp root.
pub const TMP_DIR_TOKEN: &str = "%%TMP_DIR%%";

/// Configuration shared by every scenario in a suite.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory name under the system temp dir that owns all sandboxes.
    pub suite_tag: String,

    /// Name of the interpreter executable, resolved on PATH at sandbox setup.
    pub interpreter: String,

    /// Path to the tool-under-test entry point, passed as the first argument
    /// to the interpreter.
    pub tool_entry: PathBuf,

    /// Nested directory created inside every scenario sandbox.
    pub bootstrap_subpath: PathBuf,

    /// Anchor directory name for path rewriting in expected text.
    pub fixture_dir: String,

    /// Known tool-version-dependent output variants, each rewritten to its
    /// canonical phrase before comparison.
    pub canonical_substitutions: Vec<(String, String)>,
}

impl HarnessConfig {
    /// Build a configuration with the conventional defaults.
    pub fn new(
        suite_tag: impl Into<String>,
        interpreter: impl Into<String>,
        tool_entry: impl Into<PathBuf>,
    ) -> Self {
        Self {
            suite_tag: suite_tag.into(),
            interpreter: interpreter.into(),
            tool_entry: tool_entry.into(),
            bootstrap_subpath: PathBuf::from(DEFAULT_BOOTSTRAP_SUBPATH),
            fixture_dir: DEFAULT_FIXTURE_DIR.to_string(),
            canonical_substitutions: Vec::new(),
        }
    }
}
