//! Fixture file materialization.

use crate::error::SetupError;
use std::fs;
use std::path::Path;

/// Translate the authoring quote convention to the tool's native one.
///
/// Fixture authors write `'''` where the tool under test expects `"""`.
/// Plain token substitution; not escaping-aware.
pub fn translate_quotes(text: &str) -> String {
    text.replace("'''", "\"\"\"")
}

/// Write a text file at `relative` under `base`, creating missing parent
/// directories and overwriting any existing file.
pub fn write_fixture(base: &Path, relative: &Path, content: &str) -> Result<(), SetupError> {
    let path = base.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SetupError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, content).map_err(|source| SetupError::WriteFile { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn written_content_reads_back_exactly() {
        let dir = tempdir().unwrap();
        let content = "Feature: x\n  Scenario: y\n";
        write_fixture(dir.path(), Path::new("test.feature"), content).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("test.feature")).unwrap(),
            content
        );
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        write_fixture(
            dir.path(),
            Path::new("features/bootstrap/i18n/test.feature"),
            "Feature: x",
        )
        .unwrap();
        assert!(dir.path().join("features/bootstrap/i18n/test.feature").is_file());
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempdir().unwrap();
        write_fixture(dir.path(), Path::new("a.txt"), "first").unwrap();
        write_fixture(dir.path(), Path::new("a.txt"), "second").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "second");
    }

    #[test]
    fn quote_translation() {
        assert_eq!(translate_quotes("'''text'''"), "\"\"\"text\"\"\"");
        assert_eq!(translate_quotes("no quotes"), "no quotes");
        assert_eq!(translate_quotes("'single' stays"), "'single' stays");
    }
}
