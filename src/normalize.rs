//! Text normalization for output comparison.
//!
//! Expected strings are authored once using a forward-slash path convention;
//! rendering to the host's separator is deferred to comparison time so
//! fixtures stay portable across platforms. Captured output is canonicalized
//! the same way on every platform: line endings, per-line trailing
//! whitespace, and known tool-version-dependent message variants.

use crate::config::{HarnessConfig, TMP_DIR_TOKEN};
use crate::error::SetupError;
use crate::fixture::translate_quotes;
use crate::runner::ProcessOutput;
use regex::{Captures, Regex};
use std::path::{MAIN_SEPARATOR, Path};

/// Canonicalize a text blob: CRLF to LF, trailing whitespace stripped from
/// every line, the whole trimmed. Idempotent.
pub fn canonicalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    let stripped: Vec<&str> = unified.lines().map(str::trim_end).collect();
    stripped.join("\n").trim().to_string()
}

/// Canonicalize captured output for comparison.
///
/// Concatenates stderr then stdout, applies the configured canonical
/// substitutions, then canonicalizes the whole blob.
pub fn normalize_output(output: &ProcessOutput, config: &HarnessConfig) -> String {
    let mut text = format!("{}{}", output.stderr, output.stdout);
    for (variant, canonical) in &config.canonical_substitutions {
        text = text.replace(variant, canonical);
    }
    canonicalize_text(&text)
}

/// Normalize expected text authored in the portable convention.
///
/// Applies the triple-quote translation, substitutes the `%%TMP_DIR%%`
/// placeholder with the resolved suite temp root (trailing separator
/// included), and renders fixture paths for the host platform.
pub fn normalize_expected(text: &str, suite_root: &Path, renderer: &PathRenderer) -> String {
    let text = translate_quotes(text);
    let tmp_root = format!("{}{}", suite_root.display(), MAIN_SEPARATOR);
    renderer.render(&text.replace(TMP_DIR_TOKEN, &tmp_root))
}

/// Strategy for rendering forward-slash fixture paths in expected text.
///
/// Selected once per scenario from the host path separator. On
/// forward-slash platforms expected text is already in native form and the
/// renderer is the identity. Elsewhere, exactly three patterns are
/// rewritten: plain fixture-path references, HTML-tagged path references,
/// and file-type-prefixed diff-style references. All other text is left
/// untouched.
#[derive(Debug)]
pub enum PathRenderer {
    /// The host separator is already `/`; nothing to rewrite.
    ForwardSlash,
    /// Rewrite the three path patterns to use the native separator.
    Native {
        separator: char,
        plain: Regex,
        tagged: Regex,
        diff: Regex,
    },
}

impl PathRenderer {
    /// The renderer for the host platform, anchored on the configured
    /// fixture directory.
    pub fn for_host(fixture_dir: &str) -> Result<Self, SetupError> {
        Self::with_separator(MAIN_SEPARATOR, fixture_dir)
    }

    /// A renderer for an explicit separator. Tests use this to exercise the
    /// native branch on any host.
    pub fn with_separator(separator: char, fixture_dir: &str) -> Result<Self, SetupError> {
        if separator == '/' {
            return Ok(Self::ForwardSlash);
        }
        let anchor = regex::escape(fixture_dir);
        Ok(Self::Native {
            separator,
            plain: Regex::new(&format!(r" {anchor}/[^\n ]+"))?,
            tagged: Regex::new(&format!(r#"<span class="path">{anchor}/[^<]+"#))?,
            diff: Regex::new(r"\+[fd] [^ ]+")?,
        })
    }

    fn render(&self, text: &str) -> String {
        match self {
            Self::ForwardSlash => text.to_string(),
            Self::Native {
                separator,
                plain,
                tagged,
                diff,
            } => {
                let sep = separator.to_string();
                let text = plain.replace_all(text, |c: &Captures| c[0].replace('/', &sep));
                let text = tagged.replace_all(&text, |c: &Captures| c[0].replace('/', &sep));
                let text = diff.replace_all(&text, |c: &Captures| c[0].replace('/', &sep));
                text.into_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn output(stdout: &str, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    fn config() -> HarnessConfig {
        HarnessConfig::new("suite", "sh", "tool")
    }

    #[test]
    fn stderr_precedes_stdout() {
        let normalized = normalize_output(&output("second\n", "first\n"), &config());
        assert_eq!(normalized, "first\nsecond");
    }

    #[test]
    fn crlf_becomes_lf() {
        let normalized = normalize_output(&output("a\r\nb\r\n", ""), &config());
        assert_eq!(normalized, "a\nb");
    }

    #[test]
    fn trailing_whitespace_stripped_per_line() {
        let normalized = normalize_output(&output("line1   \nline2\t\nline3\n", ""), &config());
        assert_eq!(normalized, "line1\nline2\nline3");
    }

    #[test]
    fn canonical_substitution_applied() {
        let mut config = config();
        config.canonical_substitutions.push((
            "Notice: deprecated call to ".to_string(),
            "Notice: obsolete call to ".to_string(),
        ));
        let normalized = normalize_output(&output("Notice: deprecated call to foo()\n", ""), &config);
        assert_eq!(normalized, "Notice: obsolete call to foo()");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_output(
            &output("  body \r\nwith trailing   \n\n", "stderr line  \n"),
            &config(),
        );
        let second = normalize_output(&output(&first, ""), &config());
        assert_eq!(first, second);
    }

    #[test]
    fn tmp_dir_token_becomes_suite_root_with_separator() {
        let renderer = PathRenderer::for_host("features").unwrap();
        let root = PathBuf::from("/tmp/suite");
        let normalized = normalize_expected("saved under %%TMP_DIR%%abc", &root, &renderer);
        assert_eq!(
            normalized,
            format!("saved under /tmp/suite{MAIN_SEPARATOR}abc")
        );
        assert!(!normalized.contains(TMP_DIR_TOKEN));
    }

    #[test]
    fn expected_text_gets_quote_translation() {
        let renderer = PathRenderer::for_host("features").unwrap();
        let normalized = normalize_expected("'''docstring'''", Path::new("/tmp/x"), &renderer);
        assert_eq!(normalized, "\"\"\"docstring\"\"\"");
    }

    #[test]
    fn forward_slash_renderer_is_identity() {
        let renderer = PathRenderer::with_separator('/', "features").unwrap();
        let text = "in features/bootstrap/x.feature line 3";
        assert_eq!(renderer.render(text), text);
    }

    #[test]
    fn native_renderer_rewrites_plain_path_references() {
        let renderer = PathRenderer::with_separator('\\', "features").unwrap();
        assert_eq!(
            renderer.render("in features/bootstrap/x.feature line 3"),
            "in features\\bootstrap\\x.feature line 3"
        );
    }

    #[test]
    fn native_renderer_rewrites_tagged_path_references() {
        let renderer = PathRenderer::with_separator('\\', "features").unwrap();
        assert_eq!(
            renderer.render(r#"<span class="path">features/a/b.feature</span>"#),
            r#"<span class="path">features\a\b.feature</span>"#
        );
    }

    #[test]
    fn native_renderer_rewrites_diff_style_references() {
        let renderer = PathRenderer::with_separator('\\', "features").unwrap();
        assert_eq!(renderer.render("+f some/dir/file.txt"), "+f some\\dir\\file.txt");
        assert_eq!(renderer.render("+d some/dir"), "+d some\\dir");
    }

    #[test]
    fn native_renderer_leaves_other_text_untouched() {
        let renderer = PathRenderer::with_separator('\\', "features").unwrap();
        let text = "a url http://example.com/path and spares/other/dirs";
        assert_eq!(renderer.render(text), text);
    }
}
