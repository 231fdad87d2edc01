//! Subprocess invocation.
//!
//! Builds the command for the tool under test as a structured argument
//! vector and runs it to completion inside the scenario's working directory,
//! capturing exit status and both output streams.

use crate::config::HarnessConfig;
use crate::error::SetupError;
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured results of one launched command.
///
/// Available after every run regardless of whether the child succeeded; a
/// non-zero exit is a result to assert on, not a harness error. The output
/// stays queryable until the next run overwrites it.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code if the process exited normally; `None` when a signal
    /// terminated it.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Translate the legacy single-quote convention to double quotes.
///
/// Input-compatibility shim: argument strings were historically authored
/// with single quotes around values. The splitter and the tool under test
/// understand double quotes only.
pub fn translate_arg_quotes(args: &str) -> String {
    args.replace('\'', "\"")
}

/// Split an argument string into a vector, honoring double-quoted segments.
///
/// Quotes group text (including whitespace) into a single argument and are
/// not part of the argument itself.
pub fn split_args(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    out.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        out.push(current);
    }
    out
}

/// The fixed formatting flag disabling the tool's timing output, so that
/// captured output stays deterministic across runs.
fn format_settings_flag() -> String {
    format!("--format-settings={}", json!({"timer": false}))
}

/// One fully-assembled tool invocation.
#[derive(Debug)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandLine {
    /// Assemble the invocation: the tool entry point, the user-supplied
    /// arguments (quote-translated, then split), and the formatting flag.
    pub fn new(interpreter: &Path, config: &HarnessConfig, argument_string: &str) -> Self {
        let mut args = vec![config.tool_entry.display().to_string()];
        args.extend(split_args(&translate_arg_quotes(argument_string)));
        args.push(format_settings_flag());
        Self {
            program: interpreter.to_path_buf(),
            args,
        }
    }

    /// The argument vector passed to the interpreter.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command to completion in `workdir`.
    ///
    /// The child inherits the harness's environment with `env` layered on
    /// top. Blocks the calling thread until the child exits; no timeout is
    /// enforced. Spawn failure is a fatal setup error, while any exit status
    /// of a spawned child is a capturable result.
    pub fn run(
        &self,
        workdir: &Path,
        env: &HashMap<String, String>,
    ) -> Result<ProcessOutput, SetupError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.current_dir(workdir);
        for (key, value) in env {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|source| SetupError::Spawn {
            command: self.program.display().to_string(),
            source,
        })?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
