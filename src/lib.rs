//! Scenario sandbox and subprocess assertion harness for command-line tools.
//!
//! Each test scenario gets a fresh isolated working directory under a
//! suite-level temp root. Fixture files are materialized into it, the tool
//! under test runs inside it as a child process with a controlled
//! environment, and the captured output, exit status, and resulting files
//! are compared against expected text with platform-aware normalization.
//!
//! The scenario DSL itself lives in the calling framework; this crate
//! provides the execution and assertion primitives it drives:
//!
//! 1. [`reset_suite_area`] wipes the suite temp root before and after a run.
//! 2. [`ScenarioContext::new`] provisions a unique sandbox per scenario.
//! 3. [`ScenarioContext::write_file`] materializes fixtures,
//!    [`ScenarioContext::run`] launches the tool, and the `assert_*`
//!    methods compare results.

pub mod config;
pub mod context;
pub mod error;
pub mod fixture;
pub mod normalize;
pub mod runner;
pub mod sandbox;

pub use config::HarnessConfig;
pub use context::{Outcome, ScenarioContext};
pub use error::{AssertionError, SetupError};
pub use runner::ProcessOutput;
pub use sandbox::{ScenarioSandbox, reset_suite_area, suite_root};
