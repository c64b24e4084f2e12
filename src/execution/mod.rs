//! Command execution engine.
//!
//! This module runs exactly one child process per call:
//! - Argv mode (program plus literal arguments) or shell mode (`bash -lc`)
//! - Bounded wall-clock timeout, after which the child is killed
//! - Separate, untruncated capture of stdout and stderr
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use remote_exec::execution::{CommandExecutor, ExecSpec};
//!
//! # async fn run() {
//! let executor = CommandExecutor::default();
//! let spec = ExecSpec::shell("ls -l /usr | grep bin").timeout(Duration::from_secs(5));
//! let result = executor.execute(&spec).await;
//! println!("exit {}: {}", result.exit_code, result.stdout);
//! # }
//! ```

mod command;
mod executor;
mod result;

pub use command::{default_shell, ExecMode, ExecSpec, DEFAULT_TIMEOUT};
pub use executor::{CommandExecutor, ExecutorConfig};
pub use result::{
    derive_exit_code, CapturedOutput, ExecStatus, ExecutionResult, OutputChunk, OutputSource,
    RunOutcome, INVOCATION_FAILURE_EXIT_CODE, SIGNAL_EXIT_CODE, TIMEOUT_EXIT_CODE,
};
