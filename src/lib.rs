//! # remote-exec
//!
//! Lightweight HTTP endpoint for running one-shot commands on a host.
//!
//! Each request describes either a program with literal arguments or a
//! single shell line. The command runs as a child process under a
//! wall-clock timeout, its stdout and stderr are captured separately, and
//! the outcome comes back as one JSON document.
//!
//! ## Features
//!
//! - **Two execution modes**: argv (no shell) or `bash -lc` (pipes, globbing)
//! - **Bounded runs**: timed-out children are killed and reported as exit 124
//! - **Structured results**: exit code, output, duration, and failure reason
//! - **Lightweight**: axum + tokio, no persistent state
//!
//! ## Security
//!
//! Requests run arbitrary programs with the privileges of the server
//! process. There is no authentication, allowlist or sandbox; bind to a
//! trusted interface only.
//!
//! ## Quick Start
//!
//! ```no_run
//! use remote_exec::{CommandExecutor, ExecSpec};
//!
//! #[tokio::main]
//! async fn main() {
//!     remote_exec::logging::try_init().ok();
//!
//!     let executor = CommandExecutor::default();
//!     let result = executor.execute(&ExecSpec::argv("echo", ["hi"])).await;
//!
//!     println!("exit {} in {:?}: {}", result.exit_code, result.duration, result.stdout);
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;

// Re-export commonly used types
pub use error::{RemoteExecError, Result};
pub use execution::{
    CommandExecutor, ExecMode, ExecSpec, ExecStatus, ExecutionResult, ExecutorConfig,
};
