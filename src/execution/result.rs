//! Execution result types.

use std::process::ExitStatus;
use std::time::Duration;

/// Exit code reported when the child was killed at its deadline.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code reported when the child could not be started or waited on.
pub const INVOCATION_FAILURE_EXIT_CODE: i32 = 1;

/// Handler-level outcome of a request.
///
/// A non-zero exit from the child is still [`ExecStatus::Ok`]; only failures
/// of the spawn/wait machinery are [`ExecStatus::ProcessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// A process ran and its exit (or timeout) was observed.
    Ok,
    /// The request body could not be decoded.
    BadRequest,
    /// Neither a command nor a shell line was provided.
    MissingCommand,
    /// The process could not be started or waited on.
    ProcessError,
}

impl ExecStatus {
    /// Numeric code used on the wire.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::BadRequest => 1,
            Self::MissingCommand => 2,
            Self::ProcessError => 3,
        }
    }

    /// Whether the request was rejected before any process was spawned.
    pub fn is_rejection(self) -> bool {
        matches!(self, Self::BadRequest | Self::MissingCommand)
    }
}

/// How a run ended, as seen by the executor.
#[derive(Debug)]
pub enum RunOutcome {
    /// The child exited on its own.
    Exited(ExitStatus),
    /// The deadline elapsed and the child was killed.
    TimedOut,
    /// Spawning or waiting failed.
    Failed(crate::error::RemoteExecError),
}

/// Derive the reported exit code from a run outcome.
///
/// Precedence: the child's own non-zero code, then the timeout sentinel,
/// then the invocation-failure code, then 0.
pub fn derive_exit_code(outcome: &RunOutcome) -> i32 {
    match outcome {
        RunOutcome::Exited(status) => exit_status_code(status),
        RunOutcome::TimedOut => TIMEOUT_EXIT_CODE,
        RunOutcome::Failed(_) => INVOCATION_FAILURE_EXIT_CODE,
    }
}

/// Exit code reported when the child was terminated by a signal.
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Numeric code of an exit status; signal deaths have no code and map to -1.
fn exit_status_code(status: &ExitStatus) -> i32 {
    status.code().unwrap_or(SIGNAL_EXIT_CODE)
}

/// Result of handling one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Handler-level status.
    pub status: ExecStatus,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Child exit code or synthetic code.
    pub exit_code: i32,
    /// Wall-clock time from spawn attempt to completion.
    pub duration: Duration,
    /// Failure description, present only when `status` is not `Ok`.
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Build the result of a run from its outcome and captured output.
    pub fn from_outcome(outcome: RunOutcome, output: CapturedOutput, duration: Duration) -> Self {
        let exit_code = derive_exit_code(&outcome);
        let (status, error) = match outcome {
            RunOutcome::Failed(err) => (ExecStatus::ProcessError, Some(err.to_string())),
            RunOutcome::Exited(_) | RunOutcome::TimedOut => (ExecStatus::Ok, None),
        };

        Self {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
            duration,
            error,
        }
    }

    /// Result for a request that was rejected before spawning anything.
    pub fn rejected(status: ExecStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
            duration: Duration::ZERO,
            error: Some(message.into()),
        }
    }

    /// Check if the child ran and exited with 0.
    pub fn success(&self) -> bool {
        self.status == ExecStatus::Ok && self.exit_code == 0
    }

    /// Check if the child was killed at its deadline.
    pub fn timed_out(&self) -> bool {
        self.status == ExecStatus::Ok && self.exit_code == TIMEOUT_EXIT_CODE
    }
}

/// Source of output data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Chunk of output read from one of the child's streams.
#[derive(Debug, Clone)]
pub struct OutputChunk {
    /// Raw bytes.
    pub raw: Vec<u8>,
    /// Stream source.
    pub source: OutputSource,
}

impl OutputChunk {
    /// Create a stdout chunk.
    pub fn stdout(raw: Vec<u8>) -> Self {
        Self {
            raw,
            source: OutputSource::Stdout,
        }
    }

    /// Create a stderr chunk.
    pub fn stderr(raw: Vec<u8>) -> Self {
        Self {
            raw,
            source: OutputSource::Stderr,
        }
    }
}

/// Output accumulated so far, kept separate per stream.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    /// Append a chunk to the matching stream.
    pub fn push(&mut self, chunk: OutputChunk) {
        match chunk.source {
            OutputSource::Stdout => self.stdout.extend_from_slice(&chunk.raw),
            OutputSource::Stderr => self.stderr.extend_from_slice(&chunk.raw),
        }
    }
}
