//! API request and response types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::execution::{ExecSpec, ExecStatus, ExecutionResult};

/// Request to execute a command.
///
/// Exactly one execution mode is used: a non-empty `shell` line wins,
/// otherwise `cmd` with `args` runs without a shell. `null` fields behave
/// like absent ones and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecRequest {
    /// Program to run directly (e.g., "ls").
    #[serde(default)]
    pub cmd: Option<String>,
    /// Literal arguments for `cmd` (e.g., ["-l", "/usr"]).
    #[serde(default)]
    pub args: Option<Vec<String>>,
    /// Whole command line for the shell (e.g., "ls -l /usr | grep bin").
    #[serde(default)]
    pub shell: Option<String>,
    /// Timeout in seconds; missing or non-positive means the default.
    #[serde(default, rename = "timeoutSec")]
    pub timeout_sec: Option<i64>,
}

impl ExecRequest {
    /// Decode a request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        serde_json::from_slice(body).map_err(RequestError::Malformed)
    }

    /// Effective timeout, substituting `default` for missing or non-positive values.
    pub fn timeout(&self, default: Duration) -> Duration {
        match self.timeout_sec {
            Some(secs) if secs > 0 => Duration::from_secs(secs.unsigned_abs()),
            _ => default,
        }
    }

    /// Validate the request and resolve its execution mode.
    pub fn into_spec(self, default_timeout: Duration) -> Result<ExecSpec, RequestError> {
        let timeout = self.timeout(default_timeout);
        let shell = self.shell.unwrap_or_default();
        let cmd = self.cmd.unwrap_or_default();

        let spec = if !shell.is_empty() {
            ExecSpec::shell(shell)
        } else if !cmd.is_empty() {
            ExecSpec::argv(cmd, self.args.unwrap_or_default())
        } else {
            return Err(RequestError::MissingCommand);
        };

        Ok(spec.timeout(timeout))
    }
}

/// Reasons a request is rejected before anything is spawned.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Body is not a valid request document.
    #[error("bad request: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Neither `cmd` nor `shell` was given.
    #[error("cmd or shell must be provided")]
    MissingCommand,
}

impl RequestError {
    /// Status reported for this rejection.
    pub fn status(&self) -> ExecStatus {
        match self {
            Self::Malformed(_) => ExecStatus::BadRequest,
            Self::MissingCommand => ExecStatus::MissingCommand,
        }
    }

    /// Convert into the result returned to the caller.
    pub fn into_result(self) -> ExecutionResult {
        ExecutionResult::rejected(self.status(), self.to_string())
    }
}

/// Response for command execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecResponse {
    /// 0 ok, 1 bad request, 2 missing command, 3 process error.
    pub code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code of the child, or 124 on timeout, or 1 on invocation failure.
    #[serde(rename = "exitCode")]
    pub exit_code: i32,
    /// Execution duration in milliseconds.
    pub duration_ms: u64,
    /// Failure description when `code` is not 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ExecutionResult> for ExecResponse {
    fn from(result: ExecutionResult) -> Self {
        Self {
            code: result.status.code(),
            stdout: result.stdout,
            stderr: result.stderr,
            exit_code: result.exit_code,
            duration_ms: result.duration.as_millis() as u64,
            error: result.error,
        }
    }
}
