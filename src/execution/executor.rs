//! Command execution engine.

use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::command::{default_shell, ExecSpec, DEFAULT_TIMEOUT};
use super::result::{CapturedOutput, ExecutionResult, OutputChunk, RunOutcome};
use crate::error::RemoteExecError;

/// Default buffer size for reading child output.
const READ_BUFFER_SIZE: usize = 8192;

/// Capacity of the channel between the stream readers and the executor.
const CHUNK_CHANNEL_CAPACITY: usize = 64;

/// Executor configuration.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Shell interpreter used for shell-mode commands.
    pub shell: String,
    /// Timeout applied when a request does not carry a positive one.
    pub default_timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            shell: default_shell().to_string(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Runs one child process per call and reports how it ended.
///
/// The executor holds no mutable state, so a single instance can be shared
/// between any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    config: ExecutorConfig,
}

impl CommandExecutor {
    /// Create a new command executor.
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Shell interpreter used for shell-mode commands.
    pub fn shell(&self) -> &str {
        &self.config.shell
    }

    /// Timeout applied when a request does not specify one.
    pub fn default_timeout(&self) -> Duration {
        self.config.default_timeout
    }

    /// Execute a command and wait for it to exit or time out.
    ///
    /// Never fails: spawn and wait errors are reported through
    /// [`ExecutionResult::status`]. Dropping the returned future kills the
    /// child.
    pub async fn execute(&self, spec: &ExecSpec) -> ExecutionResult {
        let program = spec.mode.program(&self.config.shell).to_string();
        debug!(
            mode = spec.mode.label(),
            program = %program,
            timeout_secs = spec.timeout.as_secs(),
            "spawning command"
        );

        let start = Instant::now();
        let (outcome, output) = self.run(spec, &program).await;
        let duration = start.elapsed();

        match &outcome {
            RunOutcome::Exited(status) => info!(
                mode = spec.mode.label(),
                program = %program,
                status = %status,
                duration_ms = duration.as_millis() as u64,
                "command finished"
            ),
            RunOutcome::TimedOut => warn!(
                mode = spec.mode.label(),
                program = %program,
                timeout_secs = spec.timeout.as_secs(),
                "command timed out and was killed"
            ),
            RunOutcome::Failed(err) => warn!(
                mode = spec.mode.label(),
                program = %program,
                error = %err,
                "command could not be run"
            ),
        }

        ExecutionResult::from_outcome(outcome, output, duration)
    }

    async fn run(&self, spec: &ExecSpec, program: &str) -> (RunOutcome, CapturedOutput) {
        let mut output = CapturedOutput::default();

        let deadline = tokio::time::sleep(spec.timeout);
        tokio::pin!(deadline);

        let mut child = match spec.to_process_command(&self.config.shell).spawn() {
            Ok(child) => child,
            Err(source) => {
                let err = RemoteExecError::Spawn {
                    program: program.to_string(),
                    source,
                };
                return (RunOutcome::Failed(err), output);
            }
        };

        let (tx, mut rx) = mpsc::channel::<OutputChunk>(CHUNK_CHANNEL_CAPACITY);
        let mut guard = RunGuard::new(child.id());
        if let Some(stdout) = child.stdout.take() {
            guard.track(tokio::spawn(forward(stdout, tx.clone(), OutputChunk::stdout)));
        }
        if let Some(stderr) = child.stderr.take() {
            guard.track(tokio::spawn(forward(stderr, tx.clone(), OutputChunk::stderr)));
        }
        drop(tx);

        let mut exit_status = None;
        let mut streams_open = true;

        let outcome = loop {
            if let (Some(status), false) = (exit_status, streams_open) {
                break RunOutcome::Exited(status);
            }

            tokio::select! {
                chunk = rx.recv(), if streams_open => match chunk {
                    Some(chunk) => output.push(chunk),
                    None => streams_open = false,
                },
                waited = child.wait(), if exit_status.is_none() => match waited {
                    Ok(status) => exit_status = Some(status),
                    Err(err) => break RunOutcome::Failed(RemoteExecError::Wait(err)),
                },
                () = &mut deadline => {
                    // A background descendant may hold the pipes after the
                    // child itself exited; its real status still wins.
                    break match exit_status {
                        Some(status) => RunOutcome::Exited(status),
                        None => RunOutcome::TimedOut,
                    };
                }
            }
        };

        match outcome {
            RunOutcome::Exited(_) => guard.disarm(),
            RunOutcome::TimedOut | RunOutcome::Failed(_) => {
                guard.kill();
                if let Err(err) = child.start_kill() {
                    debug!(error = %err, "child already gone when killing");
                }
            }
        }

        while let Ok(chunk) = rx.try_recv() {
            output.push(chunk);
        }

        (outcome, output)
    }
}

/// Copy one child stream into the chunk channel until EOF.
async fn forward<R>(mut reader: R, tx: mpsc::Sender<OutputChunk>, wrap: fn(Vec<u8>) -> OutputChunk)
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(wrap(buf[..n].to_vec())).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                debug!(error = %err, "output stream read failed");
                break;
            }
        }
    }
}

/// Tears a run down when it is abandoned.
///
/// Aborts the stream readers and, unless disarmed after a normal exit, kills
/// the child's process group. Runs on drop so a cancelled request leaves
/// nothing behind.
struct RunGuard {
    readers: Vec<JoinHandle<()>>,
    process_group: Option<u32>,
}

impl RunGuard {
    fn new(pid: Option<u32>) -> Self {
        Self {
            readers: Vec::with_capacity(2),
            process_group: pid,
        }
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.readers.push(handle);
    }

    fn disarm(&mut self) {
        self.process_group = None;
    }

    fn kill(&mut self) {
        if let Some(pgid) = self.process_group.take() {
            kill_process_group(pgid);
        }
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.kill();
        for reader in &self.readers {
            reader.abort();
        }
    }
}

#[cfg(unix)]
fn kill_process_group(pgid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pgid) else {
        return;
    };
    // SAFETY: kill(2) only takes plain integers; a negative pid addresses the
    // process group the child was placed in at spawn time.
    let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if rc != 0 {
        debug!(
            pgid,
            error = %std::io::Error::last_os_error(),
            "process group kill failed"
        );
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pgid: u32) {}
