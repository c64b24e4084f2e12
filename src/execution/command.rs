//! Command representation.

use std::process::Stdio;
use std::time::Duration;

/// Default execution timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Get the default shell interpreter for the current platform.
pub fn default_shell() -> &'static str {
    #[cfg(unix)]
    {
        "/bin/bash"
    }
    #[cfg(windows)]
    {
        "powershell.exe"
    }
}

/// Arguments placed before the command line when running in shell mode.
fn shell_flags() -> &'static [&'static str] {
    #[cfg(unix)]
    {
        &["-lc"]
    }
    #[cfg(windows)]
    {
        &["-NoProfile", "-Command"]
    }
}

/// How a command is turned into a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecMode {
    /// Program plus literal arguments, no shell involved.
    Argv { program: String, args: Vec<String> },
    /// A single line handed to the shell interpreter.
    Shell { line: String },
}

impl ExecMode {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Argv { .. } => "argv",
            Self::Shell { .. } => "shell",
        }
    }

    /// Program that will actually be spawned.
    pub fn program<'a>(&'a self, shell: &'a str) -> &'a str {
        match self {
            Self::Argv { program, .. } => program,
            Self::Shell { .. } => shell,
        }
    }

    /// Arguments that will be passed to [`ExecMode::program`].
    pub fn args(&self) -> Vec<&str> {
        match self {
            Self::Argv { args, .. } => args.iter().map(String::as_str).collect(),
            Self::Shell { line } => shell_flags()
                .iter()
                .copied()
                .chain(std::iter::once(line.as_str()))
                .collect(),
        }
    }
}

/// A validated command ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecSpec {
    /// Execution mode.
    pub mode: ExecMode,
    /// Maximum wall-clock time before the child is killed.
    pub timeout: Duration,
}

impl ExecSpec {
    /// Create an argv-mode command.
    pub fn argv<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: ExecMode::Argv {
                program: program.into(),
                args: args.into_iter().map(Into::into).collect(),
            },
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a shell-mode command.
    pub fn shell(line: impl Into<String>) -> Self {
        Self {
            mode: ExecMode::Shell { line: line.into() },
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the execution timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the process command.
    ///
    /// stdin is the null device and both output streams are piped. The child
    /// is killed if the owning future is dropped, and on Unix it leads its own
    /// process group so a timeout can take its descendants down with it.
    pub(crate) fn to_process_command(&self, shell: &str) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(self.mode.program(shell));
        cmd.args(self.mode.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        cmd.process_group(0);

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_spec() {
        let spec = ExecSpec::argv("ls", ["-l", "/usr"]);
        assert_eq!(
            spec.mode,
            ExecMode::Argv {
                program: "ls".to_string(),
                args: vec!["-l".to_string(), "/usr".to_string()],
            }
        );
        assert_eq!(spec.timeout, DEFAULT_TIMEOUT);
        assert_eq!(spec.mode.label(), "argv");
    }

    #[test]
    fn test_argv_program_ignores_shell() {
        let spec = ExecSpec::argv("echo", ["*"]);
        assert_eq!(spec.mode.program("/bin/bash"), "echo");
        assert_eq!(spec.mode.args(), vec!["*"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_spec_uses_login_flags() {
        let spec = ExecSpec::shell("ls -l /usr | grep bin");
        assert_eq!(spec.mode.program("/bin/bash"), "/bin/bash");
        assert_eq!(spec.mode.args(), vec!["-lc", "ls -l /usr | grep bin"]);
        assert_eq!(spec.mode.label(), "shell");
    }

    #[test]
    fn test_timeout_override() {
        let spec = ExecSpec::shell("sleep 1").timeout(Duration::from_secs(3));
        assert_eq!(spec.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_default_shell() {
        assert_eq!(default_shell(), "/bin/bash");
    }
}
