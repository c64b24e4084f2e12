//! Command-line interface for remote-exec.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Command-line arguments.
///
/// Every setting is optional so that unset flags leave the values coming
/// from the environment or the configuration file alone.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Host address to bind to.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Shell interpreter for shell-mode commands.
    pub shell: Option<String>,
    /// Default timeout in seconds for requests without one.
    pub default_timeout: Option<u64>,
    /// Exit immediately on Ctrl-C instead of draining requests.
    pub no_graceful_shutdown: bool,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('H') | Long("host") => {
                let value: String = parser.value()?.parse()?;
                let host = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidValue("host", value))?;
                result.host = Some(host);
            }
            Short('p') | Long("port") => {
                let value: String = parser.value()?.parse()?;
                let port = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidValue("port", value))?;
                result.port = Some(port);
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('s') | Long("shell") => {
                result.shell = Some(parser.value()?.parse()?);
            }
            Short('t') | Long("timeout") => {
                let value: String = parser.value()?.parse()?;
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ArgsError::InvalidValue("timeout", value))?;
                result.default_timeout = Some(secs);
            }
            Long("no-graceful-shutdown") => {
                result.no_graceful_shutdown = true;
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"remote-exec {version}
Run one-shot commands over HTTP with a timeout

USAGE:
    remote-exec [OPTIONS]

OPTIONS:
    -H, --host <ADDR>          Host address to bind [default: 127.0.0.1]
    -p, --port <PORT>          Port to listen on [default: 3000]
    -c, --config <FILE>        Path to configuration file (JSON)
    -s, --shell <PATH>         Shell for "shell" requests [default: /bin/bash]
    -t, --timeout <SECS>       Default per-request timeout [default: 10]
    -l, --log-level <LVL>      Log level (error, warn, info, debug, trace)
        --no-graceful-shutdown Exit immediately on Ctrl-C / SIGTERM
    -h, --help                 Print help
    -V, --version              Print version

ENVIRONMENT VARIABLES:
    REMOTE_EXEC_HOST        Host address (overrides config)
    REMOTE_EXEC_PORT        Port number (overrides config)
    REMOTE_EXEC_SHELL       Shell interpreter (overrides config)
    REMOTE_EXEC_LOG_LEVEL   Log level (overrides config)
    RUST_LOG                Alternative log level setting

ENDPOINT:
    POST /api/v1/exec  {{"cmd": "ls", "args": ["-l"]}}
                       {{"shell": "ls -l | grep bin", "timeoutSec": 5}}

WARNING:
    Every request runs with the privileges of this process. There is no
    authentication or command filtering; keep it bound to a trusted network.
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("remote-exec {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// Lexopt parsing error.
    #[error("{0}")]
    Lexopt(#[from] lexopt::Error),
    /// Invalid argument value.
    #[error("invalid value for --{0}: '{1}'")]
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    #[error("unexpected argument: '{0}'")]
    UnexpectedArgument(String),
}
