//! remote-exec binary entry point.

use remote_exec::api::{serve_with_state, AppState};
use remote_exec::cli::{self, parse_args};
use remote_exec::config::Config;
use remote_exec::logging;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> remote_exec::Result<()> {
    let args = parse_args()?;

    if args.help {
        cli::print_help();
        return Ok(());
    }

    if args.version {
        cli::print_version();
        return Ok(());
    }

    let config = Config::load(&args)?;

    if logging::init_with_filter(config.log_filter()).is_err() {
        eprintln!("logging already initialized");
    }

    info!("remote-exec v{}", env!("CARGO_PKG_VERSION"));

    let server_config = config.to_server_config()?;
    let executor_config = config.to_executor_config();

    info!(
        shell = %executor_config.shell,
        default_timeout_secs = executor_config.default_timeout.as_secs(),
        "Command executor ready"
    );

    if server_config.host != "127.0.0.1" && server_config.host != "::1" {
        warn!(
            "Listening on {} without authentication; any client that can reach it can run commands",
            server_config.host
        );
    }

    serve_with_state(server_config, AppState::with_config(executor_config)).await
}
