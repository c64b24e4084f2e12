//! API layer for remote-exec.
//!
//! This module exposes the command executor over HTTP.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/v1` - API information
//! - `POST /api/v1/exec` - Run one command and return its output
//!
//! ## Example
//!
//! ```no_run
//! use remote_exec::api::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> remote_exec::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 3000);
//!     serve(config).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve, serve_with_state, ServerConfig};
pub use types::{ExecRequest, ExecResponse, RequestError};
