//! Shared test utilities for Docuscribe test suites
//!
//! # Modules
//!
//! - [`backend`]: Fake document backend served over loopback HTTP
//! - [`workspace`]: Temporary workspaces with config and env files
//! - [`cli`]: Command builders with pre-configured environments
//! - [`logging`]: Test logging configuration
//! - [`assertions`]: JSON-RPC and tool payload assertion helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use docu_test_helpers::prelude::*;
//!
//! # async fn demo() {
//! let backend = FakeBackend::builder()
//!     .catalog(catalog_body(&[("abc123", "Guide")]))
//!     .start()
//!     .await;
//! let workspace = workspace_with_backend(backend.url());
//! # }
//! ```

pub mod assertions;
pub mod backend;
pub mod cli;
pub mod logging;
pub mod workspace;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::backend::{catalog_body, CannedResponse, FakeBackend};
    pub use crate::cli::{command_for, mcp_command};
    pub use crate::logging::{init_test_logging, suppress_logs};
    pub use crate::workspace::{temp_dir, workspace_with_backend, workspace_with_env_file};
}
