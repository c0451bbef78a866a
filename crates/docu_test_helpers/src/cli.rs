//! Command builders for tests
//!
//! Provides pre-configured command builders with clean environments
//! to prevent log pollution and ensure consistent test execution.

use assert_cmd::Command;

/// Get a Command for the `docu_mcp` binary with clean environment
///
/// This command is pre-configured with:
/// - `RUST_LOG=error` to suppress INFO/DEBUG logs in tests
/// - `SERVER_BACKEND_URL` removed so the user's backend is never contacted
pub fn mcp_command() -> Command {
    command_for("docu_mcp")
}

/// Get a Command for a specific binary with clean environment
///
/// # Arguments
///
/// * `bin_name` - Name of the binary (e.g., "docu_mcp")
#[allow(deprecated)]
pub fn command_for(bin_name: &str) -> Command {
    let mut cmd = Command::cargo_bin(bin_name)
        .unwrap_or_else(|_| panic!("Failed to find {} binary", bin_name));
    cmd.env("RUST_LOG", "error");
    cmd.env_remove("SERVER_BACKEND_URL");
    cmd
}
