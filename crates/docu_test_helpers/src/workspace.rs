//! Workspace initialization utilities for tests
//!
//! Provides temporary directories laid out the way the Docuscribe server
//! expects to find its optional config and env files.

use assert_fs::TempDir;
use std::fs;

/// Create a temporary directory for testing
///
/// The directory will be automatically cleaned up when the `TempDir` is dropped.
///
/// # Example
///
/// ```rust
/// use docu_test_helpers::workspace::temp_dir;
///
/// let temp = temp_dir();
/// assert!(temp.path().exists());
/// ```
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create a workspace whose `.docuscribe/config.toml` points at `backend_url`
///
/// # Example
///
/// ```rust
/// use docu_test_helpers::workspace::workspace_with_backend;
///
/// let workspace = workspace_with_backend("http://127.0.0.1:9999");
/// assert!(workspace.path().join(".docuscribe/config.toml").exists());
/// ```
pub fn workspace_with_backend(backend_url: &str) -> TempDir {
    let temp = temp_dir();
    let config_dir = temp.path().join(".docuscribe");
    fs::create_dir_all(&config_dir).expect("Failed to create .docuscribe directory");

    let config = format!("[backend]\nurl = \"{}\"\n", backend_url);
    fs::write(config_dir.join("config.toml"), config).expect("Failed to write config.toml");

    temp
}

/// Create a workspace with a `.env.local` file holding the given lines
pub fn workspace_with_env_file(lines: &[&str]) -> TempDir {
    let temp = temp_dir();
    let content = lines.join("\n") + "\n";
    fs::write(temp.path().join(".env.local"), content).expect("Failed to write .env.local");
    temp
}
