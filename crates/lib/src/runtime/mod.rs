//! The sandboxed runtime boundary.
//!
//! The provisioning steps never touch a real filesystem or process table;
//! everything goes through [`Runtime`], a handle onto the sandboxed PHP
//! environment owned by the embedding host. The handle exposes a virtual
//! filesystem and a single "run this script" primitive, and every method is
//! a suspension point.

pub mod types;

use async_trait::async_trait;

pub use types::{FileTree, RunResult, RuntimeError, TreeNode, WriteTreeOptions};

/// Handle onto a sandboxed PHP runtime.
///
/// Implementations are provided by the embedding host. Paths are virtual,
/// `/`-separated sandbox paths. The steps treat the sandbox filesystem as a
/// single-writer resource: two steps racing on the same target path resolve
/// to last-write-wins.
#[async_trait]
pub trait Runtime: Send + Sync {
  /// Root of the application's web-served files (e.g. `/wordpress`).
  async fn document_root(&self) -> Result<String, RuntimeError>;

  /// Whether a file or directory exists at `path`.
  async fn file_exists(&self, path: &str) -> Result<bool, RuntimeError>;

  /// Write a single file, creating parent directories as needed.
  async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), RuntimeError>;

  /// Recursively materialize `tree` under `root`, optionally clearing the
  /// destination first.
  async fn write_files(&self, root: &str, tree: &FileTree, opts: WriteTreeOptions) -> Result<(), RuntimeError>;

  /// Execute the script at `script_path` inside the sandbox and return its
  /// captured stdio plus the runtime's error channel.
  async fn run(&self, script_path: &str) -> Result<RunResult, RuntimeError>;
}
