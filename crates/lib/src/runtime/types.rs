//! Types exchanged with the sandboxed runtime.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors surfaced by a [`Runtime`](super::Runtime) implementation.
#[derive(Debug, Error)]
pub enum RuntimeError {
  /// A path the operation required does not exist in the sandbox.
  #[error("no such file in sandbox: {0}")]
  NotFound(String),

  /// I/O failure in the backing store.
  #[error("sandbox io error: {0}")]
  Io(#[from] std::io::Error),

  /// Any other implementation-specific failure.
  #[error("{0}")]
  Other(String),
}

impl RuntimeError {
  /// Build an [`RuntimeError::Other`] from any displayable value.
  pub fn other(message: impl Into<String>) -> Self {
    RuntimeError::Other(message.into())
  }
}

/// Captured output of a script executed inside the sandbox.
///
/// `errors` carries the runtime's own top-level error channel (e.g. a fatal
/// PHP error); an empty or absent value means the script ran to completion.
#[derive(Debug, Clone, Default)]
pub struct RunResult {
  /// Raw bytes captured from the script's stdout stream.
  pub stdout: Vec<u8>,
  /// Raw bytes captured from the script's stderr stream.
  pub stderr: Vec<u8>,
  /// Process exit code reported by the runtime.
  pub exit_code: i32,
  /// Top-level error text, when the runtime reports one.
  pub errors: Option<String>,
}

impl RunResult {
  /// stdout decoded as UTF-8, lossily.
  pub fn stdout_text(&self) -> String {
    String::from_utf8_lossy(&self.stdout).into_owned()
  }

  /// stderr decoded as UTF-8, lossily.
  pub fn stderr_text(&self) -> String {
    String::from_utf8_lossy(&self.stderr).into_owned()
  }

  /// The error text, if the runtime reported a non-empty one.
  pub fn error_text(&self) -> Option<&str> {
    match self.errors.as_deref() {
      Some(e) if !e.is_empty() => Some(e),
      _ => None,
    }
  }
}

/// A node in a [`FileTree`]: file contents or a nested directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
  File(Vec<u8>),
  Dir(FileTree),
}

/// An in-memory directory tree, keyed by path component.
///
/// Entries are kept in a `BTreeMap` so traversal and materialization order
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
  pub entries: BTreeMap<String, TreeNode>,
}

impl FileTree {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Insert a file at a `/`-separated relative path, creating intermediate
  /// directories as needed.
  ///
  /// An existing directory entry at an intermediate component is reused; any
  /// other conflicting entry is replaced.
  pub fn insert_file(&mut self, relative_path: &str, contents: Vec<u8>) {
    let mut components = relative_path.split('/').filter(|c| !c.is_empty()).peekable();
    let mut node = self;
    while let Some(component) = components.next() {
      if components.peek().is_none() {
        node.entries.insert(component.to_string(), TreeNode::File(contents));
        return;
      }
      let entry = node
        .entries
        .entry(component.to_string())
        .or_insert_with(|| TreeNode::Dir(FileTree::new()));
      if !matches!(entry, TreeNode::Dir(_)) {
        *entry = TreeNode::Dir(FileTree::new());
      }
      match entry {
        TreeNode::Dir(dir) => node = dir,
        TreeNode::File(_) => unreachable!("entry was just made a directory"),
      }
    }
  }

  /// Insert an empty directory at a `/`-separated relative path.
  pub fn insert_dir(&mut self, relative_path: &str) {
    let mut node = self;
    for component in relative_path.split('/').filter(|c| !c.is_empty()) {
      let entry = node
        .entries
        .entry(component.to_string())
        .or_insert_with(|| TreeNode::Dir(FileTree::new()));
      if !matches!(entry, TreeNode::Dir(_)) {
        *entry = TreeNode::Dir(FileTree::new());
      }
      match entry {
        TreeNode::Dir(dir) => node = dir,
        TreeNode::File(_) => unreachable!("entry was just made a directory"),
      }
    }
  }

  /// Flatten the tree into `(relative_path, contents)` pairs, depth-first in
  /// key order.
  pub fn files(&self) -> Vec<(String, &[u8])> {
    let mut out = Vec::new();
    self.collect_files("", &mut out);
    out
  }

  fn collect_files<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a [u8])>) {
    for (name, node) in &self.entries {
      let path = if prefix.is_empty() {
        name.clone()
      } else {
        format!("{prefix}/{name}")
      };
      match node {
        TreeNode::File(contents) => out.push((path, contents.as_slice())),
        TreeNode::Dir(dir) => dir.collect_files(&path, out),
      }
    }
  }
}

/// Options for [`Runtime::write_files`](super::Runtime::write_files).
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteTreeOptions {
  /// Remove the destination directory before writing, so no stale files
  /// survive from a previous installation at that path.
  pub rm_root: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn insert_file_creates_intermediate_dirs() {
    let mut tree = FileTree::new();
    tree.insert_file("a/b/c.txt", b"x".to_vec());

    let files = tree.files();
    assert_eq!(files, vec![("a/b/c.txt".to_string(), b"x".as_slice())]);
  }

  #[test]
  fn files_are_listed_in_key_order() {
    let mut tree = FileTree::new();
    tree.insert_file("z.txt", b"z".to_vec());
    tree.insert_file("a.txt", b"a".to_vec());

    let paths: Vec<String> = tree.files().into_iter().map(|(p, _)| p).collect();
    assert_eq!(paths, vec!["a.txt", "z.txt"]);
  }

  #[test]
  fn empty_dir_holds_no_files() {
    let mut tree = FileTree::new();
    tree.insert_dir("assets");
    assert!(tree.files().is_empty());
    assert!(!tree.is_empty());
  }

  #[test]
  fn run_result_error_text_ignores_empty() {
    let mut result = RunResult::default();
    assert!(result.error_text().is_none());

    result.errors = Some(String::new());
    assert!(result.error_text().is_none());

    result.errors = Some("fatal".to_string());
    assert_eq!(result.error_text(), Some("fatal"));
  }
}
