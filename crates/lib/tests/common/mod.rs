//! Shared fixtures for step integration tests.
//!
//! `MockPhp` is an in-memory stand-in for the sandboxed runtime: a flat
//! virtual filesystem plus an operation log, so tests can assert not only
//! on final state but on whether and in which order the runtime was
//! touched.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use wpstage_lib::progress::ProgressSink;
use wpstage_lib::runtime::{FileTree, RunResult, Runtime, RuntimeError, WriteTreeOptions};
use wpstage_lib::steps::Activator;

/// One recorded call into the mock runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
  WriteFile { path: String },
  WriteFiles { root: String, rm_root: bool },
  Run { script_path: String },
}

#[derive(Default)]
struct State {
  files: BTreeMap<String, Vec<u8>>,
  dirs: BTreeSet<String>,
  ops: Vec<Op>,
  run_result: RunResult,
}

/// In-memory mock of the sandboxed runtime.
pub struct MockPhp {
  document_root: String,
  state: Mutex<State>,
}

impl MockPhp {
  pub fn new() -> Self {
    Self {
      document_root: "/wordpress".to_string(),
      state: Mutex::new(State::default()),
    }
  }

  /// Put a file into the virtual filesystem without logging an operation.
  pub fn seed_file(&self, path: &str, contents: &[u8]) {
    self.state.lock().unwrap().files.insert(path.to_string(), contents.to_vec());
  }

  /// Configure what the next `run` calls return.
  pub fn set_run_result(&self, result: RunResult) {
    self.state.lock().unwrap().run_result = result;
  }

  pub fn file(&self, path: &str) -> Option<Vec<u8>> {
    self.state.lock().unwrap().files.get(path).cloned()
  }

  /// Paths of all files under `prefix`, in order.
  pub fn files_under(&self, prefix: &str) -> Vec<String> {
    let want = format!("{}/", prefix.trim_end_matches('/'));
    let state = self.state.lock().unwrap();
    state.files.keys().filter(|p| p.starts_with(&want)).cloned().collect()
  }

  pub fn ops(&self) -> Vec<Op> {
    self.state.lock().unwrap().ops.clone()
  }

  /// Operations that touched the virtual filesystem or executed a script.
  pub fn op_count(&self) -> usize {
    self.state.lock().unwrap().ops.len()
  }
}

#[async_trait]
impl Runtime for MockPhp {
  async fn document_root(&self) -> Result<String, RuntimeError> {
    Ok(self.document_root.clone())
  }

  async fn file_exists(&self, path: &str) -> Result<bool, RuntimeError> {
    let state = self.state.lock().unwrap();
    let dir_prefix = format!("{}/", path.trim_end_matches('/'));
    Ok(
      state.files.contains_key(path)
        || state.dirs.contains(path)
        || state.files.keys().any(|p| p.starts_with(&dir_prefix)),
    )
  }

  async fn write_file(&self, path: &str, content: &[u8]) -> Result<(), RuntimeError> {
    let mut state = self.state.lock().unwrap();
    state.ops.push(Op::WriteFile { path: path.to_string() });
    state.files.insert(path.to_string(), content.to_vec());
    Ok(())
  }

  async fn write_files(&self, root: &str, tree: &FileTree, opts: WriteTreeOptions) -> Result<(), RuntimeError> {
    let mut state = self.state.lock().unwrap();
    state.ops.push(Op::WriteFiles {
      root: root.to_string(),
      rm_root: opts.rm_root,
    });

    if opts.rm_root {
      let prefix = format!("{}/", root.trim_end_matches('/'));
      state.files.retain(|p, _| p != root && !p.starts_with(&prefix));
    }
    state.dirs.insert(root.to_string());
    for (relative, contents) in tree.files() {
      state.files.insert(format!("{root}/{relative}"), contents.to_vec());
    }
    Ok(())
  }

  async fn run(&self, script_path: &str) -> Result<RunResult, RuntimeError> {
    let mut state = self.state.lock().unwrap();
    state.ops.push(Op::Run {
      script_path: script_path.to_string(),
    });
    Ok(state.run_result.clone())
  }
}

/// Activator that records every call and succeeds.
#[derive(Default)]
pub struct RecordingActivator {
  pub calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Activator for RecordingActivator {
  async fn activate_plugin(
    &self,
    _php: &dyn Runtime,
    plugin_path: &str,
    plugin_name: &str,
    _progress: Option<&dyn ProgressSink>,
  ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    self
      .calls
      .lock()
      .unwrap()
      .push((plugin_path.to_string(), plugin_name.to_string()));
    Ok(())
  }
}

/// Activator that always fails.
pub struct FailingActivator;

#[async_trait]
impl Activator for FailingActivator {
  async fn activate_plugin(
    &self,
    _php: &dyn Runtime,
    _plugin_path: &str,
    _plugin_name: &str,
    _progress: Option<&dyn ProgressSink>,
  ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Err("activation exploded".into())
  }
}

/// Progress sink that records every caption.
#[derive(Default)]
pub struct RecordingProgress {
  pub captions: Mutex<Vec<String>>,
}

impl ProgressSink for RecordingProgress {
  fn set_caption(&self, text: &str) {
    self.captions.lock().unwrap().push(text.to_string());
  }
}

/// Build a zip blob from `(entry name, contents)` pairs.
pub fn zip_blob(entries: &[(&str, &[u8])]) -> Vec<u8> {
  let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
  for (name, contents) in entries {
    writer.start_file(*name, SimpleFileOptions::default()).unwrap();
    writer.write_all(contents).unwrap();
  }
  writer.finish().unwrap().into_inner()
}
