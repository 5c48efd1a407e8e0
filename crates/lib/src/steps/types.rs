//! Step payloads, option records, and the step error taxonomy.
//!
//! The payload types mirror the JSON wire format consumed by an external
//! dispatcher; the handlers in this module's siblings take the decoded
//! payloads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_WP_CLI_URL, WP_CLI_PROGRAM};
use crate::resources::{ArchiveError, FetchError, FileReference};
use crate::runtime::RuntimeError;
use crate::shell;

/// Errors surfaced by step handlers.
///
/// Every error propagates to the immediate caller; nothing is retried or
/// suppressed inside the handlers.
#[derive(Debug, Error)]
pub enum StepError {
  /// The step payload carries no asset descriptor at all.
  #[error("the step carries no plugin data; provide \"pluginData\"")]
  InvalidDescriptor,

  /// The installation target already exists and the policy forbids reuse.
  #[error("a plugin is already installed at {path}; pass ifAlreadyInstalled: \"overwrite\" or \"skip\" to proceed")]
  InstallConflict { path: String },

  /// A required executable is absent from the sandbox.
  #[error(
    "required executable not found at {path}. Download wp-cli.phar from {url} and write it to {path} in the sandbox before running CLI commands",
    url = DEFAULT_WP_CLI_URL
  )]
  PrerequisiteMissing { path: String },

  /// A malformed invocation, or an error reported by the executed script.
  #[error("{message}")]
  Command { message: String },

  /// Resource fetch failure, propagated unmodified.
  #[error(transparent)]
  Fetch(#[from] FetchError),

  /// The asset's archive blob could not be expanded.
  #[error(transparent)]
  Archive(#[from] ArchiveError),

  /// The activation collaborator failed.
  #[error("failed to activate plugin '{name}': {source}")]
  Activation {
    name: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  /// The sandboxed runtime failed.
  #[error(transparent)]
  Runtime(#[from] RuntimeError),
}

/// Policy for an installation target that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IfAlreadyInstalled {
  /// Clear the existing contents and install over them.
  #[default]
  Overwrite,
  /// Keep the existing installation untouched and return its path.
  ///
  /// The probe is existence-only: the contents of the existing directory
  /// are not compared against the incoming asset.
  Skip,
  /// Fail with [`StepError::InstallConflict`] before writing anything.
  Error,
}

/// One declarative provisioning step, tagged by its discriminant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step")]
pub enum Step {
  #[serde(rename = "installPlugin")]
  InstallPlugin(InstallPluginStep),
  #[serde(rename = "wp-cli")]
  WpCli(WpCliStep),
}

/// Payload of the `installPlugin` step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallPluginStep {
  /// The plugin files to install: an archive, or a directory containing the
  /// plugin files at its root.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plugin_data: Option<FileReference>,

  /// Deprecated alias for `plugin_data`; takes precedence when present.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub plugin_zip_file: Option<FileReference>,

  #[serde(default)]
  pub options: InstallPluginOptions,

  #[serde(default)]
  pub if_already_installed: IfAlreadyInstalled,
}

/// Optional knobs of the `installPlugin` step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallPluginOptions {
  /// Whether to activate the plugin after installing it.
  #[serde(default = "default_true")]
  pub activate: bool,

  /// Folder to install into; defaults to a name derived from the asset.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target_folder_name: Option<String>,
}

impl Default for InstallPluginOptions {
  fn default() -> Self {
    Self {
      activate: true,
      target_folder_name: None,
    }
  }
}

fn default_true() -> bool {
  true
}

/// Payload of the `wp-cli` step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WpCliStep {
  /// The CLI command to run.
  pub command: Command,

  /// Sandbox path of wp-cli.phar; defaults to
  /// [`DEFAULT_WP_CLI_PATH`](crate::consts::DEFAULT_WP_CLI_PATH).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wp_cli_path: Option<String>,
}

/// A command line: raw text, or an already-split argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
  Line(String),
  Argv(Vec<String>),
}

impl Command {
  /// Normalize into an argument vector, tokenizing raw text once.
  pub fn to_argv(&self) -> Vec<String> {
    match self {
      Command::Line(line) => shell::tokenize(line.trim()),
      Command::Argv(argv) => argv.clone(),
    }
  }
}

/// Options for materializing a single asset.
#[derive(Debug, Clone, Default)]
pub struct InstallAssetOptions {
  /// Directory the asset folder is created under.
  pub target_path: String,

  /// Folder name override; defaults to a name derived from the asset.
  pub target_folder_name: Option<String>,

  pub if_already_installed: IfAlreadyInstalled,

  /// For directory assets: clear the target before writing, so no stale
  /// files survive from a previous installation at that path.
  pub rm_root: bool,
}

/// A successfully materialized asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledAsset {
  /// Absolute sandbox path of the asset folder.
  pub asset_folder_path: String,

  /// Display name of the asset, as shown in progress captions.
  pub asset_folder_name: String,
}

pub(crate) fn wrong_program_error(got: Option<&str>) -> StepError {
  let message = match got {
    Some(got) => format!("the first argument must be \"{WP_CLI_PROGRAM}\", got \"{got}\""),
    None => format!("the command is empty; expected it to start with \"{WP_CLI_PROGRAM}\""),
  };
  StepError::Command { message }
}
