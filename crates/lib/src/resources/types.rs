//! Asset descriptors and resource references.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::runtime::{FileTree, TreeNode};

/// Errors from the resource-fetch collaborator.
///
/// These are surfaced to the caller unmodified; no retry is attempted here.
#[derive(Debug, Error)]
pub enum FetchError {
  /// The HTTP request could not be completed.
  #[error("failed to fetch '{url}': {message}")]
  Request { url: String, message: String },

  /// The server answered with a non-success status.
  #[error("failed to fetch '{url}': HTTP {status}")]
  Status { url: String, status: u16 },
}

/// Errors while expanding an archive blob.
#[derive(Debug, Error)]
pub enum ArchiveError {
  /// The blob is not a readable zip archive.
  #[error("failed to read zip archive: {0}")]
  Zip(#[from] zip::result::ZipError),

  /// An entry path would escape the extraction root.
  #[error("zip entry '{0}' escapes the extraction root")]
  UnsafePath(String),

  /// I/O failure while decompressing an entry.
  #[error("failed to decompress zip entry: {0}")]
  Io(#[from] std::io::Error),
}

/// An installable asset, fully resolved into memory.
///
/// Exactly one shape per asset: either an opaque archive blob with the
/// filename it was obtained under, or an already-expanded directory tree.
#[derive(Debug, Clone)]
pub enum AssetData {
  Archive(ArchiveAsset),
  Directory(DirectoryAsset),
}

/// An archive blob plus the filename used to derive display and folder names.
#[derive(Debug, Clone)]
pub struct ArchiveAsset {
  pub file_name: String,
  pub bytes: Vec<u8>,
}

/// A named, already-expanded directory of files.
#[derive(Debug, Clone)]
pub struct DirectoryAsset {
  pub name: String,
  pub files: FileTree,
}

impl AssetData {
  /// Human-readable name shown in progress captions.
  ///
  /// Archives derive it from their filename; directories use their declared
  /// name verbatim.
  pub fn display_name(&self) -> String {
    match self {
      AssetData::Archive(archive) => super::archive_display_name(&archive.file_name),
      AssetData::Directory(dir) => dir.name.clone(),
    }
  }

  /// Default installation folder name when the caller does not pick one.
  pub fn default_folder_name(&self) -> String {
    match self {
      AssetData::Archive(archive) => super::archive_folder_name(&archive.file_name),
      AssetData::Directory(dir) => dir.name.clone(),
    }
  }
}

/// A reference to asset content, as it appears in step payloads.
///
/// References are cheap descriptions (a URL, an inline literal); resolving
/// one into an [`AssetData`] may suspend on the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resource")]
pub enum FileReference {
  /// A remote archive, downloaded at resolution time.
  #[serde(rename = "url")]
  Url { url: String },

  /// An inline file carried directly in the payload.
  #[serde(rename = "literal")]
  Literal { name: String, contents: LiteralContents },

  /// An inline directory tree carried directly in the payload.
  #[serde(rename = "literal:directory")]
  LiteralDirectory {
    name: String,
    files: BTreeMap<String, LiteralNode>,
  },
}

/// Contents of an inline file: text, or raw bytes for binary payloads such
/// as zip blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralContents {
  Text(String),
  Bytes(Vec<u8>),
}

impl LiteralContents {
  pub fn into_bytes(self) -> Vec<u8> {
    match self {
      LiteralContents::Text(text) => text.into_bytes(),
      LiteralContents::Bytes(bytes) => bytes,
    }
  }
}

impl From<&str> for LiteralContents {
  fn from(text: &str) -> Self {
    LiteralContents::Text(text.to_string())
  }
}

impl From<Vec<u8>> for LiteralContents {
  fn from(bytes: Vec<u8>) -> Self {
    LiteralContents::Bytes(bytes)
  }
}

/// A node of an inline directory tree: file text or a nested directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralNode {
  File(String),
  Dir(BTreeMap<String, LiteralNode>),
}

/// Convert an inline literal tree into a [`FileTree`].
pub(crate) fn literal_tree(nodes: &BTreeMap<String, LiteralNode>) -> FileTree {
  let mut tree = FileTree::new();
  for (name, node) in nodes {
    let entry = match node {
      LiteralNode::File(text) => TreeNode::File(text.clone().into_bytes()),
      LiteralNode::Dir(children) => TreeNode::Dir(literal_tree(children)),
    };
    tree.entries.insert(name.clone(), entry);
  }
  tree
}
