//! Archive expansion.
//!
//! Archive blobs are expanded entirely in memory into a [`FileTree`]; all
//! materialization into the sandbox goes through the runtime handle, which
//! has no unzip primitive of its own.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::runtime::FileTree;

use super::types::ArchiveError;

/// Expand a zip blob into a [`FileTree`].
///
/// Entry paths are validated with `enclosed_name`; an entry that would
/// escape the extraction root (absolute paths, `..` traversal) fails the
/// whole expansion with [`ArchiveError::UnsafePath`].
pub fn unpack_zip(bytes: &[u8]) -> Result<FileTree, ArchiveError> {
  let mut archive = ZipArchive::new(Cursor::new(bytes))?;
  let mut tree = FileTree::new();

  for index in 0..archive.len() {
    let mut entry = archive.by_index(index)?;

    let Some(path) = entry.enclosed_name() else {
      return Err(ArchiveError::UnsafePath(entry.name().to_string()));
    };
    let relative: Vec<String> = path
      .components()
      .map(|c| c.as_os_str().to_string_lossy().into_owned())
      .collect();
    if relative.is_empty() {
      continue;
    }
    let relative = relative.join("/");

    if entry.is_dir() {
      tree.insert_dir(&relative);
    } else {
      let mut contents = Vec::with_capacity(entry.size() as usize);
      entry.read_to_end(&mut contents)?;
      tree.insert_file(&relative, contents);
    }
  }

  Ok(tree)
}
