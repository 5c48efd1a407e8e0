//! Resolution of resource references into assets.

use tracing::{debug, info};

use crate::runtime::FileTree;

use super::types::{self, ArchiveAsset, AssetData, DirectoryAsset, FetchError, FileReference};

/// Resolve a [`FileReference`] into an [`AssetData`].
///
/// URL references are downloaded (no retries; failures surface to the
/// caller unmodified). Literal references are converted in place and never
/// suspend.
pub async fn resolve(reference: FileReference) -> Result<AssetData, FetchError> {
  match reference {
    FileReference::Url { url } => {
      info!(url = %url, "fetching asset");
      let bytes = fetch_bytes(&url).await?;
      let file_name = url_file_name(&url);
      debug!(file_name = %file_name, size = bytes.len(), "asset downloaded");
      Ok(AssetData::Archive(ArchiveAsset { file_name, bytes }))
    }
    FileReference::Literal { name, contents } => Ok(AssetData::Archive(ArchiveAsset {
      file_name: name,
      bytes: contents.into_bytes(),
    })),
    FileReference::LiteralDirectory { name, files } => {
      let files: FileTree = types::literal_tree(&files);
      Ok(AssetData::Directory(DirectoryAsset { name, files }))
    }
  }
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
  let response = reqwest::get(url).await.map_err(|e| FetchError::Request {
    url: url.to_string(),
    message: e.to_string(),
  })?;

  if !response.status().is_success() {
    return Err(FetchError::Status {
      url: url.to_string(),
      status: response.status().as_u16(),
    });
  }

  let bytes = response.bytes().await.map_err(|e| FetchError::Request {
    url: url.to_string(),
    message: e.to_string(),
  })?;

  Ok(bytes.to_vec())
}

/// Derive a filename from the last path segment of a URL.
///
/// Query strings are dropped and the segment is sanitized to alphanumerics,
/// dash, underscore, and dot. Falls back to `"asset.zip"` when the URL ends
/// in a separator or the segment sanitizes away entirely.
fn url_file_name(url: &str) -> String {
  if let Some(segment) = url.rsplit('/').next() {
    let segment = segment.split('?').next().unwrap_or(segment);

    let sanitized: String = segment
      .chars()
      .map(|c| {
        if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
          c
        } else {
          '_'
        }
      })
      .collect();

    if !sanitized.is_empty() && sanitized != "." && sanitized != ".." {
      return sanitized;
    }
  }

  "asset.zip".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_file_name_simple() {
    assert_eq!(url_file_name("https://example.com/gutenberg.zip"), "gutenberg.zip");
  }

  #[test]
  fn url_file_name_drops_query_string() {
    assert_eq!(url_file_name("https://example.com/gutenberg.zip?token=abc"), "gutenberg.zip");
  }

  #[test]
  fn url_file_name_sanitizes_special_chars() {
    assert_eq!(url_file_name("https://example.com/my%20plugin.zip"), "my_20plugin.zip");
  }

  #[test]
  fn url_file_name_fallback_for_trailing_slash() {
    assert_eq!(url_file_name("https://example.com/"), "asset.zip");
  }

  #[tokio::test]
  async fn literal_reference_resolves_without_io() {
    let asset = resolve(FileReference::Literal {
      name: "tiny.zip".to_string(),
      contents: "PK".into(),
    })
    .await
    .unwrap();

    let AssetData::Archive(archive) = asset else {
      panic!("expected an archive asset");
    };
    assert_eq!(archive.file_name, "tiny.zip");
    assert_eq!(archive.bytes, b"PK");
  }

  // Fetching over the network is exercised by the embedding host; tests here
  // stay offline.
}
