//! Asset installation.
//!
//! Materializes a resolved asset into a target directory inside the sandbox,
//! enforcing the `ifAlreadyInstalled` policy. Archive blobs are expanded in
//! memory and written through the runtime handle; directory assets are
//! written as-is.

use tracing::{debug, info};

use crate::progress::{NOOP_PROGRESS, ProgressSink};
use crate::resources::{AssetData, unpack_zip};
use crate::runtime::{Runtime, WriteTreeOptions};
use crate::util::path;

use super::types::{IfAlreadyInstalled, InstallAssetOptions, InstalledAsset, StepError};

/// Install an asset under `options.target_path`.
///
/// The target directory is `target_path` joined with the configured folder
/// name (or a name derived from the asset). An existing target is handled
/// according to [`IfAlreadyInstalled`]: `Skip` returns the existing path
/// without touching it, `Error` fails before any write, and `Overwrite`
/// clears the directory as part of the write.
///
/// Emits an `Installing the {display name}` caption to the progress sink
/// before any filesystem work.
pub async fn install_asset(
  php: &dyn Runtime,
  asset: AssetData,
  options: InstallAssetOptions,
  progress: Option<&dyn ProgressSink>,
) -> Result<InstalledAsset, StepError> {
  let progress = progress.unwrap_or(&NOOP_PROGRESS);

  let display_name = asset.display_name();
  let folder_name = options
    .target_folder_name
    .clone()
    .filter(|name| !name.is_empty())
    .unwrap_or_else(|| asset.default_folder_name());
  let target_dir = path::join(&[&options.target_path, &folder_name]);

  progress.set_caption(&format!("Installing the {display_name}"));
  info!(path = %target_dir, "installing asset");

  let exists = php.file_exists(&target_dir).await?;
  if exists {
    match options.if_already_installed {
      IfAlreadyInstalled::Skip => {
        debug!(path = %target_dir, "target already installed, skipping");
        return Ok(InstalledAsset {
          asset_folder_path: target_dir,
          asset_folder_name: display_name,
        });
      }
      IfAlreadyInstalled::Error => {
        return Err(StepError::InstallConflict { path: target_dir });
      }
      IfAlreadyInstalled::Overwrite => {
        debug!(path = %target_dir, "target already installed, overwriting");
      }
    }
  }

  let (tree, rm_root) = match asset {
    AssetData::Archive(archive) => (unpack_zip(&archive.bytes)?, exists),
    AssetData::Directory(dir) => (dir.files, options.rm_root || exists),
  };

  php.write_files(&target_dir, &tree, WriteTreeOptions { rm_root }).await?;

  Ok(InstalledAsset {
    asset_folder_path: target_dir,
    asset_folder_name: display_name,
  })
}
