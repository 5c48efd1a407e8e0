//! The `installPlugin` step.
//!
//! Resolves the step's resource reference into an asset, installs it under
//! the application's plugins directory, and hands the result to the
//! activation collaborator unless activation was disabled.

use async_trait::async_trait;

use tracing::warn;

use crate::consts::PLUGINS_PATH;
use crate::progress::ProgressSink;
use crate::resources;
use crate::runtime::Runtime;
use crate::util::path;

use super::install_asset::install_asset;
use super::types::{InstallAssetOptions, InstallPluginStep, InstalledAsset, StepError};

/// Activation collaborator: toggles an installed plugin on inside the
/// application's own data store.
///
/// Implemented by the embedding host; failures propagate out of
/// [`install_plugin`] as [`StepError::Activation`] with the original error
/// as source.
#[async_trait]
pub trait Activator: Send + Sync {
  async fn activate_plugin(
    &self,
    php: &dyn Runtime,
    plugin_path: &str,
    plugin_name: &str,
    progress: Option<&dyn ProgressSink>,
  ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Install (and by default activate) a plugin in the sandboxed application.
///
/// The plugin files come from `pluginData`: an archive reference or a
/// directory tree. A payload with neither `pluginData` nor the deprecated
/// `pluginZipFile` alias fails with [`StepError::InvalidDescriptor`].
pub async fn install_plugin(
  php: &dyn Runtime,
  step: InstallPluginStep,
  activator: &dyn Activator,
  progress: Option<&dyn ProgressSink>,
) -> Result<InstalledAsset, StepError> {
  let InstallPluginStep {
    plugin_data,
    plugin_zip_file,
    options,
    if_already_installed,
  } = step;

  let reference = match (plugin_zip_file, plugin_data) {
    (Some(legacy), _) => {
      warn!("the \"pluginZipFile\" option is deprecated, use \"pluginData\" instead");
      legacy
    }
    (None, Some(reference)) => reference,
    (None, None) => return Err(StepError::InvalidDescriptor),
  };

  let asset = resources::resolve(reference).await?;

  let document_root = php.document_root().await?;
  let installed = install_asset(
    php,
    asset,
    InstallAssetOptions {
      target_path: path::join(&[&document_root, PLUGINS_PATH]),
      target_folder_name: options.target_folder_name,
      if_already_installed,
      rm_root: true,
    },
    progress,
  )
  .await?;

  if options.activate {
    activator
      .activate_plugin(php, &installed.asset_folder_path, &installed.asset_folder_name, progress)
      .await
      .map_err(|source| StepError::Activation {
        name: installed.asset_folder_name.clone(),
        source,
      })?;
  }

  Ok(installed)
}
