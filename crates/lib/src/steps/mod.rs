//! Provisioning step handlers.
//!
//! Each handler is an async operation taking the runtime handle and a
//! decoded step payload; an external dispatcher routes on the payload's
//! discriminant tag ([`Step`]). Handlers hold no state between calls and
//! perform sequential work; the only suspension points are calls into the
//! runtime handle and the resource fetch.

pub mod install_asset;
pub mod install_plugin;
pub mod types;
pub mod wp_cli;

pub use install_asset::install_asset;
pub use install_plugin::{Activator, install_plugin};
pub use types::{
  Command, IfAlreadyInstalled, InstallAssetOptions, InstallPluginOptions, InstallPluginStep, InstalledAsset, Step,
  StepError, WpCliStep,
};
pub use wp_cli::wp_cli;
