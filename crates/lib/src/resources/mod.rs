//! Asset resolution: turning resource references into installable assets.
//!
//! An asset is either an archive blob (a zip file with a filename) or an
//! already-expanded directory tree. This module owns the asset shapes, the
//! fetch path that resolves references into assets, the archive expansion,
//! and the naming rules that derive display and folder names from archive
//! filenames.

pub mod archive;
pub mod fetch;
pub mod types;

pub use archive::unpack_zip;
pub use fetch::resolve;
pub use types::{
  ArchiveAsset, ArchiveError, AssetData, DirectoryAsset, FetchError, FileReference, LiteralContents, LiteralNode,
};

/// Default installation folder name for an archive: the filename with path
/// components and the `.zip` extension removed.
///
/// `"bundles/my-plugin-1.2.3.zip"` becomes `"my-plugin-1.2.3"`.
pub fn archive_folder_name(file_name: &str) -> String {
  let base = file_name.rsplit('/').next().unwrap_or(file_name);
  let stem = base.strip_suffix(".zip").unwrap_or(base);
  stem.to_string()
}

/// Human-readable display name for an archive: the folder name with `-` and
/// `_` separators replaced by spaces and each word title-cased.
///
/// `"my-plugin-1.2.3.zip"` becomes `"My Plugin 1.2.3"`; version-looking
/// suffixes are kept.
pub fn archive_display_name(file_name: &str) -> String {
  let stem = archive_folder_name(file_name);
  stem
    .split(['-', '_'])
    .filter(|word| !word.is_empty())
    .map(title_case)
    .collect::<Vec<_>>()
    .join(" ")
}

fn title_case(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}
