//! Path helpers for the sandbox virtual filesystem.
//!
//! Sandbox paths are plain `/`-separated strings on every host platform, so
//! these helpers work on strings rather than `std::path`.

/// Join path segments with `/`, collapsing duplicate separators at the seams.
///
/// Empty segments are skipped and a trailing separator is trimmed from the
/// result, so `join(&["/wordpress/", "/run-cli.php"])` is
/// `"/wordpress/run-cli.php"`.
pub fn join(segments: &[&str]) -> String {
  let mut out = String::new();
  for segment in segments {
    if segment.is_empty() {
      continue;
    }
    if out.is_empty() {
      out.push_str(segment);
    } else {
      if !out.ends_with('/') {
        out.push('/');
      }
      out.push_str(segment.trim_start_matches('/'));
    }
  }
  while out.len() > 1 && out.ends_with('/') {
    out.pop();
  }
  out
}
