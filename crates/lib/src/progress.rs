//! Progress reporting boundary.
//!
//! Steps describe what they are doing through a caption sink owned by the
//! caller (typically a UI progress tracker). The sink is optional; handlers
//! normalize an absent sink to [`NoopProgress`] once and never branch on it
//! again.

/// Receives human-readable captions describing the current operation.
pub trait ProgressSink: Send + Sync {
  /// Replace the currently displayed caption.
  fn set_caption(&self, text: &str);
}

/// A sink that discards every caption.
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
  fn set_caption(&self, _text: &str) {}
}

/// Shared no-op instance for normalizing `Option<&dyn ProgressSink>`.
pub static NOOP_PROGRESS: NoopProgress = NoopProgress;
