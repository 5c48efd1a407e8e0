//! Well-known paths and defaults for the provisioning steps.
//!
//! These are plain constants rather than ambient configuration: every step
//! that uses one also accepts a per-call override in its options record.

/// Default sandbox path of the wp-cli executable archive.
pub const DEFAULT_WP_CLI_PATH: &str = "/tmp/wp-cli.phar";

/// Public download URL for wp-cli.phar, used in remediation messages when
/// the executable is missing from the sandbox.
pub const DEFAULT_WP_CLI_URL: &str = "https://playground.wordpress.net/wp-cli.phar";

/// The canonical program name a CLI command line must start with.
pub const WP_CLI_PROGRAM: &str = "wp";

/// Scratch file backing the emulated stdout stream.
pub const STDOUT_SCRATCH_PATH: &str = "/tmp/stdout";

/// Scratch file backing the emulated stderr stream.
pub const STDERR_SCRATCH_PATH: &str = "/tmp/stderr";

/// Name of the synthesized runner script, written under the document root.
pub const RUN_SCRIPT_NAME: &str = "run-cli.php";

/// Plugins directory, relative to the document root.
pub const PLUGINS_PATH: &str = "wp-content/plugins";
