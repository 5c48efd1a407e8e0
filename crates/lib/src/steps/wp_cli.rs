//! The `wp-cli` step: command emulation inside the sandbox.
//!
//! wp-cli expects a real shell environment: an argv vector, stdio streams,
//! and a tty-aware output formatter. None of those exist inside the
//! sandboxed runtime, so this step synthesizes a small PHP script that sets
//! them up and then `require`s the wp-cli archive.

use tracing::debug;

use crate::consts::{DEFAULT_WP_CLI_PATH, RUN_SCRIPT_NAME, STDERR_SCRATCH_PATH, STDOUT_SCRATCH_PATH, WP_CLI_PROGRAM};
use crate::runtime::{RunResult, Runtime};
use crate::util::{path, php};

use super::types::{StepError, WpCliStep, wrong_program_error};

/// Run a wp-cli command inside the sandbox.
///
/// The command must start with the program name `wp`; anything else fails
/// with [`StepError::Command`] before the sandbox filesystem is touched.
/// The wp-cli archive must already be present at `wp_cli_path` (default
/// `/tmp/wp-cli.phar`), otherwise [`StepError::PrerequisiteMissing`] is
/// raised and the runtime is never invoked.
///
/// A non-empty error channel in the runtime's result is surfaced as
/// [`StepError::Command`]; otherwise the captured stdio is returned
/// unchanged.
pub async fn wp_cli(php: &dyn Runtime, step: WpCliStep) -> Result<RunResult, StepError> {
  let mut args = step.command.to_argv();

  if args.is_empty() {
    return Err(wrong_program_error(None));
  }
  let program = args.remove(0);
  if program != WP_CLI_PROGRAM {
    return Err(wrong_program_error(Some(&program)));
  }

  let wp_cli_path = step.wp_cli_path.unwrap_or_else(|| DEFAULT_WP_CLI_PATH.to_string());
  if !php.file_exists(&wp_cli_path).await? {
    return Err(StepError::PrerequisiteMissing { path: wp_cli_path });
  }

  let document_root = php.document_root().await?;

  php.write_file(STDOUT_SCRATCH_PATH, b"").await?;
  php.write_file(STDERR_SCRATCH_PATH, b"").await?;

  let script = build_run_script(&wp_cli_path, &document_root, &args);
  let script_path = path::join(&[&document_root, RUN_SCRIPT_NAME]);
  php.write_file(&script_path, script.as_bytes()).await?;

  debug!(script_path = %script_path, args = ?args, "running CLI command");
  let result = php.run(&script_path).await?;

  if let Some(errors) = result.error_text() {
    return Err(StepError::Command {
      message: errors.to_string(),
    });
  }

  Ok(result)
}

/// Synthesize the runner script.
///
/// Every dynamic value is embedded through [`php`] literal encoding; raw
/// interpolation of the command arguments would let an argument terminate
/// the literal and inject code.
fn build_run_script(wp_cli_path: &str, document_root: &str, args: &[String]) -> String {
  let base_argv = php::string_array_literal(&[wp_cli_path.to_string(), format!("--path={document_root}")]);
  let extra_argv = php::string_array_literal(args);
  let entry_point = php::string_literal(wp_cli_path);

  format!(
    "<?php
// Emulate a shell script invocation of the CLI tool.

// SHELL_PIPE=0 forces ASCII-table output even without a tty attached.
putenv( 'SHELL_PIPE=0' );

$GLOBALS['argv'] = array_merge( {base_argv}, {extra_argv} );

// Provide stdin, stdout and stderr streams outside of the CLI SAPI.
define( 'STDIN', fopen( 'php://stdin', 'rb' ) );
define( 'STDOUT', fopen( 'php://stdout', 'wb' ) );
define( 'STDERR', fopen( 'php://stderr', 'wb' ) );

require {entry_point};
"
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn script_embeds_argv_after_path_argument() {
    let script = build_run_script("/tmp/wp-cli.phar", "/wordpress", &["post".to_string(), "list".to_string()]);

    assert!(script.contains("array( '/tmp/wp-cli.phar', '--path=/wordpress' )"));
    assert!(script.contains("array( 'post', 'list' )"));
  }

  #[test]
  fn script_requires_the_configured_entry_point() {
    let script = build_run_script("/custom/cli.phar", "/wordpress", &[]);

    assert!(script.contains("require '/custom/cli.phar';"));
    assert!(script.contains("array( '/custom/cli.phar', '--path=/wordpress' )"));
  }

  #[test]
  fn script_disables_pipe_detection() {
    let script = build_run_script("/tmp/wp-cli.phar", "/wordpress", &[]);
    assert!(script.contains("putenv( 'SHELL_PIPE=0' );"));
  }

  #[test]
  fn script_defines_stdio_streams() {
    let script = build_run_script("/tmp/wp-cli.phar", "/wordpress", &[]);
    assert!(script.contains("define( 'STDIN', fopen( 'php://stdin', 'rb' ) );"));
    assert!(script.contains("define( 'STDOUT', fopen( 'php://stdout', 'wb' ) );"));
    assert!(script.contains("define( 'STDERR', fopen( 'php://stderr', 'wb' ) );"));
  }

  #[test]
  fn hostile_argument_stays_inside_its_literal() {
    let hostile = r"x'); system('id'); //".to_string();
    let script = build_run_script("/tmp/wp-cli.phar", "/wordpress", &[hostile]);

    // The payload appears only with its quotes and backslashes escaped.
    assert!(script.contains(r"'x\'); system(\'id\'); //'"));
    assert!(!script.contains("system('id')"));
  }

  #[test]
  fn hostile_document_root_stays_inside_its_literal() {
    let script = build_run_script("/tmp/wp-cli.phar", "/word'press", &[]);
    assert!(script.contains(r"'--path=/word\'press'"));
  }
}
