//! Test runner boundary
//!
//! The runner enumerates tests in list mode and executes a generated test
//! list. Both calls are synchronous child processes with no timeout; a hung
//! runner hangs the run.

use crate::config::RunnerConfig;
use crate::error::{AppError, AppResult};
use std::path::Path;
use std::process::{Command, Stdio};

/// Enumerates and executes tests
pub trait TestRunner {
    /// Return the raw list-mode output
    fn list(&self, passthrough: &[String]) -> AppResult<String>;

    /// Execute the tests named in `test_list` and return the runner's exit code
    fn execute(&self, test_list: &Path, passthrough: &[String]) -> AppResult<i32>;
}

/// Runner backed by the command line in `[runner]`
#[derive(Debug, Clone)]
pub struct CommandRunner {
    config: RunnerConfig,
}

impl CommandRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    fn command(&self, mode_args: &[&str], passthrough: &[String]) -> (Command, String) {
        let mut command = Command::new(self.config.program());
        command
            .args(self.config.args())
            .args(mode_args)
            .args(passthrough);

        let rendered = std::iter::once(self.config.program())
            .chain(self.config.args().iter().map(String::as_str))
            .chain(mode_args.iter().copied())
            .chain(passthrough.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        (command, rendered)
    }
}

impl TestRunner for CommandRunner {
    fn list(&self, passthrough: &[String]) -> AppResult<String> {
        let (mut command, rendered) = self.command(&[self.config.list_flag()], passthrough);
        tracing::debug!(command = %rendered, "Listing tests");

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|e| AppError::RunnerFailed {
                command: rendered.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(AppError::RunnerFailed {
                command: rendered,
                reason: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn execute(&self, test_list: &Path, passthrough: &[String]) -> AppResult<i32> {
        let list_path = test_list.display().to_string();
        let (mut command, rendered) =
            self.command(&[self.config.test_list_flag(), &list_path], passthrough);
        tracing::info!(command = %rendered, "Executing selected tests");

        let status = command.status().map_err(|e| AppError::RunnerFailed {
            command: rendered,
            reason: e.to_string(),
        })?;

        // Killed by a signal: no code, report failure
        Ok(status.code().unwrap_or(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn runner(program: &str, args: &[&str]) -> CommandRunner {
        let toml = format!(
            r#"
[suites]
default = "smoke"

[suites.definitions.smoke]
tags = ["@smoke"]

[runner]
program = "{}"
args = [{}]
list_flag = "list-mode"
test_list_flag = "--file"
"#,
            program,
            args.iter()
                .map(|a| format!("\"{}\"", a))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let config = crate::config::Config::from_str(&toml).expect("should parse config");
        CommandRunner::new(config.runner)
    }

    #[test]
    fn test_command_renders_in_argument_order() {
        let runner = runner("npx", &["playwright", "test"]);
        let (_, rendered) = runner.command(&["--list"], &["--project=chromium".to_string()]);
        assert_eq!(rendered, "npx playwright test --list --project=chromium");
    }

    #[test]
    fn test_missing_program_is_runner_error() {
        let runner = runner("definitely-not-a-test-runner", &[]);
        let err = runner.list(&[]).unwrap_err();
        assert!(matches!(err, AppError::RunnerFailed { .. }));
        assert!(err.to_string().contains("definitely-not-a-test-runner list-mode"));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_returns_stdout() {
        let runner = runner("echo", &["[chromium] › a.spec.ts:1:1 › t1"]);
        let output = runner.list(&[]).expect("echo succeeds");
        assert_eq!(output.trim(), "[chromium] › a.spec.ts:1:1 › t1 list-mode");
    }

    #[cfg(unix)]
    #[test]
    fn test_list_non_zero_exit_is_runner_error() {
        let runner = runner("false", &[]);
        assert!(matches!(runner.list(&[]), Err(AppError::RunnerFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_propagates_exit_code() {
        let runner = runner("sh", &["-c", "exit 3", "sh"]);
        let code = runner
            .execute(Path::new("/tmp/list.txt"), &[])
            .expect("sh spawns");
        assert_eq!(code, 3);
    }
}
