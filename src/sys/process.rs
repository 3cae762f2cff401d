//! External command execution.

use crate::error::{DoctorError, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Options for a single command invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Working directory (inherits the current one when `None`).
    pub cwd: Option<PathBuf>,

    /// Return the output even when the command exits non-zero.
    pub ignore_error: bool,
}

impl RunOptions {
    /// Options that accept any exit code.
    pub fn ignoring_errors() -> Self {
        Self {
            ignore_error: true,
            ..Default::default()
        }
    }

    /// Set the working directory.
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,
}

impl CommandOutput {
    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr.
    ///
    /// Several tools (`javac` before JDK 9, `mono`) print their version to
    /// stderr, so version parsing looks at both streams.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text
    }
}

/// Runs external programs.
///
/// Implementations must reject a non-zero exit with
/// [`DoctorError::CommandFailed`] unless [`RunOptions::ignore_error`] is set,
/// and report programs that cannot be started as [`DoctorError::CommandSpawn`].
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` to completion and capture its output.
    fn run(&self, program: &str, args: &[&str], options: &RunOptions) -> Result<CommandOutput>;
}

/// Render a program and its arguments as a single command line.
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Runs programs directly with `std::process::Command` (no shell).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], options: &RunOptions) -> Result<CommandOutput> {
        let command_line = display_command(program, args);
        let start = Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!("Executing: {}", command_line);

        let output = cmd.output().map_err(|e| DoctorError::CommandSpawn {
            command: command_line.clone(),
            message: e.to_string(),
        })?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
        };

        tracing::debug!(
            "'{}' exited with {:?} after {:?}",
            command_line,
            result.exit_code,
            result.duration
        );

        if !result.success() && !options.ignore_error {
            return Err(DoctorError::CommandFailed {
                command: command_line,
                code: result.exit_code,
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_command_joins_args() {
        assert_eq!(display_command("adb", &["version"]), "adb version");
        assert_eq!(display_command("uname", &[]), "uname");
    }

    #[test]
    fn combined_puts_stderr_after_stdout() {
        let output = CommandOutput {
            exit_code: Some(0),
            stdout: "out".to_string(),
            stderr: "javac 1.8.0_211".to_string(),
            duration: Duration::ZERO,
        };
        assert_eq!(output.combined(), "out\njavac 1.8.0_211");
    }

    #[test]
    fn run_options_builders() {
        let options = RunOptions::ignoring_errors().in_dir("/tmp/project");
        assert!(options.ignore_error);
        assert_eq!(options.cwd, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let result = SystemRunner.run(
            "this-command-does-not-exist-12345",
            &["--version"],
            &RunOptions::default(),
        );
        assert!(matches!(result, Err(DoctorError::CommandSpawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn successful_command_captures_stdout() {
        let result = SystemRunner
            .run("sh", &["-c", "echo hello"], &RunOptions::default())
            .unwrap();
        assert!(result.success());
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_rejected_by_default() {
        let result = SystemRunner.run("sh", &["-c", "exit 3"], &RunOptions::default());
        match result {
            Err(DoctorError::CommandFailed { command, code }) => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(code, Some(3));
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_returned_when_ignoring_errors() {
        let result = SystemRunner
            .run(
                "sh",
                &["-c", "echo oops >&2; exit 3"],
                &RunOptions::ignoring_errors(),
            )
            .unwrap();
        assert!(!result.success());
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("oops"));
    }

    #[cfg(unix)]
    #[test]
    fn working_directory_is_applied() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = SystemRunner
            .run("pwd", &[], &RunOptions::default().in_dir(temp.path()))
            .unwrap();
        let reported = std::path::PathBuf::from(result.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }
}
