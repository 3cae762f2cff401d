//! In-memory collaborators for testing probes.
//!
//! `MockRunner`, `MockFileSystem` and `MockRegistry` implement the system
//! traits with canned responses and record every interaction for later
//! assertion.
//!
//! # Example
//!
//! ```
//! use mobile_doctor::sys::mock::MockRunner;
//! use mobile_doctor::sys::{ProcessRunner, RunOptions};
//!
//! let runner = MockRunner::new();
//! runner.set_output("git --version", "git version 2.39.2\n");
//!
//! let output = runner.run("git", &["--version"], &RunOptions::default()).unwrap();
//! assert!(output.stdout.contains("2.39.2"));
//! assert_eq!(runner.call_count("git --version"), 1);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use include_dir::Dir;

use crate::error::{DoctorError, Result};

use super::filesystem::FileSystem;
use super::process::{display_command, CommandOutput, ProcessRunner, RunOptions};
use super::registry::{Hive, RegistryReader};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Clone)]
enum MockResponse {
    Output {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
    SpawnError,
}

/// A recorded command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Full command line (`program arg1 arg2`).
    pub command: String,
    /// Working directory the command was asked to run in.
    pub cwd: Option<PathBuf>,
}

/// Process runner with canned responses keyed by command line.
///
/// Commands without a configured response fail to spawn, like a program
/// that is not installed.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Mutex<HashMap<String, MockResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockRunner {
    /// Create a runner with no configured commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `command` exit 0 with the given stdout.
    pub fn set_output(&self, command: &str, stdout: &str) {
        self.set_result(command, 0, stdout, "");
    }

    /// Configure the full result of `command`.
    pub fn set_result(&self, command: &str, exit_code: i32, stdout: &str, stderr: &str) {
        lock(&self.responses).insert(
            command.to_string(),
            MockResponse::Output {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// Make `command` fail to start.
    pub fn set_spawn_error(&self, command: &str) {
        lock(&self.responses).insert(command.to_string(), MockResponse::SpawnError);
    }

    /// All recorded invocations, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// How many times `command` was run.
    pub fn call_count(&self, command: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.command == command)
            .count()
    }

    /// Total number of invocations.
    pub fn total_calls(&self) -> usize {
        lock(&self.calls).len()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str], options: &RunOptions) -> Result<CommandOutput> {
        let command = display_command(program, args);
        lock(&self.calls).push(RecordedCall {
            command: command.clone(),
            cwd: options.cwd.clone(),
        });

        let response = lock(&self.responses).get(&command).cloned();
        match response {
            Some(MockResponse::Output {
                exit_code,
                stdout,
                stderr,
            }) => {
                if exit_code != 0 && !options.ignore_error {
                    return Err(DoctorError::CommandFailed {
                        command,
                        code: Some(exit_code),
                    });
                }
                Ok(CommandOutput {
                    exit_code: Some(exit_code),
                    stdout,
                    stderr,
                    duration: Duration::ZERO,
                })
            }
            Some(MockResponse::SpawnError) | None => Err(DoctorError::CommandSpawn {
                command,
                message: "program not found".to_string(),
            }),
        }
    }
}

/// Filesystem with an explicit set of existing paths and directory listings.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    paths: Mutex<BTreeSet<PathBuf>>,
    listings: Mutex<HashMap<PathBuf, Vec<String>>>,
    exists_calls: Mutex<Vec<PathBuf>>,
    extractions: Mutex<Vec<PathBuf>>,
    fail_extraction: Mutex<bool>,
}

impl MockFileSystem {
    /// Create an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as existing.
    pub fn add_path(&self, path: impl Into<PathBuf>) {
        lock(&self.paths).insert(path.into());
    }

    /// Create a directory whose listing returns `entries` in the given order.
    ///
    /// The directory and each entry are marked as existing.
    pub fn add_dir(&self, path: impl Into<PathBuf>, entries: &[&str]) {
        let path = path.into();
        {
            let mut paths = lock(&self.paths);
            paths.insert(path.clone());
            for entry in entries {
                paths.insert(path.join(entry));
            }
        }
        lock(&self.listings).insert(path, entries.iter().map(|e| e.to_string()).collect());
    }

    /// Make every extraction fail.
    pub fn set_extraction_failure(&self, fail: bool) {
        *lock(&self.fail_extraction) = fail;
    }

    /// Paths passed to `exists`, in order.
    pub fn exists_calls(&self) -> Vec<PathBuf> {
        lock(&self.exists_calls).clone()
    }

    /// Destinations passed to `extract_archive`, in order.
    pub fn extractions(&self) -> Vec<PathBuf> {
        lock(&self.extractions).clone()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        lock(&self.exists_calls).push(path.to_path_buf());
        lock(&self.paths).contains(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        lock(&self.listings).get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn extract_archive(&self, _archive: &Dir<'_>, dest: &Path) -> io::Result<()> {
        lock(&self.extractions).push(dest.to_path_buf());
        if *lock(&self.fail_extraction) {
            return Err(io::Error::other("corrupt archive"));
        }
        Ok(())
    }
}

/// Registry with fixed values.
#[derive(Debug, Default)]
pub struct MockRegistry {
    values: Mutex<HashMap<(Hive, String, String), String>>,
}

impl MockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value.
    pub fn set_value(&self, hive: Hive, key_path: &str, name: &str, value: &str) {
        lock(&self.values).insert(
            (hive, key_path.to_string(), name.to_string()),
            value.to_string(),
        );
    }
}

impl RegistryReader for MockRegistry {
    fn read_value(&self, hive: Hive, key_path: &str, name: &str) -> Option<String> {
        lock(&self.values)
            .get(&(hive, key_path.to_string(), name.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_fails_to_spawn() {
        let runner = MockRunner::new();
        let result = runner.run("pod", &["--version"], &RunOptions::default());
        assert!(matches!(result, Err(DoctorError::CommandSpawn { .. })));
        assert_eq!(runner.call_count("pod --version"), 1);
    }

    #[test]
    fn nonzero_exit_respects_ignore_error() {
        let runner = MockRunner::new();
        runner.set_result("pod install", 1, "", "[!] No Podfile");

        assert!(runner
            .run("pod", &["install"], &RunOptions::default())
            .is_err());
        let output = runner
            .run("pod", &["install"], &RunOptions::ignoring_errors())
            .unwrap();
        assert_eq!(output.exit_code, Some(1));
        assert_eq!(runner.call_count("pod install"), 2);
    }

    #[test]
    fn records_working_directory() {
        let runner = MockRunner::new();
        runner.set_output("pod install", "");
        runner
            .run(
                "pod",
                &["install"],
                &RunOptions::default().in_dir("/tmp/project"),
            )
            .unwrap();

        assert_eq!(
            runner.calls()[0].cwd,
            Some(PathBuf::from("/tmp/project"))
        );
    }

    #[test]
    fn add_dir_marks_entries_as_existing() {
        let fs = MockFileSystem::new();
        fs.add_dir("/sdk/platforms", &["android-22", "android-19"]);

        assert!(fs.exists(Path::new("/sdk/platforms")));
        assert!(fs.exists(Path::new("/sdk/platforms/android-22")));
        assert_eq!(
            fs.list_dir(Path::new("/sdk/platforms")).unwrap(),
            vec!["android-22", "android-19"]
        );
        assert!(fs.list_dir(Path::new("/sdk/build-tools")).is_err());
    }

    #[test]
    fn registry_returns_stored_values() {
        let registry = MockRegistry::new();
        registry.set_value(Hive::LocalMachine, "SOFTWARE\\Test", "Name", "value");

        assert_eq!(
            registry.read_value(Hive::LocalMachine, "SOFTWARE\\Test", "Name"),
            Some("value".to_string())
        );
        assert_eq!(
            registry.read_value(Hive::LocalMachine, "SOFTWARE\\Other", "Name"),
            None
        );
    }
}
