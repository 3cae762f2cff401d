//! Access to the host system: processes, files, registry and environment.
//!
//! Every probe reaches the machine through a [`SystemContext`], whose
//! collaborators are trait objects so tests can substitute the in-memory
//! versions from [`mock`].

pub mod filesystem;
pub mod host;
pub mod mock;
pub mod process;
pub mod registry;
pub mod temp;

pub use filesystem::{FileSystem, SystemFileSystem};
pub use host::{EnvVars, HostFamily};
pub use process::{display_command, CommandOutput, ProcessRunner, RunOptions, SystemRunner};
#[cfg(windows)]
pub use registry::WinRegReader;
pub use registry::{Hive, NoRegistry, RegistryReader};
pub use temp::{cleanup_tracked_dirs, install_interrupt_cleanup, TrackedTempDir};

use std::sync::Arc;

/// Everything a probe needs to inspect the host.
#[derive(Clone)]
pub struct SystemContext {
    /// Host family the checks are evaluated for.
    pub host: HostFamily,
    /// Captured environment variables.
    pub env: EnvVars,
    /// External command runner.
    pub runner: Arc<dyn ProcessRunner>,
    /// Filesystem access.
    pub fs: Arc<dyn FileSystem>,
    /// Registry access (only meaningful on Windows).
    pub registry: Arc<dyn RegistryReader>,
}

impl SystemContext {
    /// Context for the machine this process runs on.
    pub fn system() -> Self {
        #[cfg(windows)]
        let registry: Arc<dyn RegistryReader> = Arc::new(WinRegReader);
        #[cfg(not(windows))]
        let registry: Arc<dyn RegistryReader> = Arc::new(NoRegistry);

        Self {
            host: HostFamily::current(),
            env: EnvVars::from_process(),
            runner: Arc::new(SystemRunner),
            fs: Arc::new(SystemFileSystem),
            registry,
        }
    }

    /// Build a context from explicit collaborators.
    pub fn new(
        host: HostFamily,
        env: EnvVars,
        runner: Arc<dyn ProcessRunner>,
        fs: Arc<dyn FileSystem>,
        registry: Arc<dyn RegistryReader>,
    ) -> Self {
        Self {
            host,
            env,
            runner,
            fs,
            registry,
        }
    }

    /// Override the host family.
    pub fn with_host(mut self, host: HostFamily) -> Self {
        self.host = host;
        self
    }

    /// Replace the captured environment.
    pub fn with_env(mut self, env: EnvVars) -> Self {
        self.env = env;
        self
    }
}

impl std::fmt::Debug for SystemContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemContext")
            .field("host", &self.host)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}
