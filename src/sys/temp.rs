//! Temporary directories that are cleaned up on every exit path.
//!
//! A [`TrackedTempDir`] is removed when dropped (normal return, early
//! return, or panic unwinding). It is also registered in a process-wide
//! list so survivors can be swept with [`cleanup_tracked_dirs`]. The
//! binary sweeps before exiting and, through
//! [`install_interrupt_cleanup`], when interrupted mid-run.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::error::Result;

/// Exit status used after an interrupt (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

static TRACKED: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

fn tracked() -> std::sync::MutexGuard<'static, Vec<PathBuf>> {
    TRACKED.lock().unwrap_or_else(|e| e.into_inner())
}

/// A scratch directory registered for process-level cleanup.
#[derive(Debug)]
pub struct TrackedTempDir {
    inner: TempDir,
}

impl TrackedTempDir {
    /// Create a fresh directory under the system temp dir.
    pub fn new(prefix: &str) -> io::Result<Self> {
        let inner = tempfile::Builder::new().prefix(prefix).tempdir()?;
        tracked().push(inner.path().to_path_buf());
        tracing::debug!("Created temp dir {}", inner.path().display());
        Ok(Self { inner })
    }

    /// Path of the directory.
    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

impl Drop for TrackedTempDir {
    fn drop(&mut self) {
        let path = self.inner.path().to_path_buf();
        tracked().retain(|p| p != &path);
        tracing::debug!("Removing temp dir {}", path.display());
    }
}

/// Remove every tracked directory that still exists.
///
/// Returns the number of directories removed.
pub fn cleanup_tracked_dirs() -> usize {
    let paths: Vec<PathBuf> = tracked().drain(..).collect();
    sweep(&paths)
}

/// Sweep tracked directories and exit on Ctrl-C or SIGTERM.
///
/// Drop handlers do not run when the process is killed by a signal, so a
/// `pod install` in flight would otherwise leave its scratch project behind.
pub fn install_interrupt_cleanup() -> Result<()> {
    ctrlc::set_handler(|| {
        handle_interrupt();
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .map_err(anyhow::Error::from)?;
    Ok(())
}

fn handle_interrupt() -> usize {
    let removed = cleanup_tracked_dirs();
    tracing::debug!("Interrupted; removed {} temp dir(s)", removed);
    removed
}

fn sweep(paths: &[PathBuf]) -> usize {
    paths
        .iter()
        .filter(|p| p.exists() && std::fs::remove_dir_all(p).is_ok())
        .count()
}

#[cfg(test)]
fn is_tracked(path: &Path) -> bool {
    tracked().iter().any(|p| p == path)
}

/// Serializes tests that create tracked directories or sweep them all.
#[cfg(test)]
pub(crate) fn tracked_dirs_guard() -> std::sync::MutexGuard<'static, ()> {
    static GUARD: Mutex<()> = Mutex::new(());
    GUARD.lock().unwrap_or_else(|e| e.into_inner())
}
