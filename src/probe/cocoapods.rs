//! Functional check that CocoaPods can install into a real project.
//!
//! A bundled Xcode project with a one-pod `Podfile` is extracted into a
//! tracked temporary directory and `pod install` is run inside it.

use include_dir::{include_dir, Dir};
use std::path::Path;

use crate::sys::{RunOptions, SystemContext, TrackedTempDir};

/// Sample project used by the check. Holds a single `cocoapods/` directory.
static VERIFICATION_PROJECT: Dir<'_> =
    include_dir!("$CARGO_MANIFEST_DIR/fixtures/cocoapods-verification");

const PROJECT_DIR: &str = "cocoapods";
const WORKSPACE_NAME: &str = "cocoapods.xcworkspace";

/// Run `pod install` against the bundled project.
///
/// Returns `Some(true)` when the install succeeds and produces the
/// workspace, `Some(false)` on a clean failure, and `None` when the check
/// itself could not run.
pub fn verify_cocoapods(ctx: &SystemContext) -> Option<bool> {
    let temp = match TrackedTempDir::new("mobile-doctor-cocoapods") {
        Ok(temp) => temp,
        Err(e) => {
            tracing::debug!("Could not create CocoaPods scratch directory: {}", e);
            return None;
        }
    };
    verify_in(ctx, temp.path())
}

/// Run the check inside `root`, which must be an empty scratch directory.
pub(crate) fn verify_in(ctx: &SystemContext, root: &Path) -> Option<bool> {
    if let Err(e) = ctx.fs.extract_archive(&VERIFICATION_PROJECT, root) {
        tracing::debug!("Could not extract CocoaPods verification project: {}", e);
        return None;
    }

    let project = root.join(PROJECT_DIR);
    let output = match ctx.runner.run(
        "pod",
        &["install"],
        &RunOptions::ignoring_errors().in_dir(&project),
    ) {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!("pod install could not run: {}", e);
            return None;
        }
    };

    if !output.success() {
        tracing::debug!(
            "pod install exited with {:?}: {}",
            output.exit_code,
            output.stderr.trim()
        );
        return Some(false);
    }

    Some(ctx.fs.exists(&project.join(WORKSPACE_NAME)))
}
