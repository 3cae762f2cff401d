//! The ordered list of environment checks.
//!
//! Each check looks at one [`EnvironmentSnapshot`] and yields at most one
//! warning. [`CHECKS`] fixes the order in which warnings are reported.

use crate::platform::MobilePlatform;
use crate::probe::EnvironmentSnapshot;
use crate::version::{is_below, Version};
use crate::warning::Warning;

/// Oldest CocoaPods release that works without `xcproj`.
pub const MIN_COCOAPODS_VERSION: Version = Version::new(1, 0, 0);

/// Oldest supported Mono release.
pub const MIN_MONO_VERSION: Version = Version::new(4, 0, 1);

const ANDROID_SDK_REQUIREMENTS: &str = "http://developer.android.com/sdk/index.html#Requirements";

/// A single named check.
pub type Check = fn(&EnvironmentSnapshot) -> Option<Warning>;

/// All checks, in reporting order.
pub const CHECKS: &[(&str, Check)] = &[
    ("adb", check_adb),
    ("android-sdk", check_android_sdk),
    ("xcode", check_xcode),
    ("xcodeproj", check_xcodeproj),
    ("cocoapods", check_cocoapods),
    ("cocoapods-working", check_cocoapods_working),
    ("cocoapods-version", check_cocoapods_version),
    ("mono", check_mono),
    ("ios-host", check_ios_host),
    ("itunes", check_itunes),
    ("jdk", check_jdk),
    ("git", check_git),
];

/// Run every check against `snapshot` and collect the warnings in order.
pub fn run_checks(snapshot: &EnvironmentSnapshot) -> Vec<Warning> {
    CHECKS
        .iter()
        .filter_map(|(name, check)| {
            let warning = check(snapshot);
            if warning.is_some() {
                tracing::debug!("Check '{}' produced a warning", name);
            }
            warning
        })
        .collect()
}

fn darwin(snapshot: &EnvironmentSnapshot) -> bool {
    snapshot.host.is_darwin()
}

fn check_adb(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    snapshot.adb_version.is_none().then(|| {
        Warning::new(
            "adb from the Android SDK is not installed or is not configured properly.",
            format!(
                "A bundled adb may be used for Android-related operations. To avoid issues with the native Android emulator, Genymotion or connected Android devices, verify that you have installed the latest Android SDK and its dependencies as described in {}",
                ANDROID_SDK_REQUIREMENTS
            ),
            &[MobilePlatform::Android],
        )
    })
}

fn check_android_sdk(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    (!snapshot.android_installed).then(|| {
        Warning::new(
            "The Android SDK is not installed or is not configured properly.",
            format!(
                "You will not be able to build your projects for Android and run them in the native emulator. To be able to build for Android and run apps in the native emulator, verify that you have installed the latest Android SDK and its dependencies as described in {}",
                ANDROID_SDK_REQUIREMENTS
            ),
            &[MobilePlatform::Android],
        )
    })
}

fn check_xcode(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    (darwin(snapshot) && snapshot.xcode_version.is_none()).then(|| {
        Warning::new(
            "Xcode is not installed or is not configured properly.",
            "You will not be able to build your projects for iOS or run them in the iOS Simulator. To be able to build for iOS and run apps in the native emulator, verify that you have installed Xcode.",
            &[MobilePlatform::Ios],
        )
    })
}

fn check_xcodeproj(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    (darwin(snapshot) && snapshot.xcodeproj_version.is_none()).then(|| {
        Warning::new(
            "xcodeproj is not installed or is not configured properly.",
            "You will not be able to build your projects for iOS. To be able to build for iOS and run apps in the native emulator, verify that you have installed xcodeproj.",
            &[MobilePlatform::Ios],
        )
    })
}

fn check_cocoapods(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    (darwin(snapshot) && snapshot.cocoapods_version.is_none()).then(|| {
        Warning::new(
            "CocoaPods is not installed or is not configured properly.",
            "You will not be able to build your projects for iOS if they contain plugin with CocoaPod file. To be able to build such projects, verify that you have installed CocoaPods (`sudo gem install cocoapods`).",
            &[MobilePlatform::Ios],
        )
    })
}

/// Only meaningful when the functional check could run at all.
fn check_cocoapods_working(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    let applicable = darwin(snapshot)
        && snapshot.xcode_version.is_some()
        && snapshot.cocoapods_version.is_some();
    (applicable && snapshot.cocoapods_working != Some(true)).then(|| {
        Warning::new(
            "There was a problem with CocoaPods",
            "Verify that CocoaPods are configured properly.",
            &[MobilePlatform::Ios],
        )
    })
}

fn check_cocoapods_version(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    let outdated = snapshot
        .cocoapods_version
        .as_deref()
        .is_some_and(|v| is_below(v, MIN_COCOAPODS_VERSION));
    (darwin(snapshot) && outdated).then(|| {
        Warning::new(
            format!(
                "Your current CocoaPods version is earlier than {}.",
                MIN_COCOAPODS_VERSION
            ),
            format!(
                "You will not be able to build your projects for iOS if they contain plugin with CocoaPod file. To be able to build such projects, verify that you have at least {} version installed.",
                MIN_COCOAPODS_VERSION
            ),
            &[MobilePlatform::Ios],
        )
    })
}

fn check_mono(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    let outdated = snapshot
        .mono_version
        .as_deref()
        .is_some_and(|v| is_below(v, MIN_MONO_VERSION));
    (darwin(snapshot) && outdated).then(|| {
        Warning::new(
            format!(
                "Your current Mono version is earlier than {}.",
                MIN_MONO_VERSION
            ),
            format!(
                "You will not be able to build iOS projects that depend on Mono. Install Mono {} or later from http://www.mono-project.com/download/",
                MIN_MONO_VERSION
            ),
            &[MobilePlatform::Ios],
        )
    })
}

fn check_ios_host(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    (!darwin(snapshot)).then(|| {
        Warning::new(
            "NOTE: You can develop for iOS only on Mac OS X systems.",
            "To be able to work with iOS devices and projects, you need Mac OS X Mavericks or later.",
            &[MobilePlatform::Ios],
        )
    })
}

/// Off darwin the iOS host note already covers iOS, so only darwin reports.
fn check_itunes(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    (darwin(snapshot) && !snapshot.itunes_installed).then(|| {
        Warning::new(
            "iTunes is not installed.",
            "You will not be able to work with iOS devices via cable connection. To be able to work with connected iOS devices, download and install iTunes from http://www.apple.com",
            &[MobilePlatform::Ios],
        )
    })
}

fn check_jdk(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    snapshot.javac_version.is_none().then(|| {
        Warning::new(
            "The Java Development Kit (JDK) is not installed or is not configured properly.",
            "You will not be able to work with the Android SDK and you might not be able to perform some Android-related operations. To ensure that you can develop and test your apps for Android, verify that you have installed the JDK as described in http://docs.oracle.com/javase/8/docs/technotes/guides/install/install_overview.html (for JDK 8).",
            &[MobilePlatform::Android],
        )
    })
}

fn check_git(snapshot: &EnvironmentSnapshot) -> Option<Warning> {
    snapshot.git_version.is_none().then(|| {
        Warning::universal(
            "Git is not installed or not configured properly.",
            "You will not be able to create and work with projects that fetch templates or plugins over git. Download and install Git as described in https://git-scm.com/downloads and add the git executable to your PATH.",
        )
    })
}
