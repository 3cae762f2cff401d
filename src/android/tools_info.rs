//! Resolution of installed Android SDK components against required ranges.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::matching::matching_dir;
use crate::platform::MobilePlatform;
use crate::sys::SystemContext;
use crate::version::{extract_version, PartialVersion, Version, VersionRange};
use crate::warning::Warning;

/// Compile targets this tool knows how to build against, ascending.
pub const SUPPORTED_TARGETS: [&str; 8] = [
    "android-17",
    "android-18",
    "android-19",
    "android-21",
    "android-22",
    "android-23",
    "android-24",
    "android-25",
];

/// Lowest compile target accepted.
pub const MIN_COMPILE_TARGET: u32 = 22;

/// Lowest build-tools major version accepted.
pub const MIN_BUILD_TOOLS: u32 = 23;

/// Lowest `javac` version accepted.
pub const MIN_JAVAC_VERSION: Version = Version::new(1, 8, 0);

/// Subdirectories of a real SDK root.
const SDK_ROOT_DIRS: [&str; 4] = ["build-tools", "tools", "platform-tools", "extras"];

const SUPPORT_LIBRARY_DIR: [&str; 6] = [
    "extras",
    "android",
    "m2repository",
    "com",
    "android",
    "support",
];

/// Installed SDK components that satisfy the required ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SdkCapabilityData {
    pub android_home: Option<PathBuf>,
    pub compile_sdk_version: Option<u32>,
    pub build_tools_version: Option<String>,
    pub support_repository_version: Option<String>,
}

/// Android SDK inspector.
pub struct AndroidToolsInfo {
    ctx: Arc<SystemContext>,
    caching_enabled: bool,
    tools_data: Option<SdkCapabilityData>,
}

impl AndroidToolsInfo {
    /// Create a resolver over the given context.
    pub fn new(ctx: Arc<SystemContext>) -> Self {
        Self {
            ctx,
            caching_enabled: true,
            tools_data: None,
        }
    }

    /// Turn memoization of [`tools_data`](Self::tools_data) on or off.
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        self.caching_enabled = enabled;
    }

    /// SDK root from `ANDROID_HOME`.
    pub fn android_home(&self) -> Option<PathBuf> {
        self.ctx.env.get("ANDROID_HOME").map(PathBuf::from)
    }

    /// Resolve every SDK component.
    pub fn tools_data(&mut self) -> SdkCapabilityData {
        if self.caching_enabled {
            if let Some(data) = &self.tools_data {
                return data.clone();
            }
        }

        let compile_sdk_version = self.resolve_compile_target();
        let build_tools_version = self.resolve_build_tools();
        let support_repository_version = self.resolve_support_library(compile_sdk_version);
        let data = SdkCapabilityData {
            android_home: self.android_home(),
            compile_sdk_version,
            build_tools_version,
            support_repository_version,
        };
        tracing::debug!("Android SDK components: {:?}", data);

        if self.caching_enabled {
            self.tools_data = Some(data.clone());
        }
        data
    }

    /// Highest supported platform installed, if it meets the minimum.
    pub fn resolve_compile_target(&self) -> Option<u32> {
        let platforms_dir = self.android_home()?.join("platforms");
        let installed = match self.ctx.fs.list_dir(&platforms_dir) {
            Ok(installed) => installed,
            Err(e) => {
                tracing::debug!("Cannot list {}: {}", platforms_dir.display(), e);
                return None;
            }
        };

        let target = SUPPORTED_TARGETS
            .iter()
            .rev()
            .find(|t| installed.iter().any(|name| name.as_str() == **t))?;
        let level: u32 = target.strip_prefix("android-")?.parse().ok()?;

        (level >= MIN_COMPILE_TARGET).then_some(level)
    }

    /// Required build-tools range: from the minimum up to the newest supported target.
    pub fn build_tools_range() -> VersionRange {
        let max = SUPPORTED_TARGETS
            .last()
            .and_then(|t| t.strip_prefix("android-"))
            .and_then(PartialVersion::parse)
            .unwrap_or_else(|| PartialVersion::major(MIN_BUILD_TOOLS));
        VersionRange::inclusive(PartialVersion::major(MIN_BUILD_TOOLS), max)
    }

    /// Installed build-tools directory matching [`build_tools_range`](Self::build_tools_range).
    pub fn resolve_build_tools(&self) -> Option<String> {
        let dir = self.android_home()?.join("build-tools");
        matching_dir(self.ctx.fs.as_ref(), &dir, &Self::build_tools_range())
    }

    /// Support library versions sharing the compile target's major version.
    pub fn support_library_range(compile_sdk_version: u32) -> VersionRange {
        VersionRange::same_major(compile_sdk_version)
    }

    /// Installed appcompat-v7 version matching the compile target.
    pub fn resolve_support_library(&self, compile_sdk_version: Option<u32>) -> Option<String> {
        let compile_sdk_version = compile_sdk_version?;
        let mut dir = self.android_home()?;
        for part in SUPPORT_LIBRARY_DIR {
            dir.push(part);
        }
        dir.push("appcompat-v7");
        matching_dir(
            self.ctx.fs.as_ref(),
            &dir,
            &Self::support_library_range(compile_sdk_version),
        )
    }

    /// Whether every required SDK component is installed.
    pub fn can_build(&mut self) -> bool {
        let data = self.tools_data();
        data.compile_sdk_version.is_some()
            && data.build_tools_version.is_some()
            && data.support_repository_version.is_some()
    }

    /// Warnings for missing SDK components.
    pub fn validate(&mut self) -> Vec<Warning> {
        let data = self.tools_data();
        let tool = self.sdk_management_tool();
        let mut warnings = Vec::new();

        if data.compile_sdk_version.is_none() {
            warnings.push(Warning::new(
                format!(
                    "Cannot find a compatible Android SDK for compilation. To be able to build for Android, install Android SDK {} or later.",
                    MIN_COMPILE_TARGET
                ),
                format!("Run `$ {}` to manage your Android SDK versions.", tool),
                &[MobilePlatform::Android],
            ));
        }

        if data.build_tools_version.is_none() {
            let range = Self::build_tools_range();
            let requirement = match range.single_version() {
                Some(version) => format!("You have to install version {}.", version),
                None => format!(
                    "You can install any version in the following range: '{}'.",
                    range
                ),
            };
            warnings.push(Warning::new(
                format!(
                    "You need to have the Android SDK Build-tools installed on your system. {}",
                    requirement
                ),
                format!(
                    "Run `$ {}` from your command-line to install required `Android Build Tools`.",
                    tool
                ),
                &[MobilePlatform::Android],
            ));
        }

        if data.support_repository_version.is_none() {
            warnings.push(Warning::new(
                format!(
                    "You need to have Android SDK {} or later and the latest Android Support Repository installed on your system.",
                    MIN_COMPILE_TARGET
                ),
                format!("Run `$ {}` to manage the Android Support Repository.", tool),
                &[MobilePlatform::Android],
            ));
        }

        warnings
    }

    /// Warnings for a missing or outdated `javac`.
    ///
    /// `installed` is the raw or normalized `javac -version` output.
    pub fn validate_compiler_version(&self, installed: Option<&str>) -> Vec<Warning> {
        let raw = installed.unwrap_or_default().trim();
        match extract_version(raw) {
            None => vec![Warning::new(
                "Error executing command 'javac'. Make sure you have installed The Java Development Kit (JDK) and set JAVA_HOME environment variable.",
                "You will not be able to build your projects for Android. To be able to build for Android, install the JDK and point JAVA_HOME to it.",
                &[MobilePlatform::Android],
            )],
            Some(version) if version < MIN_JAVAC_VERSION => vec![Warning::new(
                format!(
                    "Javac version {} is not supported. You have to install at least {}.",
                    raw, MIN_JAVAC_VERSION
                ),
                format!(
                    "You will not be able to build your projects for Android. To be able to build for Android, install JDK {} or later.",
                    MIN_JAVAC_VERSION
                ),
                &[MobilePlatform::Android],
            )],
            Some(_) => Vec::new(),
        }
    }

    /// Warnings about `ANDROID_HOME` itself.
    pub fn validate_sdk_root_variable(&self) -> Vec<Warning> {
        let remediation = "To be able to perform Android build-related operations, set the `ANDROID_HOME` variable to point to the root of your Android SDK installation directory.";

        let exists = self
            .android_home()
            .is_some_and(|home| self.ctx.fs.exists(&home));
        if !exists {
            return vec![Warning::new(
                "The ANDROID_HOME environment variable is not set or it points to a non-existent directory. You will not be able to perform any build-related operations for Android.",
                remediation,
                &[MobilePlatform::Android],
            )];
        }

        if !self.is_sdk_root_valid() {
            return vec![Warning::new(
                "The ANDROID_HOME environment variable points to incorrect directory. You will not be able to perform any build-related operations for Android.",
                remediation,
                &[MobilePlatform::Android],
            )];
        }

        Vec::new()
    }

    /// Whether `ANDROID_HOME` looks like an SDK root.
    ///
    /// Any one of the standard subdirectories is enough.
    pub fn is_sdk_root_valid(&self) -> bool {
        match self.android_home() {
            Some(home) => SDK_ROOT_DIRS
                .iter()
                .any(|dir| self.ctx.fs.exists(&home.join(dir))),
            None => false,
        }
    }

    /// Command users should run to manage SDK packages.
    ///
    /// Paths inside the SDK are written relative to `ANDROID_HOME` using the
    /// host's variable syntax.
    pub fn sdk_management_tool(&self) -> String {
        let windows = self.ctx.host.is_windows();
        let (sdkmanager, android) = if windows {
            ("sdkmanager.bat", "android.bat")
        } else {
            ("sdkmanager", "android")
        };

        let home = match self.android_home() {
            Some(home) if self.is_sdk_root_valid() => home,
            _ => return "sdkmanager".to_string(),
        };

        let sep = if windows { "\\" } else { "/" };
        let reference = self.ctx.host.env_reference("ANDROID_HOME");
        let modern = home.join("tools").join("bin").join(sdkmanager);

        if self.ctx.fs.exists(&modern) {
            format!("{reference}{sep}tools{sep}bin{sep}{sdkmanager}")
        } else {
            format!("{reference}{sep}tools{sep}{android}")
        }
    }
}

impl std::fmt::Debug for AndroidToolsInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidToolsInfo")
            .field("caching_enabled", &self.caching_enabled)
            .field("tools_data", &self.tools_data)
            .finish()
    }
}
