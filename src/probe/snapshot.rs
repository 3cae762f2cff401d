//! One consistent capture of every probe.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::cache::XcprojInfo;
use super::sys_info::SysInfo;
use crate::sys::HostFamily;

/// Probe results taken at one point in time.
///
/// All checks in a single evaluation read the same snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentSnapshot {
    pub captured_at: DateTime<Utc>,
    pub host: HostFamily,
    pub os_name: Option<String>,
    pub shell: Option<String>,
    pub proc_arch: String,
    pub node_version: Option<String>,
    pub npm_version: Option<String>,
    pub node_gyp_version: Option<String>,
    pub javac_version: Option<String>,
    pub xcode_version: Option<String>,
    pub xcodeproj_version: Option<String>,
    pub itunes_installed: bool,
    pub cocoapods_version: Option<String>,
    /// `None` when the check was skipped or could not run.
    pub cocoapods_working: Option<bool>,
    pub cocoapods_update_required: bool,
    pub xcproj: XcprojInfo,
    pub adb_version: Option<String>,
    pub android_installed: bool,
    pub mono_version: Option<String>,
    pub git_version: Option<String>,
    pub gradle_version: Option<String>,
}

impl EnvironmentSnapshot {
    /// Run every probe in order and collect the results.
    ///
    /// The CocoaPods functional check only runs when both Xcode and
    /// CocoaPods were found.
    pub fn capture(info: &mut SysInfo) -> Self {
        let host = info.context().host;
        let os_name = info.os_name();
        let shell = info.shell();
        let proc_arch = info.proc_arch().to_string();
        let node_version = info.node_version();
        let npm_version = info.npm_version();
        let node_gyp_version = info.node_gyp_version();
        let javac_version = info.javac_version();
        let xcode_version = info.xcode_version();
        let xcodeproj_version = info.xcodeproj_version();
        let itunes_installed = info.itunes_installed();
        let cocoapods_version = info.cocoapods_version();
        let cocoapods_working = if xcode_version.is_some() && cocoapods_version.is_some() {
            info.cocoapods_working()
        } else {
            None
        };
        let xcproj = info.xcproj_info();
        let cocoapods_update_required = info.cocoapods_update_required();
        let adb_version = info.adb_version();
        let android_installed = info.android_installed();
        let mono_version = info.mono_version();
        let git_version = info.git_version();
        let gradle_version = info.gradle_version();

        Self {
            captured_at: Utc::now(),
            host,
            os_name,
            shell,
            proc_arch,
            node_version,
            npm_version,
            node_gyp_version,
            javac_version,
            xcode_version,
            xcodeproj_version,
            itunes_installed,
            cocoapods_version,
            cocoapods_working,
            cocoapods_update_required,
            xcproj,
            adb_version,
            android_installed,
            mono_version,
            git_version,
            gradle_version,
        }
    }

    /// A snapshot where nothing was detected.
    pub fn blank(host: HostFamily) -> Self {
        Self {
            captured_at: Utc::now(),
            host,
            os_name: None,
            shell: None,
            proc_arch: std::env::consts::ARCH.to_string(),
            node_version: None,
            npm_version: None,
            node_gyp_version: None,
            javac_version: None,
            xcode_version: None,
            xcodeproj_version: None,
            itunes_installed: false,
            cocoapods_version: None,
            cocoapods_working: None,
            cocoapods_update_required: false,
            xcproj: XcprojInfo::default(),
            adb_version: None,
            android_installed: false,
            mono_version: None,
            git_version: None,
            gradle_version: None,
        }
    }

    /// Rows for tabular display, in capture order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        fn text(value: &Option<String>) -> String {
            value.clone().unwrap_or_else(|| "not found".to_string())
        }
        fn flag(value: bool) -> String {
            if value { "yes" } else { "no" }.to_string()
        }

        vec![
            ("Host", self.host.to_string()),
            ("OS", text(&self.os_name)),
            ("Shell", text(&self.shell)),
            ("Architecture", self.proc_arch.clone()),
            ("Node.js", text(&self.node_version)),
            ("npm", text(&self.npm_version)),
            ("node-gyp", text(&self.node_gyp_version)),
            ("javac", text(&self.javac_version)),
            ("Xcode", text(&self.xcode_version)),
            ("xcodeproj", text(&self.xcodeproj_version)),
            ("iTunes", flag(self.itunes_installed)),
            ("CocoaPods", text(&self.cocoapods_version)),
            (
                "CocoaPods works",
                match self.cocoapods_working {
                    Some(working) => flag(working),
                    None => "unknown".to_string(),
                },
            ),
            ("CocoaPods update required", flag(self.cocoapods_update_required)),
            ("adb", text(&self.adb_version)),
            ("Android SDK", flag(self.android_installed)),
            ("Mono", text(&self.mono_version)),
            ("git", text(&self.git_version)),
            ("Gradle", text(&self.gradle_version)),
        ]
    }
}
