//! Per-tool probes over a [`SystemContext`].
//!
//! Every accessor runs one detection strategy, normalizes the result and
//! absorbs failures into absence. Results are memoized in a [`ProbeCache`].

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use super::cache::{CachedValue, ProbeCache, ProbeKey, XcprojInfo};
use super::cocoapods;
use crate::sys::{CommandOutput, Hive, RunOptions, SystemContext};
use crate::version::{extract_version, normalize_version, Version};

/// CocoaPods versions below this need `xcproj` with newer Xcode.
const XCPROJ_COCOAPODS_THRESHOLD: Version = Version::new(1, 0, 0);

/// Xcode versions from this one on changed the project format.
const XCPROJ_XCODE_THRESHOLD: Version = Version::new(7, 3, 0);

static RE_XCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Xcode\s+(\d+\.\d+(?:\.\d+)?)").unwrap());

static RE_MONO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"version\s+(\d+\.\d+(?:\.\d+)?)").unwrap());

static RE_GRADLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Gradle\s+(\d+\.\d+(?:\.\d+)?)").unwrap());

const WINDOWS_VERSION_KEY: &str = "SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion";

const DARWIN_ITUNES_FRAMEWORKS: [&str; 2] = [
    "/System/Library/Frameworks/CoreFoundation.framework/CoreFoundation",
    "/System/Library/PrivateFrameworks/MobileDevice.framework/MobileDevice",
];

const WINDOWS_ITUNES_DIRS: [&str; 2] = ["Apple Application Support", "Mobile Device Support"];

/// Lazily computed information about installed tools.
pub struct SysInfo {
    ctx: Arc<SystemContext>,
    cache: ProbeCache,
}

impl SysInfo {
    /// Create probes over the given context.
    pub fn new(ctx: Arc<SystemContext>) -> Self {
        Self {
            ctx,
            cache: ProbeCache::new(),
        }
    }

    /// The context the probes read from.
    pub fn context(&self) -> &SystemContext {
        &self.ctx
    }

    /// Turn memoization on or off.
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        self.cache.set_enabled(enabled);
    }

    /// Whether memoization is on.
    pub fn caching_enabled(&self) -> bool {
        self.cache.is_enabled()
    }

    fn memoize<T: CachedValue>(&mut self, key: ProbeKey, detect: impl FnOnce(&mut Self) -> T) -> T {
        if let Some(value) = self.cache.lookup::<T>(key) {
            tracing::debug!("Probe {:?}: cached", key);
            return value;
        }

        tracing::debug!("Probe {:?}: detecting", key);
        let value = detect(self);
        self.cache.store(key, value.clone());
        value
    }

    fn run(&self, program: &str, args: &[&str]) -> Option<CommandOutput> {
        match self.ctx.runner.run(program, args, &RunOptions::default()) {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::debug!("Probe command failed: {}", e);
                None
            }
        }
    }

    fn command_version(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = self.run(program, args)?;
        normalize_version(&output.combined())
    }

    fn captured_version(&self, program: &str, args: &[&str], re: &Regex) -> Option<String> {
        let output = self.run(program, args)?;
        let text = output.combined();
        let caps = re.captures(&text)?;
        normalize_version(caps.get(1)?.as_str())
    }

    fn executable_name(&self, name: &str) -> String {
        if self.ctx.host.is_windows() {
            format!("{}.exe", name)
        } else {
            name.to_string()
        }
    }

    fn android_home(&self) -> Option<PathBuf> {
        self.ctx.env.get("ANDROID_HOME").map(PathBuf::from)
    }

    /// `javac` version, preferring the JDK under `JAVA_HOME`.
    pub fn javac_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::JavacVersion, |this| {
            let javac = match this.ctx.env.get("JAVA_HOME") {
                Some(home) => Path::new(home)
                    .join("bin")
                    .join(this.executable_name("javac"))
                    .to_string_lossy()
                    .to_string(),
                None => "javac".to_string(),
            };
            let output = this.run(&javac, &["-version"])?;
            normalize_version(&format!("{}\n{}", output.stderr, output.stdout))
        })
    }

    /// Node.js version.
    pub fn node_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::NodeVersion, |this| {
            this.command_version("node", &["--version"])
        })
    }

    /// npm version.
    pub fn npm_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::NpmVersion, |this| {
            this.command_version("npm", &["--version"])
        })
    }

    /// node-gyp version.
    pub fn node_gyp_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::NodeGypVersion, |this| {
            this.command_version("node-gyp", &["--version"])
        })
    }

    /// Xcode version (darwin only).
    pub fn xcode_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::XcodeVersion, |this| {
            if !this.ctx.host.is_darwin() {
                return None;
            }
            this.captured_version("xcodebuild", &["-version"], &RE_XCODE)
        })
    }

    /// xcodeproj gem version (darwin only).
    pub fn xcodeproj_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::XcodeprojVersion, |this| {
            if !this.ctx.host.is_darwin() {
                return None;
            }
            this.command_version("xcodeproj", &["--version"])
        })
    }

    /// Whether iTunes device support is installed.
    pub fn itunes_installed(&mut self) -> bool {
        self.memoize(ProbeKey::ItunesInstalled, |this| {
            let fs = &this.ctx.fs;
            if this.ctx.host.is_darwin() {
                return DARWIN_ITUNES_FRAMEWORKS
                    .iter()
                    .all(|p| fs.exists(Path::new(p)));
            }
            if this.ctx.host.is_windows() {
                let root = this
                    .ctx
                    .env
                    .get("CommonProgramFiles")
                    .map(PathBuf::from)
                    .filter(|p| fs.exists(&p.join("Apple")))
                    .or_else(|| {
                        this.ctx
                            .env
                            .get("CommonProgramFiles(x86)")
                            .map(PathBuf::from)
                    });
                return match root {
                    Some(root) => WINDOWS_ITUNES_DIRS
                        .iter()
                        .all(|dir| fs.exists(&root.join("Apple").join(dir))),
                    None => false,
                };
            }
            false
        })
    }

    /// CocoaPods version (darwin only).
    pub fn cocoapods_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::CocoapodsVersion, |this| {
            if !this.ctx.host.is_darwin() {
                return None;
            }
            let output = this.run("pod", &["--version"])?;
            // pod prints gem warnings before the version
            let last = output
                .stdout
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .last()?;
            normalize_version(last)
        })
    }

    /// Human-readable operating system name.
    pub fn os_name(&mut self) -> Option<String> {
        self.memoize(ProbeKey::OsName, |this| {
            if this.ctx.host.is_windows() {
                let registry = &this.ctx.registry;
                let read = |name: &str| registry.read_value(Hive::LocalMachine, WINDOWS_VERSION_KEY, name);
                let product = read("ProductName")?;
                let version = read("CurrentVersion").unwrap_or_default();
                let build = read("CurrentBuild").unwrap_or_default();
                return Some(format!("{} {}.{}", product, version, build));
            }
            let output = this.run("uname", &["-a"])?;
            let name = output.stdout.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
    }

    /// adb version, preferring the SDK's platform-tools copy.
    pub fn adb_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::AdbVersion, |this| {
            let bundled = this
                .android_home()
                .map(|home| home.join("platform-tools").join(this.executable_name("adb")))
                .filter(|path| this.ctx.fs.exists(path));
            let adb = match bundled {
                Some(path) => path.to_string_lossy().to_string(),
                None => "adb".to_string(),
            };
            this.command_version(&adb, &["version"])
        })
    }

    /// Whether an Android emulator binary runs.
    pub fn android_installed(&mut self) -> bool {
        self.memoize(ProbeKey::AndroidInstalled, |this| {
            let emulator = this.emulator_path();
            match this
                .ctx
                .runner
                .run(&emulator, &["-help"], &RunOptions::ignoring_errors())
            {
                Ok(output) => output.combined().contains("usage: emulator"),
                Err(e) => {
                    tracing::debug!("Emulator check failed: {}", e);
                    false
                }
            }
        })
    }

    fn emulator_path(&self) -> String {
        let name = self.executable_name("emulator");
        if let Some(home) = self.android_home() {
            for dir in ["emulator", "tools"] {
                let candidate = home.join(dir).join(&name);
                if self.ctx.fs.exists(&candidate) {
                    return candidate.to_string_lossy().to_string();
                }
            }
        }
        name
    }

    /// Mono version.
    pub fn mono_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::MonoVersion, |this| {
            this.captured_version("mono", &["--version"], &RE_MONO)
        })
    }

    /// git version.
    pub fn git_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::GitVersion, |this| {
            this.command_version("git", &["--version"])
        })
    }

    /// Gradle version.
    pub fn gradle_version(&mut self) -> Option<String> {
        self.memoize(ProbeKey::GradleVersion, |this| {
            this.captured_version("gradle", &["-v"], &RE_GRADLE)
        })
    }

    /// Whether `pod install` works on a sample project (darwin only).
    pub fn cocoapods_working(&mut self) -> Option<bool> {
        self.memoize(ProbeKey::CocoapodsWorking, |this| {
            if !this.ctx.host.is_darwin() {
                return None;
            }
            cocoapods::verify_cocoapods(&this.ctx)
        })
    }

    /// Whether `xcproj` is required and installed (darwin only).
    pub fn xcproj_info(&mut self) -> XcprojInfo {
        self.memoize(ProbeKey::XcprojInfo, |this| {
            if !this.ctx.host.is_darwin() {
                return XcprojInfo::default();
            }

            let old_cocoapods = this
                .cocoapods_version()
                .and_then(|v| extract_version(&v))
                .is_some_and(|v| v < XCPROJ_COCOAPODS_THRESHOLD);
            let new_xcode = this
                .xcode_version()
                .and_then(|v| extract_version(&v))
                .is_some_and(|v| v >= XCPROJ_XCODE_THRESHOLD);

            let should_use_xcproj = old_cocoapods && new_xcode;
            let xcproj_available = should_use_xcproj && this.run("xcproj", &["--version"]).is_some();

            XcprojInfo {
                should_use_xcproj,
                xcproj_available,
            }
        })
    }

    /// Whether CocoaPods must be updated because `xcproj` is missing.
    pub fn cocoapods_update_required(&mut self) -> bool {
        let info = self.xcproj_info();
        info.should_use_xcproj && !info.xcproj_available
    }

    /// Login shell (`SHELL`, or `ComSpec` on Windows).
    pub fn shell(&self) -> Option<String> {
        let var = if self.ctx.host.is_windows() {
            "ComSpec"
        } else {
            "SHELL"
        };
        self.ctx.env.get(var).map(str::to_string)
    }

    /// Processor architecture of this build.
    pub fn proc_arch(&self) -> &'static str {
        std::env::consts::ARCH
    }
}

impl std::fmt::Debug for SysInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysInfo")
            .field("host", &self.ctx.host)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::mock::{MockFileSystem, MockRegistry, MockRunner};
    use crate::sys::{EnvVars, HostFamily};

    struct Fixture {
        runner: Arc<MockRunner>,
        fs: Arc<MockFileSystem>,
        registry: Arc<MockRegistry>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                runner: Arc::new(MockRunner::new()),
                fs: Arc::new(MockFileSystem::new()),
                registry: Arc::new(MockRegistry::new()),
            }
        }

        fn sys_info(&self, host: HostFamily, env: &[(&str, &str)]) -> SysInfo {
            SysInfo::new(Arc::new(SystemContext::new(
                host,
                EnvVars::from_pairs(env),
                self.runner.clone(),
                self.fs.clone(),
                self.registry.clone(),
            )))
        }
    }

    #[test]
    fn cached_probe_runs_command_once() {
        let fx = Fixture::new();
        fx.runner.set_output("git --version", "git version 2.39.2\n");
        let mut info = fx.sys_info(HostFamily::Linux, &[]);

        assert_eq!(info.git_version(), Some("2.39.2".to_string()));
        assert_eq!(info.git_version(), Some("2.39.2".to_string()));
        assert_eq!(fx.runner.call_count("git --version"), 1);
    }

    #[test]
    fn absent_result_is_not_retried() {
        let fx = Fixture::new();
        let mut info = fx.sys_info(HostFamily::Linux, &[]);

        assert_eq!(info.gradle_version(), None);
        assert_eq!(info.gradle_version(), None);
        assert_eq!(fx.runner.call_count("gradle -v"), 1);
    }

    #[test]
    fn disabled_caching_runs_every_time() {
        let fx = Fixture::new();
        fx.runner.set_output("node --version", "v18.17.0\n");
        let mut info = fx.sys_info(HostFamily::Linux, &[]);
        info.set_caching_enabled(false);

        assert_eq!(info.node_version(), Some("18.17.0".to_string()));
        assert_eq!(info.node_version(), Some("18.17.0".to_string()));
        assert_eq!(fx.runner.call_count("node --version"), 2);
    }

    #[test]
    fn javac_prefers_java_home() {
        let fx = Fixture::new();
        let javac = Path::new("/opt/jdk")
            .join("bin")
            .join("javac")
            .to_string_lossy()
            .to_string();
        fx.runner
            .set_result(&format!("{} -version", javac), 0, "", "javac 1.8.0_211\n");
        let mut info = fx.sys_info(HostFamily::Linux, &[("JAVA_HOME", "/opt/jdk")]);

        assert_eq!(info.javac_version(), Some("1.8.0".to_string()));
        assert_eq!(fx.runner.call_count("javac -version"), 0);
    }

    #[test]
    fn javac_falls_back_to_path() {
        let fx = Fixture::new();
        fx.runner.set_output("javac -version", "javac 11.0.2\n");
        let mut info = fx.sys_info(HostFamily::Linux, &[]);
        assert_eq!(info.javac_version(), Some("11.0.2".to_string()));
    }

    #[test]
    fn darwin_probes_skip_other_hosts() {
        let fx = Fixture::new();
        fx.runner.set_output("xcodebuild -version", "Xcode 8.2\nBuild version 8C38\n");
        fx.runner.set_output("pod --version", "1.2.0\n");
        let mut info = fx.sys_info(HostFamily::Linux, &[]);

        assert_eq!(info.xcode_version(), None);
        assert_eq!(info.cocoapods_version(), None);
        assert_eq!(info.cocoapods_working(), None);
        assert!(!info.cocoapods_update_required());
        assert_eq!(fx.runner.total_calls(), 0);
    }

    #[test]
    fn xcode_version_parsed_on_darwin() {
        let fx = Fixture::new();
        fx.runner.set_output("xcodebuild -version", "Xcode 8.2\nBuild version 8C38\n");
        let mut info = fx.sys_info(HostFamily::Darwin, &[]);
        assert_eq!(info.xcode_version(), Some("8.2.0".to_string()));
    }

    #[test]
    fn cocoapods_version_uses_last_line() {
        let fx = Fixture::new();
        fx.runner.set_output(
            "pod --version",
            "WARN: Unresolved specs during Gem::Specification.reset: 2.0.1\n1.2.0\n\n",
        );
        let mut info = fx.sys_info(HostFamily::Darwin, &[]);
        assert_eq!(info.cocoapods_version(), Some("1.2.0".to_string()));
    }

    #[test]
    fn windows_os_name_from_registry() {
        let fx = Fixture::new();
        fx.registry.set_value(Hive::LocalMachine, WINDOWS_VERSION_KEY, "ProductName", "Windows 10 Pro");
        fx.registry.set_value(Hive::LocalMachine, WINDOWS_VERSION_KEY, "CurrentVersion", "6.3");
        fx.registry.set_value(Hive::LocalMachine, WINDOWS_VERSION_KEY, "CurrentBuild", "19045");
        let mut info = fx.sys_info(HostFamily::Windows, &[]);

        assert_eq!(info.os_name(), Some("Windows 10 Pro 6.3.19045".to_string()));
        assert_eq!(fx.runner.total_calls(), 0);
    }

    #[test]
    fn unix_os_name_is_raw_uname() {
        let fx = Fixture::new();
        fx.runner.set_output("uname -a", "Linux devbox 6.1.0 x86_64 GNU/Linux\n");
        let mut info = fx.sys_info(HostFamily::Linux, &[]);
        assert_eq!(
            info.os_name(),
            Some("Linux devbox 6.1.0 x86_64 GNU/Linux".to_string())
        );
    }

    #[test]
    fn adb_prefers_sdk_platform_tools() {
        let fx = Fixture::new();
        let adb = Path::new("/sdk").join("platform-tools").join("adb");
        fx.fs.add_path(adb.clone());
        fx.runner.set_output(
            &format!("{} version", adb.to_string_lossy()),
            "Android Debug Bridge version 1.0.39\n",
        );
        let mut info = fx.sys_info(HostFamily::Linux, &[("ANDROID_HOME", "/sdk")]);

        assert_eq!(info.adb_version(), Some("1.0.39".to_string()));
        assert_eq!(fx.runner.call_count("adb version"), 0);
    }

    #[test]
    fn adb_falls_back_to_path() {
        let fx = Fixture::new();
        fx.runner
            .set_output("adb version", "Android Debug Bridge version 1.0.41\n");
        let mut info = fx.sys_info(HostFamily::Linux, &[("ANDROID_HOME", "/sdk")]);
        assert_eq!(info.adb_version(), Some("1.0.41".to_string()));
    }

    #[test]
    fn android_installed_reads_emulator_usage() {
        let fx = Fixture::new();
        fx.runner.set_result(
            "emulator -help",
            1,
            "Android Emulator usage: emulator [options] [-qemu args]\n",
            "",
        );
        let mut info = fx.sys_info(HostFamily::Linux, &[]);
        assert!(info.android_installed());
    }

    #[test]
    fn android_not_installed_when_emulator_missing() {
        let fx = Fixture::new();
        let mut info = fx.sys_info(HostFamily::Linux, &[]);
        assert!(!info.android_installed());
    }

    #[test]
    fn itunes_on_darwin_checks_frameworks() {
        let fx = Fixture::new();
        for path in DARWIN_ITUNES_FRAMEWORKS {
            fx.fs.add_path(path);
        }
        let mut info = fx.sys_info(HostFamily::Darwin, &[]);
        assert!(info.itunes_installed());
    }

    #[test]
    fn itunes_on_windows_falls_back_to_x86_program_files() {
        let fx = Fixture::new();
        let root = PathBuf::from("C:/Program Files (x86)/Common Files");
        for dir in WINDOWS_ITUNES_DIRS {
            fx.fs.add_path(root.join("Apple").join(dir));
        }
        let mut info = fx.sys_info(
            HostFamily::Windows,
            &[
                ("CommonProgramFiles", "C:/Program Files/Common Files"),
                ("CommonProgramFiles(x86)", "C:/Program Files (x86)/Common Files"),
            ],
        );
        assert!(info.itunes_installed());
    }

    #[test]
    fn itunes_never_on_linux() {
        let fx = Fixture::new();
        let mut info = fx.sys_info(HostFamily::Linux, &[]);
        assert!(!info.itunes_installed());
    }

    #[test]
    fn xcproj_required_for_old_cocoapods_and_new_xcode() {
        let fx = Fixture::new();
        fx.runner.set_output("pod --version", "0.39.0\n");
        fx.runner.set_output("xcodebuild -version", "Xcode 7.3\n");
        let mut info = fx.sys_info(HostFamily::Darwin, &[]);

        let xcproj = info.xcproj_info();
        assert!(xcproj.should_use_xcproj);
        assert!(!xcproj.xcproj_available);
        assert!(info.cocoapods_update_required());
    }

    #[test]
    fn xcproj_not_probed_when_not_required() {
        let fx = Fixture::new();
        fx.runner.set_output("pod --version", "1.2.0\n");
        fx.runner.set_output("xcodebuild -version", "Xcode 8.2\n");
        fx.runner.set_output("xcproj --version", "xcproj version 0.1.2\n");
        let mut info = fx.sys_info(HostFamily::Darwin, &[]);

        assert_eq!(info.xcproj_info(), XcprojInfo::default());
        assert_eq!(fx.runner.call_count("xcproj --version"), 0);
        assert!(!info.cocoapods_update_required());
    }

    #[test]
    fn xcproj_available_satisfies_requirement() {
        let fx = Fixture::new();
        fx.runner.set_output("pod --version", "0.39.0\n");
        fx.runner.set_output("xcodebuild -version", "Xcode 8.0\n");
        fx.runner.set_output("xcproj --version", "xcproj version 0.1.2\n");
        let mut info = fx.sys_info(HostFamily::Darwin, &[]);

        assert!(info.xcproj_info().xcproj_available);
        assert!(!info.cocoapods_update_required());
    }

    #[test]
    fn shell_reads_comspec_on_windows() {
        let fx = Fixture::new();
        let info = fx.sys_info(
            HostFamily::Windows,
            &[("ComSpec", "C:\\Windows\\system32\\cmd.exe"), ("SHELL", "/bin/bash")],
        );
        assert_eq!(info.shell(), Some("C:\\Windows\\system32\\cmd.exe".to_string()));
    }
}
