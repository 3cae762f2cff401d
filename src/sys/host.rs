//! Host family detection and environment variable capture.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

/// Operating system family of the machine being inspected.
///
/// Passed into the engine explicitly instead of being queried at each
/// check, so any family can be substituted in tests or through config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostFamily {
    Windows,
    Darwin,
    Linux,
}

impl HostFamily {
    /// Detect the family this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            HostFamily::Darwin
        } else if cfg!(target_os = "windows") {
            HostFamily::Windows
        } else {
            HostFamily::Linux
        }
    }

    /// Whether this is a macOS host (required for iOS builds).
    pub fn is_darwin(self) -> bool {
        matches!(self, HostFamily::Darwin)
    }

    /// Whether this is a Windows host.
    pub fn is_windows(self) -> bool {
        matches!(self, HostFamily::Windows)
    }

    /// Lowercase name used in config files and output.
    pub fn name(self) -> &'static str {
        match self {
            HostFamily::Windows => "windows",
            HostFamily::Darwin => "darwin",
            HostFamily::Linux => "linux",
        }
    }

    /// How a user on this host refers to an environment variable in a shell.
    pub fn env_reference(self, var: &str) -> String {
        match self {
            HostFamily::Windows => format!("%{}%", var),
            HostFamily::Darwin | HostFamily::Linux => format!("${}", var),
        }
    }
}

impl fmt::Display for HostFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HostFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win32" => Ok(HostFamily::Windows),
            "darwin" | "macos" | "osx" => Ok(HostFamily::Darwin),
            "linux" => Ok(HostFamily::Linux),
            other => Err(format!("unknown host family: {}", other)),
        }
    }
}

/// A captured set of environment variables.
///
/// Probes read variables from here rather than from the live process
/// environment, which lets config layers and tests substitute values.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Build from raw OS strings. Non-UTF-8 data is converted lossily.
    pub fn from_os_pairs(pairs: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| {
                    (
                        k.to_string_lossy().into_owned(),
                        v.to_string_lossy().into_owned(),
                    )
                })
                .collect(),
        }
    }

    /// Build from explicit key/value pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Look up a variable. Empty values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Set or replace a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Layer the given variables over the captured ones.
    pub fn overlay(&mut self, layer: &HashMap<String, String>) {
        for (key, value) in layer {
            self.vars.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_family_parses_aliases() {
        assert_eq!("macos".parse::<HostFamily>(), Ok(HostFamily::Darwin));
        assert_eq!("Darwin".parse::<HostFamily>(), Ok(HostFamily::Darwin));
        assert_eq!("win32".parse::<HostFamily>(), Ok(HostFamily::Windows));
        assert_eq!(" linux ".parse::<HostFamily>(), Ok(HostFamily::Linux));
        assert!("beos".parse::<HostFamily>().is_err());
    }

    #[test]
    fn env_reference_uses_host_syntax() {
        assert_eq!(
            HostFamily::Windows.env_reference("ANDROID_HOME"),
            "%ANDROID_HOME%"
        );
        assert_eq!(
            HostFamily::Linux.env_reference("ANDROID_HOME"),
            "$ANDROID_HOME"
        );
        assert_eq!(
            HostFamily::Darwin.env_reference("ANDROID_HOME"),
            "$ANDROID_HOME"
        );
    }

    #[test]
    fn current_host_matches_target_os() {
        let host = HostFamily::current();
        assert_eq!(host.is_darwin(), cfg!(target_os = "macos"));
        assert_eq!(host.is_windows(), cfg!(target_os = "windows"));
    }

    #[test]
    fn env_vars_treat_empty_as_unset() {
        let env = EnvVars::from_pairs(&[("ANDROID_HOME", ""), ("JAVA_HOME", "/jdk")]);
        assert_eq!(env.get("ANDROID_HOME"), None);
        assert_eq!(env.get("JAVA_HOME"), Some("/jdk"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn env_vars_overlay_replaces_values() {
        let mut env = EnvVars::from_pairs(&[("ANDROID_HOME", "/old"), ("KEEP", "1")]);
        let mut layer = HashMap::new();
        layer.insert("ANDROID_HOME".to_string(), "/new".to_string());
        env.overlay(&layer);

        assert_eq!(env.get("ANDROID_HOME"), Some("/new"));
        assert_eq!(env.get("KEEP"), Some("1"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_values_are_converted_lossily() {
        use std::os::unix::ffi::OsStrExt;

        let env = EnvVars::from_os_pairs([
            (
                OsString::from("BROKEN"),
                std::ffi::OsStr::from_bytes(b"\xff").to_os_string(),
            ),
            (OsString::from("JAVA_HOME"), OsString::from("/jdk")),
        ]);

        assert_eq!(env.get("BROKEN"), Some("\u{fffd}"));
        assert_eq!(env.get("JAVA_HOME"), Some("/jdk"));
    }

    #[cfg(unix)]
    #[test]
    fn process_capture_survives_non_utf8_variable() {
        use std::os::unix::ffi::OsStrExt;

        let name = "MOBILE_DOCTOR_NON_UTF8_VALUE";
        std::env::set_var(name, std::ffi::OsStr::from_bytes(b"\xff\xfe"));
        let env = EnvVars::from_process();
        std::env::remove_var(name);

        assert_eq!(env.get(name), Some("\u{fffd}\u{fffd}"));
    }
}
