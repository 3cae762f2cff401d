//! Can-build command implementation.
//!
//! The `mobile-doctor can-build <platform>` command answers whether a local
//! build for one platform can proceed. Exit code is 0 when it can, 1 when it
//! cannot, and 2 when the platform name is invalid.

use serde::Serialize;

use crate::cli::args::CanBuildArgs;
use crate::doctor::{Doctor, Warning};
use crate::error::Result;
use crate::platform::MobilePlatform;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// JSON form of the verdict.
#[derive(Debug, Serialize)]
struct Verdict<'a> {
    platform: &'a str,
    can_build: bool,
    warnings: &'a [Warning],
}

/// The can-build command implementation.
pub struct CanBuildCommand {
    doctor: Doctor,
    args: CanBuildArgs,
}

impl CanBuildCommand {
    /// Create a new can-build command.
    pub fn new(doctor: Doctor, args: CanBuildArgs) -> Self {
        Self { doctor, args }
    }

    /// Problems that explain a negative Android verdict.
    fn android_warnings(&mut self) -> Vec<Warning> {
        let javac = self.doctor.sys_info_probes().javac_version();
        let android = self.doctor.android_tools();
        let mut warnings = android.validate();
        warnings.extend(android.validate_sdk_root_variable());
        warnings.extend(android.validate_compiler_version(javac.as_deref()));
        warnings
    }
}

impl Command for CanBuildCommand {
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let can_build = match self.doctor.can_build_locally(&self.args.platform) {
            Ok(can_build) => can_build,
            Err(e) if e.is_validation() => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let platform: MobilePlatform = self.args.platform.parse()?;
        let mut warnings = match platform {
            MobilePlatform::Android => self.android_warnings(),
            MobilePlatform::Ios => self.doctor.warnings(),
        };
        warnings.retain(|w| w.applies_to(platform));

        if self.args.json {
            let verdict = Verdict {
                platform: platform.name(),
                can_build,
                warnings: &warnings,
            };
            let json = serde_json::to_string_pretty(&verdict).map_err(anyhow::Error::from)?;
            ui.message(&json);
        } else if can_build {
            ui.success(&format!("Ready to build for {} on this machine.", platform));
        } else {
            ui.warning(&format!("Cannot build for {} on this machine.", platform));
            for warning in &warnings {
                ui.warning(&warning.message);
                ui.hint(&warning.remediation);
            }
        }

        if can_build {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::mock::{MockFileSystem, MockRegistry, MockRunner};
    use crate::sys::{EnvVars, HostFamily, SystemContext};
    use crate::ui::MockUI;
    use std::sync::Arc;

    fn doctor(host: HostFamily, runner: Arc<MockRunner>) -> Doctor {
        Doctor::new(Arc::new(SystemContext::new(
            host,
            EnvVars::default(),
            runner,
            Arc::new(MockFileSystem::new()),
            Arc::new(MockRegistry::new()),
        )))
    }

    fn args(platform: &str, json: bool) -> CanBuildArgs {
        CanBuildArgs {
            platform: platform.to_string(),
            json,
        }
    }

    #[test]
    fn unsupported_platform_exits_two() {
        let mut cmd = CanBuildCommand::new(
            doctor(HostFamily::Linux, Arc::new(MockRunner::new())),
            args("blackberry", false),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert_eq!(
            ui.errors()[0],
            "Platform blackberry is not supported. The supported platforms are: android, ios"
        );
    }

    #[test]
    fn empty_platform_exits_two() {
        let mut cmd = CanBuildCommand::new(
            doctor(HostFamily::Linux, Arc::new(MockRunner::new())),
            args("", false),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.errors()[0].starts_with("You must specify a platform."));
    }

    #[test]
    fn ios_on_linux_cannot_build() {
        let mut cmd = CanBuildCommand::new(
            doctor(HostFamily::Linux, Arc::new(MockRunner::new())),
            args("iOS", false),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_output("Cannot build for ios"));
        assert!(ui.has_output("NOTE: You can develop for iOS only on Mac OS X systems."));
    }

    #[test]
    fn ios_verdict_lists_only_ios_problems() {
        let runner = Arc::new(MockRunner::new());
        runner.set_output("xcodebuild -version", "Xcode 14.3.1\nBuild version 14E300c\n");
        let mut cmd = CanBuildCommand::new(doctor(HostFamily::Darwin, runner), args("ios", true));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        let warnings = parsed["warnings"].as_array().unwrap();
        assert!(!warnings.is_empty());
        for warning in warnings {
            let platforms = warning["platforms"].as_array().unwrap();
            assert!(platforms.is_empty() || platforms.contains(&serde_json::json!("ios")));
        }
    }

    #[test]
    fn ios_on_darwin_with_xcode_can_build() {
        let runner = Arc::new(MockRunner::new());
        runner.set_output("xcodebuild -version", "Xcode 14.3.1\nBuild version 14E300c\n");
        let mut cmd = CanBuildCommand::new(doctor(HostFamily::Darwin, runner), args("ios", true));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(parsed["platform"], "ios");
        assert_eq!(parsed["can_build"], true);
    }

    #[test]
    fn android_without_sdk_lists_problems() {
        let mut cmd = CanBuildCommand::new(
            doctor(HostFamily::Linux, Arc::new(MockRunner::new())),
            args("android", true),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(parsed["can_build"], false);
        assert!(parsed["warnings"]
            .as_array()
            .is_some_and(|w| w.len() >= 3));
    }
}
