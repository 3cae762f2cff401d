//! Platform build readiness.

use std::sync::Arc;

use super::checks::run_checks;
use crate::android::AndroidToolsInfo;
use crate::error::Result;
use crate::platform::MobilePlatform;
use crate::probe::{EnvironmentSnapshot, SysInfo};
use crate::sys::SystemContext;
use crate::warning::Warning;

/// Inspects a machine and reports what stands between it and a mobile build.
///
/// Probe results are memoized across calls. `Doctor` is `Send`; wrap it in
/// a `Mutex` to share it between threads.
#[derive(Debug)]
pub struct Doctor {
    ctx: Arc<SystemContext>,
    sys_info: SysInfo,
    android: AndroidToolsInfo,
}

impl Doctor {
    /// Create a doctor for the given context.
    pub fn new(ctx: Arc<SystemContext>) -> Self {
        Self {
            sys_info: SysInfo::new(ctx.clone()),
            android: AndroidToolsInfo::new(ctx.clone()),
            ctx,
        }
    }

    /// The context every probe reads from.
    pub fn context(&self) -> &SystemContext {
        &self.ctx
    }

    /// Capture the current state of every probe.
    pub fn sys_info(&mut self) -> EnvironmentSnapshot {
        EnvironmentSnapshot::capture(&mut self.sys_info)
    }

    /// Direct access to the individual probes.
    pub fn sys_info_probes(&mut self) -> &mut SysInfo {
        &mut self.sys_info
    }

    /// Direct access to the Android SDK resolver.
    pub fn android_tools(&mut self) -> &mut AndroidToolsInfo {
        &mut self.android
    }

    /// Turn memoization on or off for probes and SDK resolution.
    pub fn set_caching_enabled(&mut self, enabled: bool) {
        tracing::debug!("Probe caching {}", if enabled { "enabled" } else { "disabled" });
        self.sys_info.set_caching_enabled(enabled);
        self.android.set_caching_enabled(enabled);
    }

    /// Every problem found, in a fixed order.
    pub fn warnings(&mut self) -> Vec<Warning> {
        let snapshot = self.sys_info();
        run_checks(&snapshot)
    }

    /// Whether a local build for `platform` can proceed.
    ///
    /// Fails when `platform` is empty or not a supported platform name.
    pub fn can_build_locally(&mut self, platform: &str) -> Result<bool> {
        let platform: MobilePlatform = platform.parse()?;
        let ready = match platform {
            MobilePlatform::Android => self.android.can_build(),
            MobilePlatform::Ios => {
                self.ctx.host.is_darwin() && self.sys_info.xcode_version().is_some()
            }
        };
        tracing::debug!("Can build {} locally: {}", platform, ready);
        Ok(ready)
    }
}
