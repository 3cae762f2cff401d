//! Optional user configuration.
//!
//! The config file can disable probe caching, force a host family and
//! layer environment variables over the process environment:
//!
//! ```
//! use mobile_doctor::config::parse_config;
//! use std::path::Path;
//!
//! let config = parse_config("host: linux\nenv:\n  ANDROID_HOME: /sdk\n", Path::new("config.yml")).unwrap();
//! assert!(config.cache);
//! assert_eq!(config.env["ANDROID_HOME"], "/sdk");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_config, load_config_file, parse_config};
pub use schema::DoctorConfig;

use std::sync::Arc;

use crate::sys::SystemContext;

impl DoctorConfig {
    /// Apply host and environment overrides to a system context.
    pub fn apply(&self, ctx: SystemContext) -> Arc<SystemContext> {
        let mut env = ctx.env.clone();
        env.overlay(&self.env);
        let host = match self.host {
            Some(host) if host != ctx.host => {
                tracing::warn!("Config forces host '{}' while running on '{}'", host, ctx.host);
                host
            }
            Some(host) => host,
            None => ctx.host,
        };
        Arc::new(ctx.with_host(host).with_env(env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::HostFamily;

    #[test]
    fn apply_overrides_host_and_env() {
        let mut config = DoctorConfig {
            host: Some(HostFamily::Windows),
            ..Default::default()
        };
        config
            .env
            .insert("ANDROID_HOME".to_string(), "/opt/sdk".to_string());

        let ctx = config.apply(SystemContext::system());

        assert_eq!(ctx.host, HostFamily::Windows);
        assert_eq!(ctx.env.get("ANDROID_HOME"), Some("/opt/sdk"));
    }

    #[test]
    fn apply_keeps_detected_host_by_default() {
        let ctx = DoctorConfig::default().apply(SystemContext::system());
        assert_eq!(ctx.host, HostFamily::current());
    }
}
